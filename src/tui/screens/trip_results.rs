//! Trip results screen: route map, trip summary, and the printable logs link.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::{ApiError, Generation};
use crate::model::{Compliance, TripId, TripRecord};
use crate::tui::action::{Action, ScreenState};
use crate::tui::route::Route;
use crate::tui::widgets::route_map::draw_route_map;

pub const LOADING_MESSAGE: &str = "Loading your trip...";
pub const NOT_FOUND_MESSAGE: &str = "Trip not found";

/// Load state of the trip being viewed.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsStatus {
    Loading,
    Loaded(Box<TripRecord>),
    /// The lookup failed for any reason.
    NotFound,
}

/// State for the trip results screen.
#[derive(Debug, Clone)]
pub struct TripResultsState {
    trip_id: Option<TripId>,
    /// Generation of the lookup whose answer is wanted.
    generation: Option<Generation>,
    status: ResultsStatus,
    logs_url: String,
}

impl Default for TripResultsState {
    fn default() -> Self {
        Self::new()
    }
}

impl TripResultsState {
    /// Creates an idle state with no trip selected.
    pub fn new() -> Self {
        Self {
            trip_id: None,
            generation: None,
            status: ResultsStatus::Loading,
            logs_url: String::new(),
        }
    }

    pub fn trip_id(&self) -> Option<&TripId> {
        self.trip_id.as_ref()
    }

    pub fn status(&self) -> &ResultsStatus {
        &self.status
    }

    /// Loaded record, if the lookup succeeded.
    pub fn record(&self) -> Option<&TripRecord> {
        match &self.status {
            ResultsStatus::Loaded(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn logs_url(&self) -> &str {
        &self.logs_url
    }

    /// Starts showing `trip_id`, discarding whatever was shown before.
    pub fn begin_load(&mut self, trip_id: TripId, generation: Generation, logs_url: String) {
        self.trip_id = Some(trip_id);
        self.generation = Some(generation);
        self.status = ResultsStatus::Loading;
        self.logs_url = logs_url;
    }

    /// Applies a lookup outcome. Returns `false` if it was stale and ignored.
    ///
    /// Only the most recently started lookup for the trip on screen is applied.
    pub fn finish_load(
        &mut self,
        generation: Generation,
        trip_id: &TripId,
        outcome: Result<TripRecord, ApiError>,
    ) -> bool {
        if self.generation != Some(generation) || self.trip_id.as_ref() != Some(trip_id) {
            tracing::debug!(generation, %trip_id, "dropping stale trip lookup");
            return false;
        }
        self.generation = None;
        self.status = match outcome {
            Ok(record) => ResultsStatus::Loaded(Box::new(record)),
            Err(e) => {
                tracing::info!(%trip_id, error = %e, "trip unavailable");
                ResultsStatus::NotFound
            }
        };
        true
    }
}

impl ScreenState for TripResultsState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            // A missing trip is terminal; only a loaded one can be refreshed.
            KeyCode::Char('r') => match (&self.trip_id, &self.status) {
                (Some(id), ResultsStatus::Loaded(_)) => Action::LoadTrip(id.clone()),
                _ => Action::None,
            },
            KeyCode::Char('n') | KeyCode::Esc => Action::Navigate(Route::Intake),
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}

fn hours_label(hours: Option<f64>) -> String {
    match hours {
        Some(h) => format!("{h:.1} hours"),
        None => "Pending".to_string(),
    }
}

fn compliance_style(compliance: Compliance) -> Style {
    let color = match compliance {
        Compliance::Compliant => Color::Green,
        Compliance::Pending => Color::Yellow,
        Compliance::Failed => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn summary_lines(record: &TripRecord, logs_url: &str) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Cyan);
    let value = Style::default().fg(Color::White);
    let row = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<16}"), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        row("From:", record.current_location.clone()),
        row("To:", record.dropoff_location.clone()),
    ];
    if let Some(pickup) = &record.pickup_location {
        lines.push(row("Pickup:", pickup.clone()));
    }
    lines.push(row("Distance:", record.distance_label()));
    lines.push(row("Driving time:", hours_label(record.total_driving_hours)));
    if let Some(cycle) = record.cycle_used_hours {
        lines.push(row("Cycle used:", format!("{cycle:.1} hours")));
    }
    if let Some(status) = &record.status {
        lines.push(row("Status:", status.clone()));
    }
    let compliance = record.compliance();
    lines.push(Line::from(vec![
        Span::styled(format!("{:<16}", "Compliance:"), label),
        Span::styled(compliance.label(), compliance_style(compliance)),
    ]));
    if let Some(created) = record.created_at {
        lines.push(row("Planned:", created.format("%Y-%m-%d %H:%M UTC").to_string()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Daily Logs",
        label.add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        logs_url.to_string(),
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines
}

/// Renders the trip results screen.
#[mutants::skip]
pub fn draw_trip_results(state: &TripResultsState, frame: &mut Frame, area: Rect) {
    let title = match state.trip_id() {
        Some(id) => format!(" Trip {id} "),
        None => " Trip ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    match state.status() {
        ResultsStatus::Loading | ResultsStatus::NotFound => {
            let (text, color) = if matches!(state.status(), ResultsStatus::Loading) {
                (LOADING_MESSAGE, Color::Yellow)
            } else {
                (NOT_FOUND_MESSAGE, Color::Red)
            };
            let message = Paragraph::new(vec![Line::from(""), Line::from(text)])
                .style(Style::default().fg(color))
                .alignment(Alignment::Center);
            frame.render_widget(message, content_area);
        }
        ResultsStatus::Loaded(record) => {
            let [map_area, summary_area] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(content_area);
            draw_route_map(record.route.as_ref(), frame, map_area);

            let summary = Paragraph::new(summary_lines(record, state.logs_url()))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .title(" Trip Summary ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
            frame.render_widget(summary, summary_area);
        }
    }

    let footer = Paragraph::new("r: refresh  n/Esc: new trip  F1: help  q: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
