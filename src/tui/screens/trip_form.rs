//! Trip intake screen: collects the four trip inputs and submits them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::{ApiError, Generation, SubmitReceipt};
use crate::model::{FieldError, TripField, TripRequest};
use crate::tui::action::{Action, ScreenState};
use crate::tui::route::Route;
use crate::tui::widgets::form::{Form, FormField, draw_form};
use crate::tui::widgets::status_bar::NoticeKind;

/// Shown when the planner rejects a submission without saying why.
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

/// Shown when the planner could not be reached or answered unintelligibly.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: could not reach the trip planner";

/// Shown after a successful submission when the planner sent no message.
pub const SUBMITTED_FALLBACK: &str = "Trip submitted! Planning route and ELD logs...";

/// A whole-form submission failure, not attributed to any one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub message: String,
}

impl FormError {
    fn from_api(error: &ApiError) -> Self {
        let message = match error {
            ApiError::Rejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::MissingTripId => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
        };
        Self { message }
    }
}

/// State for the trip intake screen.
#[derive(Debug, Clone)]
pub struct TripFormState {
    form: Form,
    /// Generation of the in-flight submission, if any.
    pending: Option<Generation>,
    submitted: bool,
    form_error: Option<FormError>,
    /// Outcome message waiting to be picked up by the app.
    notice: Option<(String, NoticeKind)>,
}

impl Default for TripFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl TripFormState {
    /// Creates an empty intake form focused on the current location.
    pub fn new() -> Self {
        let fields = TripField::all()
            .iter()
            .map(|f| FormField::new(f.label(), f.placeholder()))
            .collect();
        Self {
            form: Form::new(fields),
            pending: None,
            submitted: false,
            form_error: None,
            notice: None,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the last submission succeeded.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn form_error(&self) -> Option<&FormError> {
        self.form_error.as_ref()
    }

    /// Error currently shown for `field`, if any.
    pub fn field_error(&self, field: TripField) -> Option<&str> {
        self.form.error(field.index())
    }

    /// Records the generation of the submission the app just dispatched.
    pub fn track_submit(&mut self, generation: Generation) {
        self.pending = Some(generation);
    }

    /// Takes the message describing the last settled submission, if any.
    pub fn take_notice(&mut self) -> Option<(String, NoticeKind)> {
        self.notice.take()
    }

    /// Validates every field and, if all pass, asks the app to submit.
    ///
    /// Invalid input shows all field errors and returns [`Action::None`].
    fn submit(&mut self) -> Action {
        if self.is_submitting() {
            tracing::debug!("submit ignored: request already in flight");
            return Action::None;
        }

        self.form.clear_errors();
        let value = |field: TripField| self.form.value(field.index());
        let parsed = TripRequest::parse(
            value(TripField::CurrentLocation),
            value(TripField::PickupLocation),
            value(TripField::DropoffLocation),
            value(TripField::CycleUsed),
        );

        match parsed {
            Ok(request) => {
                self.submitted = false;
                self.form_error = None;
                Action::SubmitTrip(request)
            }
            Err(errors) => {
                self.show_field_errors(&errors);
                Action::None
            }
        }
    }

    fn show_field_errors(&mut self, errors: &[FieldError]) {
        for FieldError { field, error } in errors {
            self.form.set_error(field.index(), error.to_string());
        }
        if let Some(first) = self.form.first_error() {
            self.form.set_focus(first);
        }
    }

    /// Applies the outcome of a submission and returns the resulting transition.
    ///
    /// Outcomes for anything other than the in-flight generation are dropped.
    pub fn finish_submit(
        &mut self,
        generation: Generation,
        outcome: Result<SubmitReceipt, ApiError>,
    ) -> Action {
        if self.pending != Some(generation) {
            tracing::debug!(generation, pending = ?self.pending, "dropping stale submission result");
            return Action::None;
        }
        self.pending = None;

        match outcome {
            Ok(receipt) => {
                tracing::info!(trip_id = %receipt.trip_id, "trip submitted");
                self.submitted = true;
                let message = receipt
                    .message
                    .unwrap_or_else(|| SUBMITTED_FALLBACK.to_string());
                self.notice = Some((message, NoticeKind::Success));
                Action::Navigate(Route::Results(receipt.trip_id))
            }
            Err(error) => {
                let form_error = FormError::from_api(&error);
                self.notice = Some((form_error.message.clone(), NoticeKind::Error));
                self.form_error = Some(form_error);
                Action::None
            }
        }
    }
}

impl ScreenState for TripFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.clear_focused();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Renders the trip intake screen.
#[mutants::skip]
pub fn draw_trip_form(state: &TripFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" ELD Trip Planner ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, button_area, message_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(state.form().height()),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(state.form(), !state.is_submitting(), frame, form_area);

    let button = if state.is_submitting() {
        Span::styled("[ Planning Trip... ]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            "[ Generate Route & Logs ]",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Center),
        button_area,
    );

    if let Some(err) = state.form_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err.message.as_str(),
            Style::default().fg(Color::Red),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(error, message_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Ctrl+U: clear field  Enter: submit  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
