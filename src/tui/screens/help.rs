//! Help screen: scrollable keybinding reference for the screen that opened it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static TRIP_FORM_KEYS: &[(&str, &str)] = &[
    ("Tab / ↓", "next field"),
    ("Shift-Tab / ↑", "prev field"),
    ("Backspace", "delete character"),
    ("Ctrl+U", "clear field"),
    ("Enter", "generate route & logs"),
    ("Esc", "quit"),
    ("F1", "help"),
];

static TRIP_RESULTS_KEYS: &[(&str, &str)] = &[
    ("r", "refresh trip"),
    ("n / Esc", "plan a new trip"),
    ("q", "quit"),
    ("F1", "help"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

static GLOBAL_KEYS: &[(&str, &str)] = &[("Ctrl+C", "quit from anywhere")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a help state scrolled to the top with origin [`Screen::TripForm`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::TripForm,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Screen that opened help and that help returns to.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Opens help for `screen`, scrolled to the top.
    pub fn open_from(&mut self, screen: Screen) {
        self.origin = screen;
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::CloseHelp,
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::TripForm => "Trip Planner",
        Screen::TripResults => "Trip Results",
        Screen::Help => "Help",
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let mut lines = match origin {
        Screen::TripForm => build_section("Trip Planner", TRIP_FORM_KEYS),
        Screen::TripResults => build_section("Trip Results", TRIP_RESULTS_KEYS),
        Screen::Help => build_section("Help", HELP_KEYS),
    };
    lines.extend(build_section("Global", GLOBAL_KEYS));
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = content_lines.len() as u16;
    let capped_scroll = state.scroll().min(total.saturating_sub(content_area.height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
