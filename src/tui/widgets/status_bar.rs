//! Status bar widget: one line with the current route, planner address and
//! any transient notice.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Tone of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Data shown by the status bar; decoupled from `App` so it can be rendered in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Path of the current route, e.g. `/results/abc123`.
    pub route_path: String,
    /// Planner base address.
    pub base_url: String,
    /// Transient message, if one is live.
    pub notice: Option<(String, NoticeKind)>,
}

/// Renders the status bar.
///
/// Layout: `eldtrip  /results/abc123  @ http://host/api  <notice>`.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("eldtrip", cyan.add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(ctx.route_path.clone(), cyan),
        Span::raw("  "),
        Span::styled(format!("@ {}", ctx.base_url), dim),
    ];

    if let Some((text, kind)) = &ctx.notice {
        let color = match kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(text.clone(), Style::default().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
