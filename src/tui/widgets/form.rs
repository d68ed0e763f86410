//! Text-input form widget with per-field inline errors.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Rows taken by one field: a bordered input box plus one line for its error.
pub const FIELD_HEIGHT: u16 = 4;

/// A single input within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Title drawn on the input border.
    pub label: String,
    /// Dimmed hint drawn while the value is empty.
    pub placeholder: String,
    /// Current text value.
    pub value: String,
    /// Validation message drawn beneath the input, if any.
    pub error: Option<String>,
}

impl FormField {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            value: String::new(),
            error: None,
        }
    }
}

/// A vertical list of text inputs with one focused field.
///
/// Editing a field clears that field's error and no other; errors are
/// otherwise only changed by the owner.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a form focused on its first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Focuses the field at `index`; out-of-range indices are ignored.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    /// Appends a character to the focused field and clears its error.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(ch);
            field.error = None;
        }
    }

    /// Removes the last character of the focused field and clears its error.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
            field.error = None;
        }
    }

    /// Empties the focused field and clears its error.
    pub fn clear_focused(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.clear();
            field.error = None;
        }
    }

    pub fn set_error(&mut self, index: usize, error: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error.into());
        }
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Index of the first field carrying an error.
    pub fn first_error(&self) -> Option<usize> {
        self.fields.iter().position(|f| f.error.is_some())
    }

    /// Error on the field at `index`, if any.
    pub fn error(&self, index: usize) -> Option<&str> {
        self.fields.get(index).and_then(|f| f.error.as_deref())
    }

    /// Value of the field at `index`, or `""` if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Total rows needed to draw every field.
    pub fn height(&self) -> u16 {
        FIELD_HEIGHT.saturating_mul(self.fields.len() as u16)
    }
}

/// Renders a form; `editable` controls whether the focus cursor is shown.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, editable: bool, frame: &mut Frame, area: Rect) {
    let constraints = form
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT));
    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = editable && i == form.focus;
        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(rows[i]);

        let border_color = match (&field.error, is_focused) {
            (Some(_), _) => Color::Red,
            (None, true) => Color::Yellow,
            (None, false) => Color::DarkGray,
        };
        let block = Block::default()
            .title(format!("{} *", field.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = if field.value.is_empty() && !is_focused {
            vec![Span::styled(
                field.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            vec![Span::raw(field.value.as_str())]
        };
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

        if let Some(err) = &field.error {
            let error = Paragraph::new(Span::styled(
                format!(" {err}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(error, error_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> Form {
        Form::new(vec![
            FormField::new("Current Location", "e.g., Chicago, IL"),
            FormField::new("Pickup Location", "e.g., Dallas, TX"),
            FormField::new("Cycle Used", "e.g., 32.5"),
        ])
    }

    mod focus {
        use super::*;

        #[test]
        fn starts_at_zero() {
            assert_eq!(make_form().focus(), 0);
        }

        #[test]
        fn next_wraps() {
            let mut form = make_form();
            form.focus_next();
            form.focus_next();
            assert_eq!(form.focus(), 2);
            form.focus_next();
            assert_eq!(form.focus(), 0);
        }

        #[test]
        fn prev_wraps() {
            let mut form = make_form();
            form.focus_prev();
            assert_eq!(form.focus(), 2);
        }

        #[test]
        fn empty_form_is_noop() {
            let mut form = Form::new(vec![]);
            form.focus_next();
            form.focus_prev();
            assert_eq!(form.focus(), 0);
        }

        #[test]
        fn set_focus_in_range() {
            let mut form = make_form();
            form.set_focus(2);
            assert_eq!(form.focus(), 2);
        }

        #[test]
        fn set_focus_out_of_range_ignored() {
            let mut form = make_form();
            form.set_focus(9);
            assert_eq!(form.focus(), 0);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn insert_appends_to_focused_only() {
            let mut form = make_form();
            form.insert_char('C');
            form.insert_char('h');
            assert_eq!(form.value(0), "Ch");
            assert_eq!(form.value(1), "");
        }

        #[test]
        fn delete_removes_last() {
            let mut form = make_form();
            form.insert_char('A');
            form.insert_char('B');
            form.delete_char();
            assert_eq!(form.value(0), "A");
        }

        #[test]
        fn delete_on_empty_is_noop() {
            let mut form = make_form();
            form.delete_char();
            assert_eq!(form.value(0), "");
        }

        #[test]
        fn clear_focused_empties_value() {
            let mut form = make_form();
            form.insert_char('A');
            form.clear_focused();
            assert_eq!(form.value(0), "");
        }

        #[test]
        fn value_out_of_bounds_is_empty() {
            assert_eq!(make_form().value(99), "");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn set_and_read() {
            let mut form = make_form();
            form.set_error(1, "Required");
            assert_eq!(form.error(1), Some("Required"));
            assert_eq!(form.error(0), None);
            assert_eq!(form.first_error(), Some(1));
        }

        #[test]
        fn out_of_bounds_is_noop() {
            let mut form = make_form();
            form.set_error(99, "nope");
            assert_eq!(form.first_error(), None);
        }

        #[test]
        fn clear_errors_removes_all() {
            let mut form = make_form();
            form.set_error(0, "a");
            form.set_error(2, "b");
            form.clear_errors();
            assert_eq!(form.first_error(), None);
        }

        #[test]
        fn typing_clears_only_own_error() {
            let mut form = make_form();
            form.set_error(0, "Required");
            form.set_error(1, "Required");
            form.insert_char('X');
            assert_eq!(form.error(0), None);
            assert_eq!(form.error(1), Some("Required"));
        }

        #[test]
        fn deleting_clears_only_own_error() {
            let mut form = make_form();
            form.set_focus(2);
            form.set_error(0, "Required");
            form.set_error(2, "Must be 0–70 hours");
            form.delete_char();
            assert_eq!(form.error(0), Some("Required"));
            assert_eq!(form.error(2), None);
        }
    }

    #[test]
    fn height_covers_all_fields() {
        assert_eq!(make_form().height(), 3 * FIELD_HEIGHT);
    }

    #[test]
    fn fields_keep_labels_and_placeholders() {
        let form = make_form();
        let labels: Vec<&str> = form.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Current Location", "Pickup Location", "Cycle Used"]);
        assert_eq!(form.fields()[2].placeholder, "e.g., 32.5");
    }
}
