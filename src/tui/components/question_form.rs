//! # QuestionForm Component
//!
//! Multi-line natural-language question with a live character count.
//! Enter submits, Ctrl+J inserts a newline. The text is only cleared once
//! the service answers successfully.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::form::FormPhase;
use crate::tui::component::Component;
use crate::tui::components::{TextField, focus_style, spinner};

/// Rows of text visible in the question box.
const QUESTION_ROWS: u16 = 4;

pub struct QuestionForm<'a> {
    pub field: &'a mut TextField,
    pub phase: &'a FormPhase,
    /// Session active and schema uploaded.
    pub unlocked: bool,
    pub focused: bool,
    pub spinner_frame: usize,
}

impl QuestionForm<'_> {
    /// Block height including borders.
    pub const HEIGHT: u16 = 2 + 1 + 1 + (QUESTION_ROWS + 2) + 1;

    fn status(&self) -> Line<'static> {
        if let Some(error) = self.phase.error() {
            return Line::styled(error.to_owned(), Style::default().fg(Color::Red));
        }
        if !self.unlocked {
            return Line::styled(
                "Set your API key and upload a schema to start asking questions.",
                Style::default().fg(Color::Yellow),
            );
        }
        Line::default()
    }

    fn footer(&self) -> Line<'static> {
        let count = Span::styled(
            format!("{} characters", self.field.char_count()),
            Style::default().add_modifier(Modifier::DIM),
        );
        let action = if self.phase.is_submitting() {
            Span::styled(
                format!("{} Converting...", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled("[Enter] Convert to SQL  [Ctrl+J] New line", Style::default().fg(Color::Cyan))
        };
        Line::from(vec![count, Span::raw("   "), action])
    }
}

impl Component for QuestionForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" 💬 Ask a Question ")
            .border_style(focus_style(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        use Constraint::Length;
        let [desc_area, status_area, field_area, footer_area] =
            Layout::vertical([Length(1), Length(1), Length(QUESTION_ROWS + 2), Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new("Describe the data you want in plain English.")
                .style(Style::default().add_modifier(Modifier::DIM)),
            desc_area,
        );
        frame.render_widget(Paragraph::new(self.status()), status_area);

        self.field.focused = self.focused;
        self.field.disabled = !self.unlocked || self.phase.is_submitting();
        self.field.render(frame, field_area);

        frame.render_widget(Paragraph::new(self.footer()), footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::MSG_CONVERT_FAILED;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(field: &mut TextField, phase: &FormPhase, unlocked: bool) -> String {
        let backend = TestBackend::new(80, QuestionForm::HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                QuestionForm { field, phase, unlocked, focused: true, spinner_frame: 0 }.render(f, f.area())
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_character_count() {
        let mut field = TextField::new("").multiline();
        field.set_text("How many users?");
        let text = draw(&mut field, &FormPhase::Idle, true);
        assert!(text.contains("15 characters"));
        assert!(text.contains("How many users?"));
    }

    #[test]
    fn test_locked_hint_and_disabled_field() {
        let mut field = TextField::new("").multiline();
        let text = draw(&mut field, &FormPhase::Idle, false);
        assert!(text.contains("upload a schema"));
        assert!(field.disabled);
    }

    #[test]
    fn test_error_replaces_hint() {
        let mut field = TextField::new("").multiline();
        let text = draw(&mut field, &FormPhase::Failed(MSG_CONVERT_FAILED.into()), true);
        assert!(text.contains(MSG_CONVERT_FAILED));
    }

    #[test]
    fn test_submitting() {
        let mut field = TextField::new("").multiline();
        let text = draw(&mut field, &FormPhase::Submitting, true);
        assert!(text.contains("Converting..."));
        assert!(field.disabled);
    }
}
