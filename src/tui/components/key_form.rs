//! # KeyForm Component
//!
//! Masked API key input. Registers the key with the service on Enter.
//!
//! Input is locked while the request is in flight and for the three
//! seconds the success banner shows.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::form::FormPhase;
use crate::tui::component::Component;
use crate::tui::components::{TextField, focus_style, spinner, status_line};

pub const KEY_SUCCESS: &str = "API key set successfully!";

pub struct KeyForm<'a> {
    pub field: &'a mut TextField,
    pub phase: &'a FormPhase,
    pub focused: bool,
    pub spinner_frame: usize,
}

impl KeyForm<'_> {
    /// Block height including borders.
    pub const HEIGHT: u16 = 8;

    fn button_line(&self) -> Line<'static> {
        match self.phase {
            FormPhase::Submitting => Line::styled(
                format!("{} Setting API Key...", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ),
            FormPhase::Succeeded { .. } => {
                Line::styled("✓ API Key Set", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            }
            _ => Line::styled("[Enter] Set API Key", Style::default().fg(Color::Cyan)),
        }
    }
}

impl Component for KeyForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" 🔑 OpenAI API Key ")
            .border_style(focus_style(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        use Constraint::Length;
        let [desc_area, status_area, field_area, button_area] =
            Layout::vertical([Length(1), Length(1), Length(3), Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new("Your OpenAI key, used by the service to generate SQL.")
                .style(Style::default().add_modifier(Modifier::DIM)),
            desc_area,
        );
        frame.render_widget(Paragraph::new(status_line(self.phase, KEY_SUCCESS)), status_area);

        self.field.focused = self.focused;
        self.field.disabled = self.phase.is_submitting() || self.phase.is_succeeded();
        self.field.render(frame, field_area);

        frame.render_widget(Paragraph::new(self.button_line()), button_area);
    }
}
