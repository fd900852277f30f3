//! # SchemaForm Component
//!
//! Picks a JSON schema file and uploads it.
//!
//! Two ways in: type a path and press Enter (browse), or drag the file onto
//! the terminal, which delivers its path as a bracketed paste (drop).
//! Ctrl+U uploads whichever file is selected.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::form::FormPhase;
use crate::core::schema::{SchemaSelection, SelectVia, clean_path};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{FieldEvent, TextField, focus_style, spinner, status_line};
use crate::tui::event::TuiEvent;

pub const SCHEMA_SUCCESS: &str = "Schema uploaded successfully!";

/// What the user asked the schema panel to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEvent {
    Select { raw: String, via: SelectVia },
}

/// Persistent state: the path being typed.
pub struct SchemaInput {
    pub field: TextField,
}

impl Default for SchemaInput {
    fn default() -> Self {
        Self {
            field: TextField::new("Type a path and press Enter, or drop a .json file here"),
        }
    }
}

impl EventHandler for SchemaInput {
    type Event = SchemaEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            // A drop replaces whatever was typed.
            TuiEvent::Paste(raw) if !self.field.disabled => {
                self.field.set_text(clean_path(raw).to_string_lossy());
                Some(SchemaEvent::Select { raw: raw.clone(), via: SelectVia::Drop })
            }
            _ => match self.field.handle_event(event)? {
                FieldEvent::Submit(raw) if !self.field.disabled => {
                    Some(SchemaEvent::Select { raw, via: SelectVia::Browse })
                }
                _ => None,
            },
        }
    }
}

pub struct SchemaForm<'a> {
    pub input: &'a mut SchemaInput,
    pub phase: &'a FormPhase,
    pub selected: Option<&'a SchemaSelection>,
    pub schema_loaded: bool,
    pub focused: bool,
    pub spinner_frame: usize,
}

impl SchemaForm<'_> {
    /// Block height including borders.
    pub const HEIGHT: u16 = 8;

    fn selection_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        match self.selected {
            Some(selection) => spans.push(Span::styled(
                format!("📎 {}  ", selection.file_name),
                Style::default().fg(Color::White),
            )),
            None if self.schema_loaded => {
                spans.push(Span::styled("Schema loaded  ", Style::default().fg(Color::Green)))
            }
            None => {}
        }
        spans.push(match self.phase {
            FormPhase::Submitting => Span::styled(
                format!("{} Uploading...", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ),
            _ => Span::styled("[Ctrl+U] Upload Schema", Style::default().fg(Color::Cyan)),
        });
        Line::from(spans)
    }
}

impl Component for SchemaForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" 📁 Database Schema ")
            .border_style(focus_style(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        use Constraint::Length;
        let [desc_area, status_area, field_area, button_area] =
            Layout::vertical([Length(1), Length(1), Length(3), Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new("Upload a JSON file describing your tables and columns.")
                .style(Style::default().add_modifier(Modifier::DIM)),
            desc_area,
        );
        frame.render_widget(Paragraph::new(status_line(self.phase, SCHEMA_SUCCESS)), status_area);

        self.input.field.focused = self.focused;
        self.input.field.disabled = self.phase.is_submitting();
        self.input.field.render(frame, field_area);

        frame.render_widget(Paragraph::new(self.selection_line()), button_area);
    }
}
