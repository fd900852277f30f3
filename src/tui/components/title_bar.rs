//! # TitleBar Component
//!
//! Top status bar: app name, server, session and schema state.
//!
//! Stateless; all data arrives as props so the bar doesn't care whether it
//! came from core state or the resolved config.
//!
//! The text degrades on narrow terminals by dropping the right-most parts
//! first, so the session state stays visible longest:
//!
//! 1. `"Text to SQL Converter | session: 1a2b3c4d | schema: loaded | server: http://..."`
//! 2. `"Text to SQL Converter | session: none | schema: not loaded"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SESSION_PREFIX_LEN: usize = 8;

pub struct TitleBar {
    pub server_url: String,
    pub session_id: Option<String>,
    pub schema_loaded: bool,
    /// Any request in flight.
    pub busy: bool,
}

impl TitleBar {
    fn session_label(&self) -> String {
        match &self.session_id {
            Some(id) if id.chars().count() > SESSION_PREFIX_LEN => {
                format!("{}…", id.chars().take(SESSION_PREFIX_LEN).collect::<String>())
            }
            Some(id) => id.clone(),
            None => "none".to_string(),
        }
    }

    fn line(&self) -> Line<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let (schema, schema_style) = if self.schema_loaded {
            ("loaded", Style::default().fg(Color::Green))
        } else {
            ("not loaded", Style::default().fg(Color::Yellow))
        };
        let session_style = if self.session_id.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let mut spans = vec![
            Span::styled("Text to SQL Converter", bold),
            Span::styled(" | session: ", dim),
            Span::styled(self.session_label(), session_style),
            Span::styled(" | schema: ", dim),
            Span::styled(schema, schema_style),
        ];
        if self.busy {
            spans.push(Span::styled(" | working…", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(format!(" | server: {}", self.server_url), dim));
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
