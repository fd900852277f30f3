//! # HistoryList
//!
//! The last few conversions, newest first. Like `ResultView` it renders
//! inside the results scroll view.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::api::QueryResult;
use crate::tui::components::clamp_rows;
use crate::tui::sql;

pub const EMPTY_HISTORY: &str = "No queries yet. Start by asking a question!";

pub struct HistoryList<'a> {
    pub items: &'a [QueryResult],
}

impl<'a> HistoryList<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        let dim = Style::default().add_modifier(Modifier::DIM);
        if self.items.is_empty() {
            return vec![
                Line::styled("Last 5 queries will appear here", dim),
                Line::default(),
                Line::styled("📭", dim).centered(),
                Line::styled(EMPTY_HISTORY, dim).centered(),
            ];
        }

        let mut lines = vec![Line::styled(format!("Your last {} queries", self.items.len()), dim)];
        for item in self.items {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Q: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(item.question.as_str()),
            ]));
            lines.extend(sql::highlight(&item.sql_query));
            lines.push(Line::styled(item.display_time(), dim));
        }
        lines
    }

    pub fn paragraph(&self) -> Paragraph<'a> {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" 📜 Query History ");
        Paragraph::new(self.lines()).block(block).wrap(Wrap { trim: false })
    }

    /// Rows needed at the given outer width, borders included.
    pub fn height(&self, width: u16) -> u16 {
        clamp_rows(self.paragraph().line_count(width))
    }
}
