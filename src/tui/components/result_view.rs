//! # ResultView
//!
//! The most recent conversion: question, generation time and the
//! highlighted SQL. Rendered inside the results scroll view, so it exposes
//! a paragraph plus its height rather than drawing to the frame directly.

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::api::QueryResult;
use crate::tui::components::clamp_rows;
use crate::tui::sql;

pub struct ResultView<'a> {
    pub result: &'a QueryResult,
    pub copied: bool,
}

impl<'a> ResultView<'a> {
    pub fn paragraph(&self) -> Paragraph<'a> {
        let copy_hint = if self.copied {
            Line::styled(" ✓ Copied ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Line::styled(" [Ctrl+Y] Copy ", Style::default().fg(Color::Cyan))
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" ✨ Generated SQL Query ")
            .title(
                Line::styled(
                    format!(" {} ", self.result.display_datetime()),
                    Style::default().add_modifier(Modifier::DIM),
                )
                .alignment(Alignment::Right),
            )
            .title_bottom(copy_hint.alignment(Alignment::Right))
            .border_style(Style::default().fg(Color::Magenta));

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Question: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.result.question.as_str()),
            ]),
            Line::default(),
        ];
        lines.extend(sql::highlight(&self.result.sql_query));

        Paragraph::new(lines).block(block).wrap(Wrap { trim: false })
    }

    /// Rows needed at the given outer width, borders included.
    pub fn height(&self, width: u16) -> u16 {
        clamp_rows(self.paragraph().line_count(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(view: &ResultView) -> String {
        let height = view.height(60);
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(view.paragraph(), f.area())).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_shows_question_sql_and_time() {
        let result = QueryResult::new("How many users?", "SELECT COUNT(*) FROM users;", "2025-03-01T14:05:09");
        let text = draw(&ResultView { result: &result, copied: false });
        assert!(text.contains("How many users?"));
        assert!(text.contains("SELECT COUNT(*) FROM users;"));
        assert!(text.contains("2025-03-01 14:05:09"));
        assert!(text.contains("[Ctrl+Y] Copy"));
    }

    #[test]
    fn test_copied_indicator() {
        let result = QueryResult::new("q", "SELECT 1;", "2025-03-01T14:05:09");
        let text = draw(&ResultView { result: &result, copied: true });
        assert!(text.contains("✓ Copied"));
        assert!(!text.contains("[Ctrl+Y] Copy"));
    }

    #[test]
    fn test_height_grows_with_sql() {
        let short = QueryResult::new("q", "SELECT 1;", "t");
        let long = QueryResult::new("q", "SELECT a,\n  b,\n  c\nFROM t;", "t");
        let short_height = ResultView { result: &short, copied: false }.height(60);
        let long_height = ResultView { result: &long, copied: false }.height(60);
        // borders + question + blank + sql
        assert_eq!(short_height, 5);
        assert_eq!(long_height, short_height + 3);
    }
}
