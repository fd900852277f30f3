//! # TextField Component
//!
//! Editable text used by all three forms.
//!
//! ## Responsibilities
//!
//! - Capture text input and pastes
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter *without* clearing; the owning form decides
//!   when the text goes away
//! - Optionally mask the contents (API key)
//! - Optionally wrap over several rows (question)
//!
//! Cursor position is a byte offset into `buffer`, always on a char boundary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MASK_CHAR: char = '•';
/// Border width on each side of the field.
const BORDER: u16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Enter pressed; carries the current text.
    Submit(String),
    /// Text or cursor changed.
    Changed,
}

pub struct TextField {
    buffer: String,
    cursor: usize,
    /// First visible wrapped row (multi-line fields).
    scroll_row: u16,
    pub masked: bool,
    pub multiline: bool,
    /// Shown dimmed when the buffer is empty.
    pub placeholder: String,
    /// Props set by the parent each frame.
    pub focused: bool,
    pub disabled: bool,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_row: 0,
            masked: false,
            multiline: false,
            placeholder: placeholder.into(),
            focused: false,
            disabled: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Unicode scalar count, as shown in the question form's counter.
    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
        self.scroll_row = 0;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_row = 0;
    }

    fn display_text(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }

    /// Cursor offset within the display text (masking changes byte widths).
    fn display_cursor(&self) -> usize {
        if self.masked {
            self.buffer[..self.cursor].chars().count() * MASK_CHAR.len_utf8()
        } else {
            self.cursor
        }
    }

    fn insert(&mut self, text: &str) {
        let text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\n', '\r'], "")
        };
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    fn render_single_line(&self, frame: &mut Frame, inner: Rect, style: Style) {
        let display = self.display_text();
        let cursor = self.display_cursor();
        let width = inner.width as usize;

        // Scroll horizontally so the cursor stays inside the field.
        let mut start = 0;
        while start < cursor && display[start..cursor].width() >= width.max(1) {
            start = next_char_boundary(&display, start);
        }
        let visible: String = display[start..].chars().collect();
        frame.render_widget(Paragraph::new(visible).style(style), inner);

        if self.focused {
            let col = display[start..cursor].width() as u16;
            frame.set_cursor_position((inner.x + col.min(inner.width.saturating_sub(1)), inner.y));
        }
    }

    fn render_multi_line(&mut self, frame: &mut Frame, inner: Rect, style: Style) {
        let width = inner.width.max(1) as usize;
        let lines = wrap_lines(&self.buffer, width);
        let (col, row) = cursor_position(&self.buffer[..self.cursor], width);

        let visible_rows = inner.height.max(1);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }

        let shown: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll_row as usize)
            .take(visible_rows as usize)
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(shown).style(style), inner);

        if self.focused {
            let y = inner.y + row - self.scroll_row;
            frame.set_cursor_position((inner.x + col.min(inner.width.saturating_sub(1)), y));
        }
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = match (self.focused, self.disabled) {
            (_, true) => Style::default().fg(Color::DarkGray),
            (true, false) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default().add_modifier(Modifier::DIM),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.buffer.is_empty() {
            let hint = Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(hint, inner);
            if self.focused {
                frame.set_cursor_position((inner.x, inner.y));
            }
            return;
        }

        let style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        if self.multiline {
            self.render_multi_line(frame, inner, style);
        } else {
            self.render_single_line(frame, inner, style);
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if let TuiEvent::Submit = event {
            return Some(FieldEvent::Submit(self.buffer.clone()));
        }
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    FieldEvent::Changed
                })
            }
            _ => None,
        }
    }
}

fn wrap_options(width: usize) -> textwrap::Options<'static> {
    textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wraps each logical line separately so hard newlines always start a row.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|logical| {
            let wrapped = textwrap::wrap(logical, wrap_options(width));
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped.into_iter().map(|c| c.into_owned()).collect()
            }
        })
        .collect()
}

/// (column, row) of the cursor, given the text before it.
fn cursor_position(before: &str, width: usize) -> (u16, u16) {
    let logical: Vec<&str> = before.split('\n').collect();
    let (last, earlier) = match logical.split_last() {
        Some(split) => split,
        None => return (0, 0),
    };

    let mut row: usize = earlier
        .iter()
        .map(|line| textwrap::wrap(line, wrap_options(width)).len().max(1))
        .sum();

    let segments = textwrap::wrap(last, wrap_options(width));
    row += segments.len().saturating_sub(1);

    // textwrap drops the spaces it breaks on, so locate the last segment
    // in the raw text and measure from there.
    let mut segment_start = 0;
    let mut search_from = 0;
    for segment in &segments {
        if let Some(found) = last[search_from..].find(segment.as_ref()) {
            segment_start = search_from + found;
            search_from = segment_start + segment.len();
        }
    }
    let mut col = last[segment_start..].width();
    // A full row puts the cursor where the next character will wrap to.
    if col >= width.max(1) {
        row += 1;
        col = 0;
    }
    (col as u16, row as u16)
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
