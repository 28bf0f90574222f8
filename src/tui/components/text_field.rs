//! # TextField Component
//!
//! Single-line text input used for the prompt and the topic draft.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste with newlines stripped)
//! - Editing: backspace, delete, left/right, home/end
//! - Horizontal scrolling so the cursor is always visible
//!
//! The buffer is internal state; the core owns the canonical value and is
//! told about every change through `FieldEvent::Changed`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Buffer content changed; carries the full new text.
    Changed(String),
    /// Enter pressed.
    Enter,
}

pub struct TextField {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Border title (Prop)
    pub title: String,
    /// Whether this field owns the cursor (Prop)
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl TextField {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            focused: false,
            cursor: 0,
        }
    }

    /// Replace the buffer from outside (e.g. the core cleared a draft).
    /// No-op if the text is unchanged, so the cursor stays put.
    pub fn set_text(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor = self.buffer.len();
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn changed(&self) -> Option<FieldEvent> {
        Some(FieldEvent::Changed(self.buffer.clone()))
    }

    /// First visible byte and the cursor column relative to the inner area.
    ///
    /// Leading characters are skipped until the text before the cursor fits
    /// in `inner_width - 1` columns (one column is reserved for the cursor).
    fn visible_window(&self, inner_width: u16) -> (usize, u16) {
        let limit = usize::from(inner_width.saturating_sub(1));
        let mut start = 0;
        let mut before: usize = self.buffer[..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum();

        let mut chars = self.buffer[..self.cursor].char_indices();
        while before > limit {
            match chars.next() {
                Some((idx, c)) => {
                    before -= c.width().unwrap_or(0);
                    start = idx + c.len_utf8();
                }
                None => break,
            }
        }
        (start, before as u16)
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());

        let inner = block.inner(area);
        let (start, cursor_col) = self.visible_window(inner.width);

        let input = Paragraph::new(&self.buffer[start..])
            .block(block)
            .style(Style::default().fg(Color::White));
        frame.render_widget(input, area);

        if self.focused && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor_col, inner.y));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                let single_line: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
                if single_line.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor, &single_line);
                self.cursor += single_line.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                let prev = self.prev_boundary()?;
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                let next = self.next_boundary()?;
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary()?;
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary()?;
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(FieldEvent::Enter),
            _ => None,
        }
    }
}
