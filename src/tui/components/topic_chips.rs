//! # Topic Chips
//!
//! Renders the added topics as colored chips and lets the user remove one.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TopicChipsState` lives in `TuiState`
//! - `TopicChips` is created each frame with borrowed topics and state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::form::{Rgb, TopicTag};
use crate::tui::event::TuiEvent;

/// Persistent selection state for the chip row.
#[derive(Debug, Default)]
pub struct TopicChipsState {
    pub selected: usize,
}

/// Events emitted by the chip row.
#[derive(Debug, Clone, PartialEq)]
pub enum ChipEvent {
    Remove(usize),
}

impl TopicChipsState {
    /// Handle a key event given how many chips there are.
    pub fn handle_event(&mut self, event: &TuiEvent, count: usize) -> Option<ChipEvent> {
        if count == 0 {
            return None;
        }
        self.clamp(count);
        match event {
            TuiEvent::CursorLeft => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.selected = (self.selected + 1).min(count - 1);
                None
            }
            TuiEvent::Backspace | TuiEvent::Delete | TuiEvent::InputChar('x') => {
                Some(ChipEvent::Remove(self.selected))
            }
            _ => None,
        }
    }

    /// Keep the selection inside `0..count` after removals.
    pub fn clamp(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

/// Transient render wrapper for the chip row.
pub struct TopicChips<'a> {
    topics: &'a [TopicTag],
    state: &'a TopicChipsState,
    focused: bool,
}

impl<'a> TopicChips<'a> {
    pub fn new(topics: &'a [TopicTag], state: &'a TopicChipsState, focused: bool) -> Self {
        Self {
            topics,
            state,
            focused,
        }
    }

    /// Height including borders for the given outer width.
    pub fn required_height(&self, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2);
        let lines = Paragraph::new(self.line())
            .wrap(Wrap { trim: false })
            .line_count(inner_width);
        (lines.max(1) as u16).saturating_add(2)
    }

    fn line(&self) -> Line<'a> {
        if self.topics.is_empty() {
            return Line::from(Span::styled(
                "No topics yet",
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut spans = Vec::with_capacity(self.topics.len() * 2);
        for (i, topic) in self.topics.iter().enumerate() {
            let mut style = chip_style(topic.color);
            if self.focused && i == self.state.selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {} × ", topic.label), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!("Topics ({})", self.topics.len()));

        frame.render_widget(
            Paragraph::new(self.line())
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
    }
}

/// Chip background is the topic color; text flips black/white for contrast.
fn chip_style(color: Rgb) -> Style {
    let fg = if color.luma() > 140 {
        Color::Black
    } else {
        Color::White
    };
    Style::default()
        .bg(Color::Rgb(color.r, color.g, color.b))
        .fg(fg)
}
