//! # Selector Component
//!
//! A one-line picker over a fixed list of labels (mood, length, type).
//! Left/Right or Space cycle through the options, wrapping at both ends.
//! Nothing is selected until the user picks, matching an empty form field.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEvent {
    Changed(&'static str),
    Enter,
}

pub struct Selector {
    pub label: &'static str,
    pub focused: bool,
    options: &'static [&'static str],
    selected: Option<usize>,
}

impl Selector {
    /// `current` preselects the matching option; anything else leaves it empty.
    pub fn new(label: &'static str, options: &'static [&'static str], current: &str) -> Self {
        Self {
            label,
            focused: false,
            options,
            selected: options.iter().position(|o| *o == current),
        }
    }

    fn step(&mut self, forward: bool) -> Option<SelectorEvent> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        let next = match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.selected = Some(next);
        Some(SelectorEvent::Changed(self.options[next]))
    }
}

impl Component for Selector {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let arrow_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value = match self.selected {
            Some(i) => Span::styled(
                self.options[i],
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("Select...", Style::default().fg(Color::DarkGray)),
        };

        let line = Line::from(vec![
            Span::styled("‹ ", arrow_style),
            value,
            Span::styled(" ›", arrow_style),
        ]);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.label);

        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            area,
        );
    }
}

impl EventHandler for Selector {
    type Event = SelectorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorRight | TuiEvent::InputChar(' ') => self.step(true),
            TuiEvent::CursorLeft => self.step(false),
            TuiEvent::Submit => Some(SelectorEvent::Enter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{LENGTH_OPTIONS, MOOD_OPTIONS};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn current(selector: &Selector) -> Option<&'static str> {
        selector.selected.map(|i| selector.options[i])
    }

    #[test]
    fn test_starts_empty_without_match() {
        let selector = Selector::new("Mood", &MOOD_OPTIONS, "");
        assert_eq!(current(&selector), None);
    }

    #[test]
    fn test_preselects_current_value() {
        let selector = Selector::new("Length", &LENGTH_OPTIONS, "📕 Medium");
        assert_eq!(current(&selector), Some("📕 Medium"));
    }

    #[test]
    fn test_right_cycles_and_wraps() {
        let mut selector = Selector::new("Length", &LENGTH_OPTIONS, "");
        let seen: Vec<_> = (0..4)
            .filter_map(|_| selector.handle_event(&TuiEvent::CursorRight))
            .collect();
        assert_eq!(
            seen,
            vec![
                SelectorEvent::Changed("📄 Short"),
                SelectorEvent::Changed("📕 Medium"),
                SelectorEvent::Changed("📚 Long"),
                SelectorEvent::Changed("📄 Short"),
            ]
        );
    }

    #[test]
    fn test_left_from_empty_picks_last() {
        let mut selector = Selector::new("Mood", &MOOD_OPTIONS, "");
        assert_eq!(
            selector.handle_event(&TuiEvent::CursorLeft),
            Some(SelectorEvent::Changed("🤢 Sickly"))
        );
        selector.handle_event(&TuiEvent::CursorRight);
        assert_eq!(current(&selector), Some("😊 Happy"));
    }

    #[test]
    fn test_typing_is_ignored() {
        let mut selector = Selector::new("Mood", &MOOD_OPTIONS, "");
        assert_eq!(selector.handle_event(&TuiEvent::InputChar('a')), None);
        assert_eq!(current(&selector), None);
    }

    #[test]
    fn test_render_shows_label_and_placeholder() {
        let backend = TestBackend::new(24, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut selector = Selector::new("Mood", &MOOD_OPTIONS, "");

        terminal.draw(|f| selector.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Mood"));
        assert!(text.contains("Select..."));
    }
}
