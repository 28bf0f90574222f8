//! # Result View
//!
//! Shows the generated text in a scrollable, wrapped block with a footer
//! saying when it was generated and how long it took.
//!
//! Persistent scroll state lives in `TuiState`; `ResultView` borrows it per frame.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent scroll state for the result text.
#[derive(Default)]
pub struct ResultViewState {
    pub scroll_state: ScrollViewState,
}

impl ResultViewState {
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for ResultViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

pub struct ResultView<'a> {
    text: &'a str,
    generated_at: DateTime<Local>,
    elapsed_ms: i64,
    state: &'a mut ResultViewState,
}

impl<'a> ResultView<'a> {
    pub fn new(
        text: &'a str,
        generated_at: DateTime<Local>,
        elapsed_ms: i64,
        state: &'a mut ResultViewState,
    ) -> Self {
        Self {
            text,
            generated_at,
            elapsed_ms,
            state,
        }
    }

    fn footer(&self) -> String {
        format!(
            " generated {} in {:.1}s ",
            self.generated_at.format("%H:%M:%S"),
            self.elapsed_ms as f64 / 1000.0
        )
    }
}

impl Component for ResultView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" Result ")
            .title_bottom(Line::from(self.footer()).right_aligned());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.text)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        let content_height = paragraph.line_count(content_width).max(1) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_shows_text_and_footer() {
        let backend = TestBackend::new(50, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ResultViewState::default();

        terminal
            .draw(|f| {
                ResultView::new("Hi there", Local::now(), 1500, &mut state).render(f, f.area())
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Hi there"));
        assert!(text.contains("in 1.5s"));
    }

    #[test]
    fn test_scroll_events_consume_silently() {
        let mut state = ResultViewState::default();
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('c')), None);
    }
}
