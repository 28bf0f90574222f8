//! # Loader Component
//!
//! Spinner shown while a request is pending. The form is hidden, not
//! disabled: its values stay in `FormState`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Loader {
    frame_index: usize,
}

impl Loader {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    fn glyph(&self) -> &'static str {
        SPINNER_FRAMES[self.frame_index % SPINNER_FRAMES.len()]
    }
}

impl Component for Loader {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                format!("{} Generating", self.glyph()),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Esc to close",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(Loader::new(0).glyph(), Loader::new(SPINNER_FRAMES.len()).glyph());
        assert_ne!(Loader::new(0).glyph(), Loader::new(1).glyph());
    }

    #[test]
    fn test_render_centered_text() {
        let backend = TestBackend::new(30, 9);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| Loader::new(3).render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Generating"));
    }
}
