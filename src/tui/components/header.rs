//! # Header Component
//!
//! Top bar showing the application name, the endpoint and the status
//! message, with the close hint pinned to the right.
//!
//! Stateless: all fields are props. The priority order when space runs
//! out is close hint, then title, then status, then endpoint.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct Header {
    pub endpoint: String,
    pub status_message: String,
}

impl Header {
    pub fn new(endpoint: String, status_message: String) -> Self {
        Self {
            endpoint,
            status_message,
        }
    }

    fn left_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled(
            "Responder",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            format!(" | {}", self.endpoint),
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    }
}

const CLOSE_HINT: &str = "Esc ✕";

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(CLOSE_HINT.chars().count() as u16 + 1),
        ])
        .areas(area);

        frame.render_widget(self.left_line(), left);
        frame.render_widget(
            Line::from(Span::styled(CLOSE_HINT, Style::default().fg(Color::Red))).right_aligned(),
            right,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(header: &mut Header, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect::<String>()
    }

    #[test]
    fn test_header_shows_status_and_endpoint() {
        let mut header = Header::new(
            "http://localhost:3000/api/trpc/event.hello".to_string(),
            "Generating...".to_string(),
        );
        let text = rendered(&mut header, 100);
        assert!(text.contains("Responder"));
        assert!(text.contains("Generating..."));
        assert!(text.contains("localhost:3000"));
        assert!(text.contains("Esc"));
    }

    #[test]
    fn test_header_without_status() {
        let mut header = Header::new("http://x".to_string(), String::new());
        let text = rendered(&mut header, 60);
        assert!(text.starts_with("Responder | http://x"));
    }
}
