use crate::core::state::{App, CallState};
use crate::generation::GenerationError;
use crate::tui::component::Component;
use crate::tui::components::{Header, Loader, ResultView, TopicChips};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [header_area, body_area, help_area] = layout.areas(frame.area());

    Header::new(app.endpoint.clone(), app.status_message.clone()).render(frame, header_area);

    match &app.call {
        CallState::Idle => draw_form(frame, body_area, app, tui),
        CallState::Pending { .. } => Loader::new(tui.spinner_frame).render(frame, body_area),
        CallState::Succeeded {
            text,
            generated_at,
            elapsed_ms,
        } => ResultView::new(text, *generated_at, *elapsed_ms, &mut tui.result)
            .render(frame, body_area),
        CallState::Failed { error } => draw_error_view(frame, body_area, error),
    }

    frame.render_widget(
        Line::from(Span::styled(
            help_text(&app.call, tui.focus),
            Style::default().fg(Color::DarkGray),
        )),
        help_area,
    );
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Ratio};

    let chips = TopicChips::new(
        &app.form.topics,
        &tui.topic_chips,
        tui.focus == Focus::Topics,
    );
    let chips_height = chips.required_height(area.width);

    let [prompt_area, selectors_area, chips_area, topic_area, button_area, _] =
        Layout::vertical([
            Length(3),
            Length(3),
            Length(chips_height),
            Length(3),
            Length(3),
            Min(0),
        ])
        .areas(area);

    tui.prompt.render(frame, prompt_area);

    let [mood_area, length_area, kind_area] =
        Layout::horizontal([Ratio(1, 3), Ratio(1, 3), Ratio(1, 3)]).areas(selectors_area);
    tui.mood.render(frame, mood_area);
    tui.length.render(frame, length_area);
    tui.kind.render(frame, kind_area);

    chips.render(frame, chips_area);

    let [topic_input_area, add_area] = Layout::horizontal([Min(0), Length(9)]).areas(topic_area);
    tui.topic_input.render(frame, topic_input_area);
    frame.render_widget(
        Paragraph::new("Add ⏎")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::bordered().border_type(BorderType::Rounded)),
        add_area,
    );

    draw_generate_button(frame, button_area, tui.focus == Focus::Generate);
}

fn draw_generate_button(frame: &mut Frame, area: Rect, focused: bool) {
    let [button] = Layout::horizontal([Constraint::Length(16)])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);

    let (style, border_style) = if focused {
        (
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Magenta),
        )
    } else {
        (
            Style::default().fg(Color::Magenta),
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(
        Paragraph::new("Generate")
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            ),
        button,
    );
}

fn draw_error_view(frame: &mut Frame, area: Rect, error: &GenerationError) {
    let lines = vec![
        Line::from(Span::styled(
            "Generation failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to retry, r to edit the form, Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let error_paragraph = Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn help_text(call: &CallState, focus: Focus) -> &'static str {
    match call {
        CallState::Idle => match focus {
            Focus::Mood | Focus::Length | Focus::Kind => {
                "←/→ choose · Tab next field · Ctrl+G generate · Esc close"
            }
            Focus::Topics => "←/→ select · Del remove · Tab next field · Esc close",
            Focus::TopicInput => "Enter add topic · Tab next field · Ctrl+G generate · Esc close",
            Focus::Generate => "Enter generate · Tab next field · Esc close",
            Focus::Prompt => "Type your prompt · Tab next field · Ctrl+G generate · Esc close",
        },
        CallState::Pending { .. } => "Waiting for response · Esc close",
        CallState::Succeeded { .. } => "c copy · r reset · ↑/↓ scroll · Esc close",
        CallState::Failed { .. } => "Enter retry · r reset · Esc close",
    }
}
