//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the form,
//! translates keyboard events into `core::Action` values and performs the
//! `Effect`s returned by `update()`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Pending**: draws every ~80ms so the spinner animates.
//! - **Otherwise**: sleeps up to 500ms and only redraws on events,
//!   background actions or terminal resize.
//!
//! ## Requests
//!
//! Each submission runs on its own tokio task which reports back through a
//! `std::sync::mpsc` channel as `Action::GenerationFinished`. The loop keeps
//! the abort handle of the live task and aborts it on reset, close or a new
//! submission; the reducer drops any resolution that is not for the current
//! request.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::clipboard::CopyToClipboard;
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::form::{FormState, LENGTH_OPTIONS, MOOD_OPTIONS, TYPE_OPTIONS};
use crate::core::state::{App, CallState, RequestId};
use crate::generation::{GenerationProvider, RequestPayload, TrpcProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChipEvent, FieldEvent, ResultViewState, Selector, SelectorEvent, TextField, TopicChipsState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which form widget receives key events while the form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Mood,
    Length,
    Kind,
    Topics,
    TopicInput,
    Generate,
}

const FOCUS_ORDER: [Focus; 7] = [
    Focus::Prompt,
    Focus::Mood,
    Focus::Length,
    Focus::Kind,
    Focus::Topics,
    Focus::TopicInput,
    Focus::Generate,
];

impl Focus {
    /// Next (or previous) widget in tab order. The chip row is skipped
    /// while there are no topics.
    pub fn step(self, forward: bool, has_topics: bool) -> Focus {
        let len = FOCUS_ORDER.len();
        let mut idx = FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        loop {
            idx = if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if FOCUS_ORDER[idx] != Focus::Topics || has_topics {
                return FOCUS_ORDER[idx];
            }
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub prompt: TextField,
    pub topic_input: TextField,
    pub mood: Selector,
    pub length: Selector,
    pub kind: Selector,
    pub topic_chips: TopicChipsState,
    pub result: ResultViewState,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(form: &FormState) -> Self {
        let mut prompt = TextField::new("Respond to");
        prompt.set_text(&form.prompt);
        let mut topic_input = TextField::new("Talk about");
        topic_input.set_text(&form.topic_draft);

        let mut tui = Self {
            focus: Focus::Prompt,
            prompt,
            topic_input,
            mood: Selector::new("Mood", &MOOD_OPTIONS, &form.mood),
            length: Selector::new("Length", &LENGTH_OPTIONS, &form.length),
            kind: Selector::new("Type", &TYPE_OPTIONS, &form.kind),
            topic_chips: TopicChipsState::default(),
            result: ResultViewState::default(),
            spinner_frame: 0,
        };
        tui.sync_focus();
        tui
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.prompt.focused = self.focus == Focus::Prompt;
        self.mood.focused = self.focus == Focus::Mood;
        self.length.focused = self.focus == Focus::Length;
        self.kind.focused = self.focus == Focus::Kind;
        self.topic_input.focused = self.focus == Focus::TopicInput;
    }

    /// Pull core-owned values back into the widgets after `update()`.
    fn sync_from(&mut self, form: &FormState) {
        self.prompt.set_text(&form.prompt);
        self.topic_input.set_text(&form.topic_draft);
        self.topic_chips.clamp(form.topics.len());
        if self.focus == Focus::Topics && form.topics.is_empty() {
            self.set_focus(Focus::TopicInput);
        }
    }
}

/// Translates one key event into at most one core action.
///
/// Which keys mean what depends on the call state: the form is only
/// interactive while `Idle`.
pub fn dispatch(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match &app.call {
        CallState::Idle => dispatch_form(app, tui, event),
        CallState::Pending { .. } => match event {
            TuiEvent::Escape => Some(Action::Close),
            _ => None,
        },
        CallState::Succeeded { .. } => match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Close),
            TuiEvent::InputChar('c') => Some(Action::CopyResult),
            TuiEvent::InputChar('r') => Some(Action::Reset),
            _ => {
                tui.result.handle_event(event);
                None
            }
        },
        CallState::Failed { .. } => match event {
            TuiEvent::Escape => Some(Action::Close),
            TuiEvent::Submit => Some(Action::Retry),
            TuiEvent::InputChar('r') => Some(Action::Reset),
            _ => None,
        },
    }
}

fn dispatch_form(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let has_topics = !app.form.topics.is_empty();
    match event {
        TuiEvent::Escape => return Some(Action::Close),
        TuiEvent::Generate => return Some(Action::Submit),
        TuiEvent::NextField => {
            tui.set_focus(tui.focus.step(true, has_topics));
            return None;
        }
        TuiEvent::PrevField => {
            tui.set_focus(tui.focus.step(false, has_topics));
            return None;
        }
        _ => {}
    }

    let focus = tui.focus;
    match focus {
        Focus::Prompt => match tui.prompt.handle_event(event)? {
            FieldEvent::Changed(text) => Some(Action::SetPrompt(text)),
            FieldEvent::Enter => {
                tui.set_focus(focus.step(true, has_topics));
                None
            }
        },
        Focus::Mood | Focus::Length | Focus::Kind => {
            let selector = match focus {
                Focus::Mood => &mut tui.mood,
                Focus::Length => &mut tui.length,
                _ => &mut tui.kind,
            };
            match selector.handle_event(event)? {
                SelectorEvent::Changed(label) => Some(match focus {
                    Focus::Mood => Action::SetMood(label.to_string()),
                    Focus::Length => Action::SetLength(label.to_string()),
                    _ => Action::SetKind(label.to_string()),
                }),
                SelectorEvent::Enter => {
                    tui.set_focus(focus.step(true, has_topics));
                    None
                }
            }
        }
        Focus::Topics => match tui
            .topic_chips
            .handle_event(event, app.form.topics.len())?
        {
            ChipEvent::Remove(index) => Some(Action::RemoveTopic(index)),
        },
        Focus::TopicInput => match tui.topic_input.handle_event(event)? {
            FieldEvent::Changed(text) => Some(Action::SetTopicDraft(text)),
            FieldEvent::Enter => Some(Action::AddTopic(tui.topic_input.buffer.clone())),
        },
        Focus::Generate => match event {
            TuiEvent::Submit => Some(Action::Submit),
            _ => None,
        },
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the generation provider from a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> std::io::Result<Arc<dyn GenerationProvider>> {
    let provider = TrpcProvider::new(
        &config.base_url,
        &config.namespace,
        &config.procedure,
        config.timeout,
    )
    .map_err(std::io::Error::other)?;
    info!("Using {} provider at {}", provider.name(), provider.endpoint_url());
    Ok(Arc::new(provider))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Close,
    Quit,
}

/// Runs the form until the user closes it or quits.
///
/// `on_close` is the host notification: it is called once, after the
/// terminal is restored, when the user dismisses the form. Ctrl+C quits
/// without calling it.
pub fn run<F: FnOnce()>(config: ResolvedConfig, on_close: F) -> std::io::Result<()> {
    let provider = build_provider(&config)?;
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new(&app.form);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the live request
    let mut active_request: Option<AbortHandle> = None;

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut control = LoopControl::Continue;

    while control == LoopControl::Continue {
        let animating = app.call.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let Some(action) = dispatch(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Dispatching {:?}", action);
            let effect = update(&mut app, action);
            tui.sync_from(&app.form);
            control = apply_effect(effect, &app, &mut tui, &mut active_request, &tx);
            if control != LoopControl::Continue {
                break;
            }
        }

        if control != LoopControl::Continue {
            break;
        }

        // Handle background task actions (request results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            control = apply_effect(effect, &app, &mut tui, &mut active_request, &tx);
            if control != LoopControl::Continue {
                break;
            }
        }
    }

    if let Some(handle) = active_request.take() {
        handle.abort();
    }

    ratatui::restore();

    if control == LoopControl::Close {
        info!("Form closed");
        on_close();
    } else {
        info!("Quit without close notification");
    }
    Ok(())
}

fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    active_request: &mut Option<AbortHandle>,
    tx: &mpsc::Sender<Action>,
) -> LoopControl {
    match effect {
        Effect::None => LoopControl::Continue,
        Effect::SpawnRequest {
            request_id,
            payload,
        } => {
            abort_active(active_request);
            tui.result.reset();
            *active_request = Some(spawn_request(
                app.provider.clone(),
                request_id,
                payload,
                tx.clone(),
            ));
            LoopControl::Continue
        }
        Effect::AbortRequest => {
            abort_active(active_request);
            LoopControl::Continue
        }
        Effect::CopyToClipboard(text) => {
            copy_to_clipboard(&text);
            LoopControl::Continue
        }
        Effect::Close => {
            abort_active(active_request);
            LoopControl::Close
        }
        Effect::Quit => LoopControl::Quit,
    }
}

fn abort_active(active_request: &mut Option<AbortHandle>) {
    if let Some(handle) = active_request.take() {
        debug!("Aborting in-flight request task");
        handle.abort();
    }
}

/// Fire-and-forget OSC 52 clipboard write. Failures are only logged.
fn copy_to_clipboard(text: &str) {
    match execute!(stdout(), CopyToClipboard::to_clipboard_from(text)) {
        Ok(()) => info!("Copied {} bytes to clipboard", text.len()),
        Err(e) => warn!("Clipboard write failed: {}", e),
    }
}

fn spawn_request(
    provider: Arc<dyn GenerationProvider>,
    request_id: RequestId,
    payload: RequestPayload,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning generation request {}", request_id);

    let handle = tokio::spawn(async move {
        let outcome = provider.generate(&payload).await;
        if tx
            .send(Action::GenerationFinished {
                request_id,
                outcome,
            })
            .is_err()
        {
            warn!(
                "Failed to deliver result for request {}: receiver dropped",
                request_id
            );
        }
    });

    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DelayedEchoProvider, test_app};

    fn press(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
        match dispatch(app, tui, &event) {
            Some(action) => {
                let effect = update(app, action);
                tui.sync_from(&app.form);
                effect
            }
            None => Effect::None,
        }
    }

    fn type_str(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            press(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_focus_cycle_skips_empty_topics() {
        assert_eq!(Focus::Kind.step(true, false), Focus::TopicInput);
        assert_eq!(Focus::Kind.step(true, true), Focus::Topics);
        assert_eq!(Focus::TopicInput.step(false, false), Focus::Kind);
        assert_eq!(Focus::Generate.step(true, false), Focus::Prompt);
        assert_eq!(Focus::Prompt.step(false, false), Focus::Generate);
    }

    #[test]
    fn test_typing_in_prompt_updates_form() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        type_str(&mut app, &mut tui, "Hello");
        assert_eq!(app.form.prompt, "Hello");
    }

    #[test]
    fn test_selector_updates_form() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        press(&mut app, &mut tui, TuiEvent::NextField);
        assert_eq!(tui.focus, Focus::Mood);
        press(&mut app, &mut tui, TuiEvent::CursorRight);
        assert_eq!(app.form.mood, "😊 Happy");

        press(&mut app, &mut tui, TuiEvent::Submit); // Enter advances
        assert_eq!(tui.focus, Focus::Length);
        press(&mut app, &mut tui, TuiEvent::CursorLeft);
        assert_eq!(app.form.length, "📚 Long");
    }

    #[test]
    fn test_topic_input_adds_and_clears() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        tui.set_focus(Focus::TopicInput);

        type_str(&mut app, &mut tui, "space");
        assert_eq!(app.form.topic_draft, "space");

        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.form.topics.len(), 1);
        assert_eq!(app.form.topics[0].label, "space");
        assert!(tui.topic_input.buffer.is_empty());

        // Enter on an empty draft adds nothing
        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.form.topics.len(), 1);
    }

    #[test]
    fn test_removing_last_chip_moves_focus() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        update(&mut app, Action::AddTopic("space".to_string()));
        tui.set_focus(Focus::Topics);

        press(&mut app, &mut tui, TuiEvent::Backspace);
        assert!(app.form.topics.is_empty());
        assert_eq!(tui.focus, Focus::TopicInput);
    }

    #[test]
    fn test_generate_shortcut_spawns_request() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        let effect = press(&mut app, &mut tui, TuiEvent::Generate);
        assert!(matches!(effect, Effect::SpawnRequest { .. }));
        assert!(app.call.is_pending());
    }

    #[test]
    fn test_form_keys_ignored_while_pending() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        press(&mut app, &mut tui, TuiEvent::Generate);
        type_str(&mut app, &mut tui, "abc");
        assert!(app.form.prompt.is_empty());
        assert_eq!(press(&mut app, &mut tui, TuiEvent::Generate), Effect::None);
        assert_eq!(press(&mut app, &mut tui, TuiEvent::Escape), Effect::Close);
    }

    #[test]
    fn test_result_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        let Effect::SpawnRequest { request_id, .. } = press(&mut app, &mut tui, TuiEvent::Generate)
        else {
            panic!("Expected SpawnRequest");
        };
        update(
            &mut app,
            Action::GenerationFinished {
                request_id,
                outcome: Ok("Hi there".to_string()),
            },
        );

        assert_eq!(
            press(&mut app, &mut tui, TuiEvent::InputChar('c')),
            Effect::CopyToClipboard("Hi there".to_string())
        );
        assert_eq!(press(&mut app, &mut tui, TuiEvent::InputChar('r')), Effect::None);
        assert_eq!(app.call, CallState::Idle);
    }

    #[test]
    fn test_failed_enter_retries() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        let Effect::SpawnRequest { request_id, .. } = press(&mut app, &mut tui, TuiEvent::Generate)
        else {
            panic!("Expected SpawnRequest");
        };
        update(
            &mut app,
            Action::GenerationFinished {
                request_id,
                outcome: Err(crate::generation::GenerationError::MissingValue),
            },
        );

        let effect = press(&mut app, &mut tui, TuiEvent::Submit);
        assert!(matches!(effect, Effect::SpawnRequest { .. }));
    }

    #[test]
    fn test_force_quit_from_any_state() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app.form);
        assert_eq!(press(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    fn delayed_app() -> App {
        App::new(
            Arc::new(DelayedEchoProvider {
                delay: Duration::from_millis(100),
            }),
            "http://test.invalid/api/trpc/event.hello".to_string(),
        )
    }

    fn run_actions(
        app: &mut App,
        tui: &mut TuiState,
        active_request: &mut Option<AbortHandle>,
        tx: &mpsc::Sender<Action>,
        actions: Vec<Action>,
    ) -> LoopControl {
        let mut control = LoopControl::Continue;
        for action in actions {
            let effect = update(app, action);
            control = apply_effect(effect, app, tui, active_request, tx);
        }
        control
    }

    #[tokio::test]
    async fn test_reset_then_resubmit_delivers_only_latest_result() {
        let mut app = delayed_app();
        let mut tui = TuiState::new(&app.form);
        let (tx, rx) = mpsc::channel();
        let mut active_request = None;

        let control = run_actions(
            &mut app,
            &mut tui,
            &mut active_request,
            &tx,
            vec![
                Action::SetPrompt("one".to_string()),
                Action::Submit,
                Action::Reset,
                Action::SetPrompt("two".to_string()),
                Action::Submit,
            ],
        );
        assert_eq!(control, LoopControl::Continue);
        assert!(active_request.is_some());

        tokio::time::sleep(Duration::from_millis(400)).await;

        let messages: Vec<Action> = rx.try_iter().collect();
        assert_eq!(messages.len(), 1);
        for action in messages {
            update(&mut app, action);
        }
        assert_eq!(app.call.result_text(), Some("echo two"));
    }

    #[tokio::test]
    async fn test_close_while_pending_aborts_request() {
        let mut app = delayed_app();
        let mut tui = TuiState::new(&app.form);
        let (tx, rx) = mpsc::channel();
        let mut active_request = None;

        let control = run_actions(
            &mut app,
            &mut tui,
            &mut active_request,
            &tx,
            vec![Action::Submit, Action::Close],
        );
        assert_eq!(control, LoopControl::Close);
        assert!(active_request.is_none());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(rx.try_iter().count(), 0);
    }
}
