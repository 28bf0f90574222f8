//! # Application State
//!
//! Core business state for Responder. Domain logic only - no TUI-specific
//! types. Presentation state (focus, cursors, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn GenerationProvider>  // where requests go
//! ├── endpoint: String                       // shown in the header
//! ├── form: FormState                        // user input
//! ├── call: CallState                        // Idle | Pending | Succeeded | Failed
//! └── status_message: String                 // header status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::form::{FormState, LENGTH_OPTIONS, MOOD_OPTIONS, TYPE_OPTIONS};
use crate::generation::{GenerationError, GenerationProvider};

/// Identifies one submission. Only the id held by `CallState::Pending` may
/// resolve the call.
pub type RequestId = uuid::Uuid;

/// Lifecycle of the single generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum CallState {
    Idle,
    Pending {
        request_id: RequestId,
        started_at: DateTime<Local>,
    },
    Succeeded {
        text: String,
        generated_at: DateTime<Local>,
        elapsed_ms: i64,
    },
    Failed {
        error: GenerationError,
    },
}

impl CallState {
    pub fn is_pending(&self) -> bool {
        matches!(self, CallState::Pending { .. })
    }

    /// Generated text, if the last call succeeded.
    pub fn result_text(&self) -> Option<&str> {
        match self {
            CallState::Succeeded { text, .. } => Some(text),
            _ => None,
        }
    }
}

pub struct App {
    pub provider: Arc<dyn GenerationProvider>,
    pub endpoint: String,
    pub form: FormState,
    pub call: CallState,
    pub status_message: String,
}

impl App {
    pub fn new(provider: Arc<dyn GenerationProvider>, endpoint: String) -> Self {
        Self {
            provider,
            endpoint,
            form: FormState::new(),
            call: CallState::Idle,
            status_message: String::from("Fill in the form and press Generate"),
        }
    }

    /// Builds the app and pre-selects any configured selector defaults.
    pub fn from_config(provider: Arc<dyn GenerationProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider, config.endpoint_url());
        if let Some(mood) = valid_default("mood", config.default_mood.as_deref(), &MOOD_OPTIONS) {
            app.form.set_mood(mood);
        }
        if let Some(length) =
            valid_default("length", config.default_length.as_deref(), &LENGTH_OPTIONS)
        {
            app.form.set_length(length);
        }
        if let Some(kind) = valid_default("type", config.default_type.as_deref(), &TYPE_OPTIONS) {
            app.form.set_kind(kind);
        }
        app
    }
}

fn valid_default<'a>(field: &str, value: Option<&'a str>, options: &[&str]) -> Option<&'a str> {
    let value = value?;
    if options.contains(&value) {
        info!("Default {} from config: {}", field, value);
        Some(value)
    } else {
        warn!(
            "Ignoring configured default {} {:?}: not one of {:?}",
            field, value, options
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ResponderConfig, resolve};
    use crate::test_support::{NoopProvider, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.call, CallState::Idle);
        assert_eq!(app.form, FormState::default());
        assert_eq!(app.endpoint, "http://test.invalid/api/trpc/event.hello");
    }

    #[test]
    fn test_from_config_applies_valid_defaults() {
        let mut config = resolve(&ResponderConfig::default(), &Default::default());
        config.default_mood = Some("😡 Angry".to_string());
        config.default_length = Some("not a length".to_string());
        config.default_type = Some("🎵 Song".to_string());

        let app = App::from_config(Arc::new(NoopProvider), &config);
        assert_eq!(app.form.mood, "😡 Angry");
        assert_eq!(app.form.length, "");
        assert_eq!(app.form.kind, "🎵 Song");
    }

    #[test]
    fn test_result_text_only_when_succeeded() {
        assert_eq!(CallState::Idle.result_text(), None);
        let done = CallState::Succeeded {
            text: "Hi".to_string(),
            generated_at: Local::now(),
            elapsed_ms: 5,
        };
        assert_eq!(done.result_text(), Some("Hi"));
        assert!(!done.is_pending());
    }
}
