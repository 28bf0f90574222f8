//! # Actions
//!
//! Everything that can happen in Responder becomes an `Action`.
//! User presses Generate? That's `Action::Submit`.
//! Endpoint answers? That's `Action::GenerationFinished { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing the I/O the adapter must perform.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Call lifecycle:
//!
//! ```text
//! Idle ──Submit──▶ Pending ──Ok──▶ Succeeded ──Reset──▶ Idle
//!                   │  ▲
//!                  Err Retry
//!                   ▼  │
//!                  Failed ──Reset──▶ Idle
//! ```

use chrono::Local;
use log::{debug, info, warn};

use crate::core::state::{App, CallState, RequestId};
use crate::generation::{GenerationError, RequestPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPrompt(String),
    SetMood(String),
    SetLength(String),
    SetKind(String),
    SetTopicDraft(String),
    AddTopic(String),
    RemoveTopic(usize),
    Submit,
    Retry,
    GenerationFinished {
        request_id: RequestId,
        outcome: Result<String, GenerationError>,
    },
    Reset,
    CopyResult,
    Close,
    Quit,
}

/// I/O requested by `update()`. Performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest {
        request_id: RequestId,
        payload: RequestPayload,
    },
    AbortRequest,
    CopyToClipboard(String),
    Close,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SetPrompt(text) => {
            app.form.set_prompt(text);
            Effect::None
        }
        Action::SetMood(label) => {
            app.form.set_mood(label);
            Effect::None
        }
        Action::SetLength(label) => {
            app.form.set_length(label);
            Effect::None
        }
        Action::SetKind(label) => {
            app.form.set_kind(label);
            Effect::None
        }
        Action::SetTopicDraft(text) => {
            app.form.set_topic_draft(text);
            Effect::None
        }
        Action::AddTopic(text) => {
            if app.form.add_topic(&text) {
                app.status_message = format!("Added topic: {text}");
            }
            Effect::None
        }
        Action::RemoveTopic(index) => {
            if let Some(tag) = app.form.remove_topic(index) {
                app.status_message = format!("Removed topic: {}", tag.label);
            }
            Effect::None
        }
        Action::Submit => match app.call {
            CallState::Idle | CallState::Failed { .. } => start_request(app),
            _ => {
                debug!("Ignoring Submit while {:?}", app.call);
                Effect::None
            }
        },
        Action::Retry => match app.call {
            CallState::Failed { .. } => start_request(app),
            _ => {
                debug!("Ignoring Retry while {:?}", app.call);
                Effect::None
            }
        },
        Action::GenerationFinished {
            request_id,
            outcome,
        } => finish_request(app, request_id, outcome),
        Action::Reset => {
            let was_pending = app.call.is_pending();
            info!("Reset from {}", state_name(&app.call));
            app.call = CallState::Idle;
            app.status_message = String::from("Ready");
            if was_pending {
                Effect::AbortRequest
            } else {
                Effect::None
            }
        }
        Action::CopyResult => {
            let text = app.call.result_text().unwrap_or_default().to_string();
            app.status_message = String::from("Copied to clipboard");
            Effect::CopyToClipboard(text)
        }
        Action::Close => {
            info!("Close requested from {}", state_name(&app.call));
            Effect::Close
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_request(app: &mut App) -> Effect {
    let request_id = RequestId::new_v4();
    let payload = app.form.payload();
    info!(
        "Submitting request {} ({} topics)",
        request_id,
        payload.topics.len()
    );
    app.call = CallState::Pending {
        request_id,
        started_at: Local::now(),
    };
    app.status_message = String::from("Generating...");
    Effect::SpawnRequest {
        request_id,
        payload,
    }
}

fn finish_request(
    app: &mut App,
    request_id: RequestId,
    outcome: Result<String, GenerationError>,
) -> Effect {
    let started_at = match &app.call {
        CallState::Pending {
            request_id: current,
            started_at,
        } if *current == request_id => *started_at,
        _ => {
            warn!(
                "Discarding stale response for request {} (call is {})",
                request_id,
                state_name(&app.call)
            );
            return Effect::None;
        }
    };

    match outcome {
        Ok(text) => {
            let generated_at = Local::now();
            let elapsed_ms = (generated_at - started_at).num_milliseconds();
            info!(
                "Request {} succeeded in {}ms ({} bytes)",
                request_id,
                elapsed_ms,
                text.len()
            );
            app.call = CallState::Succeeded {
                text,
                generated_at,
                elapsed_ms,
            };
            app.status_message = String::from("Done");
        }
        Err(error) => {
            warn!("Request {} failed: {}", request_id, error);
            app.status_message = String::from("Generation failed");
            app.call = CallState::Failed { error };
        }
    }
    Effect::None
}

fn state_name(call: &CallState) -> &'static str {
    match call {
        CallState::Idle => "Idle",
        CallState::Pending { .. } => "Pending",
        CallState::Succeeded { .. } => "Succeeded",
        CallState::Failed { .. } => "Failed",
    }
}
