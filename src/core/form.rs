//! # Form State
//!
//! Everything the user has typed or picked before pressing Generate.
//!
//! ```text
//! FormState
//! ├── prompt: String          // "Respond to"
//! ├── mood: String            // one of MOOD_OPTIONS (or "")
//! ├── length: String          // one of LENGTH_OPTIONS (or "")
//! ├── kind: String            // one of TYPE_OPTIONS (or ""), sent as "type"
//! ├── topic_draft: String     // "Talk about" input, not yet added
//! └── topics: Vec<TopicTag>   // insertion order
//! ```
//!
//! Setters never validate against the option lists. The selectors in the
//! TUI only ever offer those values.

use log::debug;
use rand::Rng;

use crate::generation::RequestPayload;

pub const MOOD_OPTIONS: [&str; 4] = ["😊 Happy", "🙃 Condescending", "😡 Angry", "🤢 Sickly"];
pub const LENGTH_OPTIONS: [&str; 3] = ["📄 Short", "📕 Medium", "📚 Long"];
pub const TYPE_OPTIONS: [&str; 4] = ["💼 Normal", "📜 Poem", "🎵 Song", "🎨 Story"];

/// A 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random over the full 24-bit range.
    pub fn random() -> Self {
        let [r, g, b]: [u8; 3] = rand::rng().random();
        Self { r, g, b }
    }

    /// `#rrggbb`, always six digits.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived brightness in 0..=255 (ITU-R BT.601 weights).
    pub fn luma(self) -> u8 {
        let luma = 0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b);
        luma.round().clamp(0.0, 255.0) as u8
    }
}

/// A topic the user asked the generator to talk about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTag {
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub prompt: String,
    pub mood: String,
    pub length: String,
    pub kind: String,
    pub topic_draft: String,
    pub topics: Vec<TopicTag>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    pub fn set_mood(&mut self, label: impl Into<String>) {
        self.mood = label.into();
    }

    pub fn set_length(&mut self, label: impl Into<String>) {
        self.length = label.into();
    }

    pub fn set_kind(&mut self, label: impl Into<String>) {
        self.kind = label.into();
    }

    pub fn set_topic_draft(&mut self, text: impl Into<String>) {
        self.topic_draft = text.into();
    }

    /// Appends a topic with a random color and clears the draft.
    ///
    /// Only the exact empty string is rejected; `"  "` is a valid topic.
    /// Returns `true` if a topic was added.
    pub fn add_topic(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let tag = TopicTag {
            label: text.to_string(),
            color: Rgb::random(),
        };
        debug!("Adding topic {:?} ({})", tag.label, tag.color.to_hex());
        self.topics.push(tag);
        self.topic_draft.clear();
        true
    }

    /// Removes the topic at `index`. Out of range is a no-op.
    pub fn remove_topic(&mut self, index: usize) -> Option<TopicTag> {
        if index >= self.topics.len() {
            debug!(
                "Ignoring removal of topic {} (only {} topics)",
                index,
                self.topics.len()
            );
            return None;
        }
        Some(self.topics.remove(index))
    }

    /// Snapshot of the form as sent over the wire. Colors are dropped.
    pub fn payload(&self) -> RequestPayload {
        RequestPayload {
            prompt: self.prompt.clone(),
            mood: self.mood.clone(),
            length: self.length.clone(),
            kind: self.kind.clone(),
            topics: self.topics.iter().map(|t| t.label.clone()).collect(),
        }
    }
}
