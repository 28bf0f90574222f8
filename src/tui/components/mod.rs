//! # TUI Components
//!
//! All UI components for the terminal form.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Header`: top bar with status and close hint
//! - `Loader`: spinner shown while a request is pending
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `TextField`: single-line input (prompt, topic draft)
//! - `Selector`: cycles through a fixed option list
//! - `TopicChipsState` / `TopicChips`: colored topic chips with removal
//! - `ResultViewState` / `ResultView`: scrollable generated text
//!
//! Each component file holds its state, events, rendering and tests.
//! Components receive external data as props rather than reading `App`
//! directly, so the dependency is visible at the call site:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TopicChips::new(&app.form.topics, &tui.topic_chips, focused).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (top bar)
//! ├── loader.rs        (pending spinner)
//! ├── result_view.rs   (generated text)
//! ├── selector.rs      (mood / length / type)
//! ├── text_field.rs    (prompt, topic draft)
//! └── topic_chips.rs   (topic list)
//! ```

pub mod header;
pub mod loader;
pub mod result_view;
pub mod selector;
pub mod text_field;
pub mod topic_chips;

pub use header::Header;
pub use loader::Loader;
pub use result_view::{ResultView, ResultViewState};
pub use selector::{Selector, SelectorEvent};
pub use text_field::{FieldEvent, TextField};
pub use topic_chips::{ChipEvent, TopicChips, TopicChipsState};
