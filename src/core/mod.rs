//! # Core Application Logic
//!
//! This module contains Responder's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • FormState (input)    │
//!                    │  • CallState (request)  │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │ Generation │
//!          │  Adapter   │                │  Provider  │
//!          │ (ratatui)  │                │ (reqwest)  │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`form`]: `FormState` and `TopicTag`, the Input Collector
//! - [`state`]: The `App` struct and `CallState`
//! - [`action`]: The `Action` enum, `Effect` enum and `update()`
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod form;
pub mod state;
