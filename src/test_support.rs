//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::generation::{GenerationError, GenerationProvider, RequestPayload};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl GenerationProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn generate(&self, _payload: &RequestPayload) -> Result<String, GenerationError> {
        Ok(String::new())
    }
}

/// Creates a test App with a NoopProvider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(NoopProvider),
        "http://test.invalid/api/trpc/event.hello".to_string(),
    )
}

/// Answers `echo <prompt>` after a delay, so requests can be superseded
/// while still in flight.
pub struct DelayedEchoProvider {
    pub delay: std::time::Duration,
}

#[async_trait]
impl GenerationProvider for DelayedEchoProvider {
    fn name(&self) -> &str {
        "delayed-echo"
    }

    async fn generate(&self, payload: &RequestPayload) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(format!("echo {}", payload.prompt))
    }
}
