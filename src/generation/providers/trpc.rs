//! Provider for a tRPC-style batched query procedure.
//!
//! The whole payload travels in the query string of a single GET:
//! `{base_url}/api/{namespace}/{procedure}?batch=1&input=<json>`.
//! The answer is a one-element array; anything that does not carry
//! `result.data.json.value` is reported as an error.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::generation::types::{BatchInput, BatchItem, RequestPayload};
use crate::generation::{GenerationError, GenerationProvider};

pub struct TrpcProvider {
    endpoint_url: String,
    client: reqwest::Client,
}

impl TrpcProvider {
    /// # Arguments
    /// * `base_url` - Server origin, e.g. `http://localhost:3000`
    /// * `namespace` - Path segment after `/api/`, usually `trpc`
    /// * `procedure` - Dotted procedure name, e.g. `event.hello`
    /// * `timeout` - Whole-request timeout
    pub fn new(
        base_url: &str,
        namespace: &str,
        procedure: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Config(e.to_string()))?;

        Ok(Self {
            endpoint_url: endpoint_url(base_url, namespace, procedure),
            client,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

/// `{base_url}/api/{namespace}/{procedure}`, tolerant of stray slashes.
pub fn endpoint_url(base_url: &str, namespace: &str, procedure: &str) -> String {
    format!(
        "{}/api/{}/{}",
        base_url.trim_end_matches('/'),
        namespace.trim_matches('/'),
        procedure
    )
}

/// Turns a response body into generated text.
///
/// Non-success statuses become `Api`, using the tRPC error message when the
/// body carries one.
fn parse_batch_response(status: u16, body: &str) -> Result<String, GenerationError> {
    let parsed = serde_json::from_str::<Vec<BatchItem>>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|items| {
                items
                    .first()
                    .and_then(|item| item.error_message().map(str::to_string))
            })
            .unwrap_or_else(|| body.to_string());
        return Err(GenerationError::Api { status, message });
    }

    let items = parsed.map_err(|e| GenerationError::Parse(e.to_string()))?;
    let first = items.first().ok_or(GenerationError::MissingValue)?;

    if let Some(value) = first.value() {
        return Ok(value.to_string());
    }

    // A 2xx batch can still carry a per-call error (HTTP 207 multi-status)
    if let Some(error) = first.error.as_ref().and_then(|e| e.json.as_ref()) {
        warn!("Endpoint returned error envelope (code={:?})", error.code);
        return Err(GenerationError::Api {
            status,
            message: error
                .message
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    Err(GenerationError::MissingValue)
}

#[async_trait]
impl GenerationProvider for TrpcProvider {
    fn name(&self) -> &str {
        "trpc"
    }

    async fn generate(&self, payload: &RequestPayload) -> Result<String, GenerationError> {
        let input = serde_json::to_string(&BatchInput::single(payload))
            .map_err(|e| GenerationError::Parse(format!("Request serialization failed: {e}")))?;

        info!(
            "Generation request: url={}, topics={}",
            self.endpoint_url,
            payload.topics.len()
        );
        debug!("Raw batch input: {}", input);

        let response = self
            .client
            .get(&self.endpoint_url)
            .query(&[("batch", "1"), ("input", input.as_str())])
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Generation response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;
        debug!("Raw response body: {}", body);

        let result = parse_batch_response(status, &body);
        match &result {
            Ok(text) => info!("Generation complete: {} bytes", text.len()),
            Err(e) => warn!("Generation failed: {}", e),
        }
        result
    }
}
