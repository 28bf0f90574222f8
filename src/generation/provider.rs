use std::fmt;

use async_trait::async_trait;

use super::types::RequestPayload;

/// Errors that can occur while asking the endpoint for text.
/// Every variant leaves the call in the `Failed` state; the user decides
/// whether to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Provider misconfigured (bad URL, HTTP client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Endpoint answered with a non-success status or an error envelope.
    Api { status: u16, message: String },
    /// Body was not the expected batch array.
    Parse(String),
    /// Body parsed, but `result.data.json.value` was absent.
    MissingValue,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Config(msg) => write!(f, "config error: {msg}"),
            GenerationError::Network(msg) => write!(f, "network error: {msg}"),
            GenerationError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            GenerationError::Parse(msg) => write!(f, "parse error: {msg}"),
            GenerationError::MissingValue => {
                write!(f, "response did not contain generated text")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends one payload and resolves to the generated text.
    async fn generate(&self, payload: &RequestPayload) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GenerationError::Api {
                status: 500,
                message: "boom".to_string()
            }
            .to_string(),
            "API error (HTTP 500): boom"
        );
        assert_eq!(
            GenerationError::Network("refused".to_string()).to_string(),
            "network error: refused"
        );
        assert_eq!(
            GenerationError::MissingValue.to_string(),
            "response did not contain generated text"
        );
    }
}
