//! Wire types for the batched tRPC-style endpoint.
//!
//! Request (query string, JSON-encoded):
//!
//! ```text
//! ?batch=1&input={"0":{"json":{"prompt":..,"mood":..,"length":..,"type":..,"topics":[..]}}}
//! ```
//!
//! Response body:
//!
//! ```text
//! [{"result":{"data":{"json":{"value":"generated text"}}}}]
//! [{"error":{"json":{"message":"..","code":-32603}}}]
//! ```

use serde::{Deserialize, Serialize};

/// What gets sent for one generation. Built from `FormState::payload()`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPayload {
    pub prompt: String,
    pub mood: String,
    pub length: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub topics: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonEnvelope<T> {
    pub json: T,
}

/// `{"0": {"json": payload}}`: a batch of exactly one call.
#[derive(Serialize, Debug)]
pub struct BatchInput<'a> {
    #[serde(rename = "0")]
    pub first: JsonEnvelope<&'a RequestPayload>,
}

impl<'a> BatchInput<'a> {
    pub fn single(payload: &'a RequestPayload) -> Self {
        Self {
            first: JsonEnvelope { json: payload },
        }
    }
}

/// One element of the response array. Either side may be missing.
#[derive(Deserialize, Debug)]
pub struct BatchItem {
    #[serde(default)]
    pub result: Option<BatchResult>,
    #[serde(default)]
    pub error: Option<BatchError>,
}

#[derive(Deserialize, Debug)]
pub struct BatchResult {
    #[serde(default)]
    pub data: Option<BatchData>,
}

#[derive(Deserialize, Debug)]
pub struct BatchData {
    #[serde(default)]
    pub json: Option<GeneratedValue>,
}

#[derive(Deserialize, Debug)]
pub struct GeneratedValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct BatchError {
    #[serde(default)]
    pub json: Option<ErrorBody>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl BatchItem {
    /// `result.data.json.value`, if every level is present.
    pub fn value(&self) -> Option<&str> {
        self.result
            .as_ref()?
            .data
            .as_ref()?
            .json
            .as_ref()?
            .value
            .as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref()?.json.as_ref()?.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> RequestPayload {
        RequestPayload {
            prompt: "Hello".to_string(),
            mood: "😊 Happy".to_string(),
            length: "📄 Short".to_string(),
            kind: "💼 Normal".to_string(),
            topics: vec!["space".to_string()],
        }
    }

    #[test]
    fn test_payload_uses_type_key() {
        let json = serde_json::to_value(sample_payload()).unwrap();
        assert_eq!(json["type"], "💼 Normal");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_batch_input_shape() {
        let payload = sample_payload();
        let json = serde_json::to_value(BatchInput::single(&payload)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "0": {
                    "json": {
                        "prompt": "Hello",
                        "mood": "😊 Happy",
                        "length": "📄 Short",
                        "type": "💼 Normal",
                        "topics": ["space"]
                    }
                }
            })
        );
    }

    #[test]
    fn test_batch_item_value_present() {
        let items: Vec<BatchItem> =
            serde_json::from_str(r#"[{"result":{"data":{"json":{"value":"Hi there"}}}}]"#)
                .unwrap();
        assert_eq!(items[0].value(), Some("Hi there"));
    }

    #[test]
    fn test_batch_item_value_missing_at_each_level() {
        for body in [
            r#"[{}]"#,
            r#"[{"result":{}}]"#,
            r#"[{"result":{"data":{}}}]"#,
            r#"[{"result":{"data":{"json":{}}}}]"#,
        ] {
            let items: Vec<BatchItem> = serde_json::from_str(body).unwrap();
            assert_eq!(items[0].value(), None, "body: {body}");
        }
    }

    #[test]
    fn test_batch_item_error_message() {
        let items: Vec<BatchItem> = serde_json::from_str(
            r#"[{"error":{"json":{"message":"Input validation failed","code":-32600}}}]"#,
        )
        .unwrap();
        assert_eq!(items[0].error_message(), Some("Input validation failed"));
        assert_eq!(items[0].value(), None);
    }
}
