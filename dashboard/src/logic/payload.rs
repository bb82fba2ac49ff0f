//! Status Payload - Decoding of `/api/status` responses
//!
//! Absent optional fields decode as empty values, never as errors.
//! The raw `detections` fragment is kept next to the typed list so change
//! detection compares exactly what the service sent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One detected object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    /// Model confidence in [0, 1]
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_dangerous: bool,
    /// Distance hint from the detector: near | medium | far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    /// Horizontal position hint: left | center | right
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Detection {
    #[cfg(test)]
    pub fn new(label: impl Into<String>, confidence: f64, is_dangerous: bool) -> Self {
        Self {
            label: label.into(),
            confidence,
            is_dangerous,
            ..Default::default()
        }
    }

    /// Displayed percentage, `round(confidence * 100)`
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.0).round() as i64
    }
}

/// Decoded status document for one poll tick
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPayload {
    pub status: Option<String>,
    pub detections: Vec<Detection>,
    pub guidance: Option<String>,
    /// `None` when the service does not publish logs at all
    pub logs: Option<Vec<Value>>,
    detections_fragment: Value,
}

impl Default for StatusPayload {
    fn default() -> Self {
        Self {
            status: None,
            detections: Vec::new(),
            guidance: None,
            logs: None,
            detections_fragment: Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Wire shape; both guidance spellings are accepted.
///
/// Optional fields of the wrong type read as absent, so one bad field never
/// turns a reachable service into a failed poll.
#[derive(Debug, Deserialize)]
struct WireStatus {
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default)]
    detections: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    llm_response: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    guidance: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    logs: Option<Vec<Value>>,
}

impl StatusPayload {
    /// Decode a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        if !value.is_object() {
            return Err(DecodeError::NotAnObject(json_kind(&value)));
        }

        let wire: WireStatus = serde_json::from_value(value)?;

        let detections_fragment = match wire.detections {
            Some(Value::Null) | None => Value::Array(Vec::new()),
            Some(v) => v,
        };
        let detections: Vec<Detection> = serde_json::from_value(detections_fragment.clone())?;

        let guidance = [wire.llm_response, wire.guidance]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty());

        Ok(Self {
            status: wire.status,
            detections,
            guidance,
            logs: wire.logs,
            detections_fragment,
        })
    }

    /// The `detections` fragment exactly as received
    pub fn detections_fragment(&self) -> &Value {
        &self.detections_fragment
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            log::debug!("Ignoring malformed optional field: {}", e);
            Ok(None)
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
