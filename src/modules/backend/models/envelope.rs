use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{AppError, Result};

/// `status` field of the backend response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// `{ status, data, message? }` envelope wrapping every backend response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Interpret a response body.
    ///
    /// Bodies that are not an envelope (a bare array, an object without a
    /// recognisable `status`) are taken as successful data.
    pub fn from_body(body: Value) -> Self {
        let has_status = body
            .get("status")
            .and_then(Value::as_str)
            .map(|s| matches!(s, "success" | "error"))
            .unwrap_or(false);

        if has_status {
            if let Ok(envelope) = serde_json::from_value::<ApiEnvelope>(body.clone()) {
                return envelope;
            }
        }

        ApiEnvelope {
            status: ApiStatus::Success,
            data: Some(body),
            message: None,
        }
    }

    /// The `data` payload, or a backend error carrying `message`
    pub fn into_data(self) -> Result<Value> {
        match self.status {
            ApiStatus::Success => Ok(self.data.unwrap_or(Value::Null)),
            ApiStatus::Error => Err(AppError::backend(
                self.message
                    .unwrap_or_else(|| "backend reported an error without a message".to_string()),
            )),
        }
    }
}

/// Record objects contained in a `data` payload.
///
/// Accepts an array of records, or an object whose array values hold the
/// records (e.g. `{ "orders": [...], "refunds": [...] }` or per-month
/// buckets). Anything else yields no records.
pub fn extract_records(data: Value) -> Vec<Value> {
    match data {
        Value::Array(records) => records,
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(_, value)| match value {
                Value::Array(records) => Some(records),
                _ => None,
            })
            .flatten()
            .collect(),
        _ => Vec::new(),
    }
}
