//! Boundary result type rendered for every operation

use crate::error::{ErrorKind, SprintboardError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of an operation as reported to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// Canonical op string
    pub op: String,

    /// Whether the operation succeeded
    pub ok: bool,

    /// The response payload (if successful)
    pub data: Value,

    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error classification (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,

    /// How long the operation took
    pub duration_ms: u64,
}

impl OperationResult {
    /// Create a successful result
    pub fn success(op: impl Into<String>, data: Value, duration_ms: u64) -> Self {
        Self {
            op: op.into(),
            ok: true,
            data,
            error: None,
            kind: None,
            duration_ms,
        }
    }

    /// Create a failed result from an error
    pub fn failure(op: impl Into<String>, error: &SprintboardError, duration_ms: u64) -> Self {
        Self {
            op: op.into(),
            ok: false,
            data: Value::Null,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
            duration_ms,
        }
    }

    /// Get the ID from the data if present
    pub fn get_id(&self) -> Option<&str> {
        self.data.get("id").and_then(|v| v.as_str())
    }
}
