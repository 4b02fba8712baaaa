//! Generated day summary model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A server-generated per-day diary aggregate.
///
/// The payload is kept as-is; the client only reorders lists of summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiarySummary(Value);

impl DiarySummary {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Day the summary covers, when the server includes a `date` field.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.0.get("date").and_then(Value::as_str)
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for DiarySummary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
