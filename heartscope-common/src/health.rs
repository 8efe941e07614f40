//! Outcome of the liveness probe.

use serde::{Deserialize, Serialize};

/// Result of `GET /` against the prediction service.
///
/// Serializes as `{"status": "ok", "data": ...}` or
/// `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum HealthStatus {
    /// Service answered with a success status.
    Ok {
        /// Body returned by the service, passed through untouched.
        #[serde(default)]
        data: serde_json::Value,
    },
    /// Probe failed; the message is suitable for display.
    Error { message: String },
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok { .. })
    }
}
