//! Mapping from raw transport failures to [`OutcomeError`].

use serde_json::Value;

use crate::error::OutcomeError;

/// What went wrong at the transport level, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// The per-call deadline elapsed.
    TimedOut,
    /// Request dispatched, no response received (DNS, refused, unreachable).
    NoResponse { reason: String },
    /// A response arrived with a non-success status.
    Status { status: u16, body: Option<Value> },
    /// Anything else, e.g. an undecodable success body.
    Other { message: Option<String> },
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        // Timeout first: a connect that times out also reports is_connect().
        if err.is_timeout() {
            TransportFailure::TimedOut
        } else if err.is_connect() || err.is_request() {
            TransportFailure::NoResponse {
                reason: err.to_string(),
            }
        } else {
            TransportFailure::Other {
                message: Some(err.to_string()),
            }
        }
    }
}

/// Classify a transport failure.
pub fn classify(failure: TransportFailure) -> OutcomeError {
    match failure {
        TransportFailure::TimedOut => OutcomeError::Timeout,
        TransportFailure::NoResponse { .. } => OutcomeError::ConnectionError,
        TransportFailure::Status { status, body } => OutcomeError::ServerError {
            status,
            message: body
                .as_ref()
                .and_then(server_message)
                .unwrap_or_else(|| format!("Server error: {}", status)),
        },
        TransportFailure::Other { message } => OutcomeError::unknown(message.unwrap_or_default()),
    }
}

/// Pick the human-readable message out of an error body: `detail` first, then `message`.
fn server_message(body: &Value) -> Option<String> {
    ["detail", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(render_message))
}

fn render_message(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        // FastAPI validation errors: [{"loc": [...], "msg": "...", "type": "..."}]
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };

    if rendered.trim().is_empty() {
        None
    } else {
        Some(rendered)
    }
}
