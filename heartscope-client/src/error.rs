//! Error types for calls to the prediction service.

/// Fallback message when a failure carries no description at all.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Classified failure of a single gateway call.
///
/// Exactly one variant describes a failed call. The `Display` text is what
/// the health probe reports, so every variant renders a readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutcomeError {
    /// The call did not complete within the configured timeout.
    #[error("Request timed out; the server may be waking up, please wait 30-60 seconds")]
    Timeout,

    /// The request was dispatched but no response was ever received.
    #[error("Unable to connect to the prediction server")]
    ConnectionError,

    /// The server answered with a non-success status.
    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("{message}")]
    UnknownError { message: String },
}

impl OutcomeError {
    /// Build an `UnknownError`, substituting the generic message for an empty one.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        OutcomeError::UnknownError { message }
    }

    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutcomeError::Timeout => "timeout",
            OutcomeError::ConnectionError => "connection_error",
            OutcomeError::ServerError { .. } => "server_error",
            OutcomeError::UnknownError { .. } => "unknown_error",
        }
    }

    /// True when retrying shortly may succeed (slow or unreachable server).
    pub fn is_transient(&self) -> bool {
        matches!(self, OutcomeError::Timeout | OutcomeError::ConnectionError)
    }
}

pub type Result<T> = std::result::Result<T, OutcomeError>;
