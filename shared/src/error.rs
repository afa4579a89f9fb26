//! Error types shared by every remote call the dashboard makes.

use thiserror::Error;

/// Failure of a request against the notification service API.
///
/// The dashboard never distinguishes these at the UI boundary beyond logging
/// them; the variants exist so the log line says what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Stable code for log lines.
    pub fn code(&self) -> String {
        match self {
            Self::Network(_) => "NETWORK_ERROR".to_string(),
            Self::Status { status, .. } => format!("HTTP_{}", status),
            Self::Decode(_) => "PARSE_ERROR".to_string(),
            Self::Encode(_) => "SERIALIZE_ERROR".to_string(),
        }
    }

    /// The service rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_failure_kind() {
        assert_eq!(ApiError::Network("offline".into()).code(), "NETWORK_ERROR");
        assert_eq!(ApiError::status(404, "missing").code(), "HTTP_404");
        assert_eq!(ApiError::Decode("eof".into()).code(), "PARSE_ERROR");
        assert_eq!(ApiError::Encode("nan".into()).code(), "SERIALIZE_ERROR");
    }

    #[test]
    fn only_401_counts_as_unauthorized() {
        assert!(ApiError::status(401, "expired").is_unauthorized());
        assert!(!ApiError::status(403, "forbidden").is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }
}
