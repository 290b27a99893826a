//! Error types for ledgergrid-rpc

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status codes reported by the record-storage service (gRPC numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    InvalidArgument = 3,
    NotFound = 5,
    AlreadyExists = 6,
    Internal = 13,
    Unavailable = 14,
}

impl StatusCode {
    /// Numeric value as carried on the wire
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            StatusCode::NotFound => write!(f, "NOT_FOUND"),
            StatusCode::AlreadyExists => write!(f, "ALREADY_EXISTS"),
            StatusCode::Internal => write!(f, "INTERNAL"),
            StatusCode::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

/// Transport-level failure of a remote call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortError {
    #[error("{message}")]
    Status { code: StatusCode, message: String },

    #[error("empty response")]
    EmptyResponse,
}

impl PortError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PortError::Status {
            code: StatusCode::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        PortError::Status {
            code: StatusCode::AlreadyExists,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Status {
            code: StatusCode::Unavailable,
            message: message.into(),
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Numeric status code; an empty response counts as `UNAVAILABLE`
    pub fn status(&self) -> u32 {
        match self {
            PortError::Status { code, .. } => code.as_u32(),
            PortError::EmptyResponse => StatusCode::Unavailable.as_u32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_numbers() {
        assert_eq!(StatusCode::InvalidArgument.as_u32(), 3);
        assert_eq!(StatusCode::AlreadyExists.as_u32(), 6);
        assert_eq!(PortError::EmptyResponse.status(), 14);
    }

    #[test]
    fn test_message_is_bare_text() {
        let err = PortError::unavailable("unavailable");
        assert_eq!(err.message(), "unavailable");
        assert_eq!(err.status(), 14);
    }
}
