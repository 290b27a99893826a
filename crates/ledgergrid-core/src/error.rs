//! Error types for ledgergrid-core
//!
//! Grid failures fall into three groups: fetch failures (the window keeps
//! its last good page), create failures (the draft stays editable) and
//! invalid grid operations (rejected without touching state).

use ledgergrid_rpc::PortError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// List call failed
    FetchFailure,
    /// Create call failed
    CreateFailure,
    /// Server sent a record the grid cannot represent
    InvalidRecord,
    /// Field value rejected by its edit type
    InvalidField,
    /// Page request outside the allowed range
    InvalidPage,
    /// Row cannot be edited
    NotEditable,
    /// No draft row exists
    NoDraft,
    /// Draft already has a save in flight
    RowBusy,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FetchFailure => write!(f, "FETCH_FAILURE"),
            ErrorCode::CreateFailure => write!(f, "CREATE_FAILURE"),
            ErrorCode::InvalidRecord => write!(f, "INVALID_RECORD"),
            ErrorCode::InvalidField => write!(f, "INVALID_FIELD"),
            ErrorCode::InvalidPage => write!(f, "INVALID_PAGE"),
            ErrorCode::NotEditable => write!(f, "NOT_EDITABLE"),
            ErrorCode::NoDraft => write!(f, "NO_DRAFT"),
            ErrorCode::RowBusy => write!(f, "ROW_BUSY"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Debug information
    Debug,
    /// Warning - operation did not take effect, state is intact
    Warning,
    /// Error - operation failed and the user should be told
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub severity: ErrorSeverity,
    pub message: String,
    /// Remote status code, when the error came from the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, severity: ErrorSeverity, message: String) -> Self {
        Self {
            code,
            severity,
            message,
            status: None,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_status(mut self, status: u32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.severity, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (status {})", status)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for ledgergrid-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("{message}")]
    FetchFailure { message: String, status: u32 },

    #[error("{message}")]
    CreateFailure { message: String, status: u32 },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid page: {message}")]
    InvalidPage { message: String },

    #[error("Row {key} is not editable")]
    NotEditable { key: String },

    #[error("No draft row")]
    NoDraft,

    #[error("Row {key} already has a save in flight")]
    RowBusy { key: String },
}

impl GridError {
    pub fn fetch(error: &PortError) -> Self {
        GridError::FetchFailure {
            message: error.message(),
            status: error.status(),
        }
    }

    pub fn create(error: &PortError) -> Self {
        GridError::CreateFailure {
            message: error.message(),
            status: error.status(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            GridError::FetchFailure { .. } => ErrorCode::FetchFailure,
            GridError::CreateFailure { .. } => ErrorCode::CreateFailure,
            GridError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            GridError::InvalidField { .. } => ErrorCode::InvalidField,
            GridError::InvalidPage { .. } => ErrorCode::InvalidPage,
            GridError::NotEditable { .. } => ErrorCode::NotEditable,
            GridError::NoDraft => ErrorCode::NoDraft,
            GridError::RowBusy { .. } => ErrorCode::RowBusy,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GridError::FetchFailure { .. } => ErrorSeverity::Warning,
            GridError::CreateFailure { .. } => ErrorSeverity::Error,
            GridError::InvalidRecord { .. } => ErrorSeverity::Error,
            GridError::InvalidField { .. } => ErrorSeverity::Error,
            GridError::InvalidPage { .. } => ErrorSeverity::Warning,
            GridError::NotEditable { .. } => ErrorSeverity::Debug,
            GridError::NoDraft => ErrorSeverity::Debug,
            GridError::RowBusy { .. } => ErrorSeverity::Debug,
        }
    }

    /// Remote status code, if the failure came from the service
    pub fn status(&self) -> Option<u32> {
        match self {
            GridError::FetchFailure { status, .. } | GridError::CreateFailure { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.severity(), self.to_string());
        if let Some(status) = self.status() {
            details = details.with_status(status);
        }

        match self {
            GridError::FetchFailure { .. } => {
                details = details.with_suggestion(
                    "The last loaded page is still shown; change page to retry.".to_string(),
                );
            }
            GridError::CreateFailure { .. } => {
                details = details.with_suggestion(
                    "The new row is still editable; correct it and save again.".to_string(),
                );
            }
            GridError::InvalidField { field, .. } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with GridError
pub type GridResult<T> = Result<T, GridError>;
