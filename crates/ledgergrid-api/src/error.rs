//! Error types for ledgergrid-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ledgergrid_core::{ErrorCode, ErrorDetails, ErrorSeverity, GridError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// A grid operation failed; the body carries its details as JSON
    #[error("{details}")]
    Grid {
        status: StatusCode,
        details: ErrorDetails,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Grid { status, .. } => *status,
        }
    }
}

impl From<GridError> for ApiError {
    fn from(error: GridError) -> Self {
        let status = match error.code() {
            ErrorCode::InvalidField | ErrorCode::InvalidPage => StatusCode::BAD_REQUEST,
            ErrorCode::NotEditable | ErrorCode::NoDraft | ErrorCode::RowBusy => StatusCode::CONFLICT,
            ErrorCode::FetchFailure | ErrorCode::CreateFailure => StatusCode::BAD_GATEWAY,
            ErrorCode::InvalidRecord => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::Grid {
            status,
            details: error.to_details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { .. } => {
                log::debug!(target: "ledgergrid::api", "{}", self);
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            ApiError::Grid { status, details } => {
                match details.severity {
                    ErrorSeverity::Error => log::error!(target: "ledgergrid::api", "{}", details),
                    ErrorSeverity::Warning => log::warn!(target: "ledgergrid::api", "{}", details),
                    ErrorSeverity::Debug => log::debug!(target: "ledgergrid::api", "{}", details),
                }
                (status, Json(details)).into_response()
            }
        }
    }
}
