//! Axum-specific error types and mappings.
//!
//! This module provides the error type for the Axum adapter and mappings
//! from `ConvertError` and extractor rejections to HTTP status codes and
//! JSON response bodies.

use axum::extract::rejection::{QueryRejection, StringRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nest_core::ConvertError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeds the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Conversion failed; carries the converter's error category.
    #[error("{message}")]
    Conversion {
        status: StatusCode,
        category: &'static str,
        message: String,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<String>,
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Conversion { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, error_type) = match self {
            Self::BadRequest(msg) => (msg, Some("BAD_REQUEST".to_string())),
            Self::PayloadTooLarge(msg) => (msg, Some("PAYLOAD_TOO_LARGE".to_string())),
            Self::Conversion {
                category, message, ..
            } => (message, Some(category.to_string())),
            Self::Internal(msg) => (msg, None),
        };

        if status.is_server_error() {
            tracing::error!(target: "nest.http", status = status.as_u16(), "{}", message);
        } else {
            tracing::debug!(target: "nest.http", status = status.as_u16(), "{}", message);
        }

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            error_type,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ConvertError> for HttpError {
    fn from(err: ConvertError) -> Self {
        let status = match &err {
            ConvertError::DuplicateNodesFound(_) => StatusCode::CONFLICT,
            e if e.is_input_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::Conversion {
            status,
            category: err.category(),
            message: err.to_string(),
        }
    }
}

impl From<StringRejection> for HttpError {
    fn from(rejection: StringRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
