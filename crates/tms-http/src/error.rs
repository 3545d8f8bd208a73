// tms-http/src/error.rs
// ============================================================================
// Module: TMS API Errors
// Description: Mapping of engine, decode, and auth failures onto HTTP.
// Purpose: Give every failure one status code, one body shape, one log line.
// Dependencies: tms-core, axum, tracing
// ============================================================================

//! ## Overview
//! [`ApiError`] is the only error type handlers return. Lookup and creation
//! failures keep the engine's message; anything unexpected is logged in full
//! and surfaced as a generic message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;
use tms_core::PackServiceError;
use tms_core::ValidationErrors;
use tracing::error;
use tracing::warn;

use crate::api::ErrorResponse;
use crate::auth::AuthError;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Body message for unexpected failures.
pub const UNEXPECTED_EXCEPTION_OCCURRED: &str = "Unexpected exception occurred";

/// Body message for rejected creation requests.
pub const INVALID_CREATION_REQUEST: &str = "Translation pack creation request is invalid";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures surfaced by REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No pack is stored under the requested id.
    #[error("{0}")]
    NotFound(String),
    /// The pack could not be created.
    #[error("{0}")]
    Conflict(String),
    /// The creation request failed validation.
    #[error("Translation pack creation request is invalid: {0}")]
    Validation(ValidationErrors),
    /// The request could not be decoded.
    #[error("{message}")]
    Rejected {
        /// Status to respond with.
        status: StatusCode,
        /// Client-facing message.
        message: String,
    },
    /// Missing or invalid credentials.
    #[error("unauthenticated")]
    Unauthenticated(String),
    /// Credentials lack the needed scope.
    #[error("unauthorized")]
    Unauthorized(String),
    /// Any other failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Builds a 400 rejection.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Rejected {
                status, ..
            } => *status,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PackServiceError> for ApiError {
    fn from(err: PackServiceError) -> Self {
        match err {
            PackServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            PackServiceError::CreationFailed(_) => Self::Conflict(err.to_string()),
            PackServiceError::ValidationFailed(errors) => Self::Validation(errors),
            PackServiceError::Store(store) => Self::Internal(store.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(reason) => Self::Unauthenticated(reason),
            AuthError::Unauthorized(reason) => Self::Unauthorized(reason),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::NotFound(message) => {
                warn!(error = %message, "failed to retrieve translation pack");
                ErrorResponse::message(message.clone())
            }
            Self::Conflict(message) => {
                warn!(error = %message, "failed to store translation pack");
                ErrorResponse::message(message.clone())
            }
            Self::Validation(errors) => {
                warn!(fields = %errors, "failed to validate translation pack creation request");
                ErrorResponse::validation(INVALID_CREATION_REQUEST, errors)
            }
            Self::Rejected {
                message, ..
            } => {
                warn!(status = status.as_u16(), error = %message, "request rejected");
                ErrorResponse::message(message.clone())
            }
            Self::Unauthenticated(reason) | Self::Unauthorized(reason) => {
                warn!(status = status.as_u16(), reason = %reason, "request denied");
                ErrorResponse::message(self.to_string())
            }
            Self::Internal(message) => {
                error!(error = %message, "unexpected failure while handling request");
                ErrorResponse::message(UNEXPECTED_EXCEPTION_OCCURRED)
            }
        };
        let mut response = (status, Json(body)).into_response();
        if matches!(self, Self::Unauthenticated(_)) {
            response.headers_mut().insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
