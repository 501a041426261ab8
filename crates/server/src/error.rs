//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error responses are JSON: `{ "kind": "...", "message": "..." }`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{AddressError, QuoteError, SellerError, UpstreamFailure};

/// Application-level error type for the delivery API.
#[derive(Debug, Error)]
pub enum AppError {
    /// CEP validation, lookup or fee quoting failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// Seller operation failed.
    #[error(transparent)]
    Seller(#[from] SellerError),

    /// Address operation failed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Malformed request body or path parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Response classification shared by `status` and `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    Validation,
    Conflict,
    NotFound,
    UpstreamTimeout,
    Upstream,
    Internal,
}

impl AppError {
    const fn class(&self) -> ErrorClass {
        match self {
            Self::Quote(e) | Self::Address(AddressError::Resolve(e)) => match e {
                QuoteError::Validation => ErrorClass::Validation,
                QuoteError::NotFound => ErrorClass::NotFound,
                QuoteError::Upstream(lookup) => match lookup.failure() {
                    UpstreamFailure::Timeout => ErrorClass::UpstreamTimeout,
                    _ => ErrorClass::Upstream,
                },
            },
            Self::Address(AddressError::MissingNumber) | Self::BadRequest(_) => {
                ErrorClass::Validation
            }
            Self::Seller(e) if e.is_validation() => ErrorClass::Validation,
            Self::Seller(e) if e.is_conflict() => ErrorClass::Conflict,
            Self::Seller(SellerError::NotFound) => ErrorClass::NotFound,
            Self::Seller(_) | Self::Address(AddressError::Register(_) | AddressError::List(_)) => {
                ErrorClass::Internal
            }
        }
    }

    /// HTTP status for this error. Conflicts are reported as 400.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.class() {
            ErrorClass::Validation | ErrorClass::Conflict => StatusCode::BAD_REQUEST,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorClass::Upstream => StatusCode::BAD_GATEWAY,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self.class() {
            ErrorClass::Validation => "validation",
            ErrorClass::Conflict => "conflict",
            ErrorClass::NotFound => "not_found",
            ErrorClass::UpstreamTimeout => "upstream_timeout",
            ErrorClass::Upstream => "upstream",
            ErrorClass::Internal => "internal",
        }
    }

    /// Client-facing message. Upstream details are never exposed; seller and
    /// address server-side errors already carry fixed, detail-free messages.
    fn public_message(&self) -> String {
        match self.class() {
            ErrorClass::Upstream | ErrorClass::UpstreamTimeout => {
                "Address lookup service unavailable.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                error_kind = self.kind(),
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            kind: self.kind(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
