//! Error types for the duty list service.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system. Every error renders as
//! `{"error": "<message>"}`; server-side failures render a fixed
//! message and log the underlying cause instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

/// Public message for store and infrastructure failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Public message for a failed listing.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching todos";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Validation errors
    #[error("Invalid Duty ID")]
    InvalidId,

    #[error("Duty name is required and should not be empty")]
    EmptyName,

    #[error("Duty name must be at most {max} characters")]
    NameTooLong { max: usize },

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Store errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to fetch duties: {0}")]
    FetchFailed(#[source] sqlx::Error),

    // Client errors
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(String),

    // Generic errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400
            Self::InvalidId | Self::EmptyName | Self::NameTooLong { .. } => {
                StatusCode::BAD_REQUEST
            }

            // 404
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            // 502
            Self::Api { .. } | Self::Http(_) => StatusCode::BAD_GATEWAY,

            // 500
            Self::Database(_) | Self::FetchFailed(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidId => "INVALID_ID",
            Self::EmptyName => "EMPTY_NAME",
            Self::NameTooLong { .. } => "NAME_TOO_LONG",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::FetchFailed(_) => "FETCH_FAILED",
            Self::Api { .. } => "API_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message placed in the response body.
    ///
    /// Server-side failures never expose their cause.
    pub fn public_message(&self) -> String {
        match self {
            Self::FetchFailed(_) => FETCH_FAILED_MESSAGE.to_string(),
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Reclassify a store error raised while listing.
    pub fn into_fetch_failed(self) -> Self {
        match self {
            Self::Database(err) => Self::FetchFailed(err),
            other => other,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "Request rejected");
        }

        let body = Json(json!({ "error": self.public_message() }));

        (status, body).into_response()
    }
}

// Convenience conversions
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {}", err))
    }
}
