//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used across
//! the drop page crates. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Unauthorized`](AppError::Unauthorized) → 401 (wallet ownership not proven)
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Upstream Errors** (502)
//!    - [`Content`](AppError::Content) → content backend unreachable or failing
//!    - [`Drop`](AppError::Drop) → contract-drop provider unreachable or failing
//!    - [`Decoding`](AppError::Decoding) → upstream payload did not match the expected shape
//!
//! 3. **Server Errors** (500)
//!    - [`Config`](AppError::Config), [`Internal`](AppError::Internal)
//!
//! The page itself never classifies these for the visitor: a failed claim is one
//! notification regardless of variant. The variants exist for logs and for the
//! JSON endpoints.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_slug(slug: &str) -> Result<&str> {
//!     if slug.is_empty() {
//!         return Err(AppError::InvalidInput("Slug cannot be empty".to_string()));
//!     }
//!     Ok(slug)
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use shared::dto::drop::ErrorResponse;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content backend request failed.
    #[error("Content backend error: {0}")]
    Content(String),

    /// Contract-drop provider request failed (read or claim).
    #[error("Drop provider error: {0}")]
    Drop(String),

    /// Upstream payload could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Wallet ownership could not be proven (stale challenge, bad signature).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Content(_) | AppError::Drop(_) | AppError::Decoding(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Upstream and internal failures collapse into generic messages.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::Unauthorized(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Content(_) | AppError::Drop(_) | AppError::Decoding(_) => {
                "Service temporarily unavailable".to_string()
            }
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Variant name, used as the `code` field of JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Content(_) => "Content",
            AppError::Drop(_) => "Drop",
            AppError::Decoding(_) => "Decoding",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                tracing::debug!("Client error: {}", self);
            }
            _ => {
                tracing::error!("Server error: {}", self);
            }
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
