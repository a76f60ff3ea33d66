//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all backend modules. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! Errors fall into two HTTP classes:
//!
//! 1. **Client Errors** (400) - Problems the caller can fix
//!    - [`InvalidInput`](AppError::InvalidInput) - bad request data (e.g. non-positive amount)
//!    - [`TokenNotFound`](AppError::TokenNotFound) - unknown token symbol
//!    - [`Config`](AppError::Config) - a credential required for the active signing mode is missing
//!
//! 2. **Server Errors** (500) - Downstream/internal failures
//!    - [`Wallet`](AppError::Wallet) - wallet resolution against the custodial API failed
//!    - [`Quote`](AppError::Quote) - aggregator quote fetch failed
//!    - [`TransactionBuild`](AppError::TransactionBuild) - swap payload decode/rebuild failed
//!    - [`TransactionSubmit`](AppError::TransactionSubmit) - chain or custodial submission failed
//!    - [`Internal`](AppError::Internal) - anything else
//!
//! Server-class errors keep their full detail for the logs but collapse to a
//! generic message at the HTTP boundary; no upstream error text reaches the caller.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_amount(amount: i64) -> Result<u64> {
//!     if amount <= 0 {
//!         return Err(AppError::InvalidInput(
//!             "Amount must be greater than zero".to_string()
//!         ));
//!     }
//!     Ok(amount as u64)
//! }
//! ```

use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
///
/// Each variant includes a descriptive `String` for context. The `#[error]` attribute
/// from `thiserror` provides automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error: a credential required for the active signing mode is absent.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested token symbol is absent from the registry.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Token not found: {0}")]
    TokenNotFound(String),

    /// Wallet resolution failed (custodial API error or malformed response).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Aggregator quote fetch failed (non-2xx, timeout, or transport error).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Quote error: {0}")]
    Quote(String),

    /// Swap transaction could not be decoded or rebuilt.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Transaction build error: {0}")]
    TransactionBuild(String),

    /// Swap transaction was rejected by the chain RPC or the custodial API.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Transaction submit error: {0}")]
    TransactionSubmit(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::InvalidInput(_) | AppError::TokenNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Wallet(_)
            | AppError::Quote(_)
            | AppError::TransactionBuild(_)
            | AppError::TransactionSubmit(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Client-class errors carry their fixed message through; every server-class
    /// error returns the same generic message so no upstream detail leaks.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::TokenNotFound(msg) => msg.clone(),
            AppError::Wallet(_)
            | AppError::Quote(_)
            | AppError::TransactionBuild(_)
            | AppError::TransactionSubmit(_)
            | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        // Log error details (full error message for server logs)
        match status {
            StatusCode::BAD_REQUEST => {
                tracing::debug!("Client error: {}", self);
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Server error: {}", self);
            }
            _ => {
                tracing::warn!("Unexpected error: {}", self);
            }
        }

        // Extract error variant name for error code
        let error_code = match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::TokenNotFound(_) => "TokenNotFound",
            AppError::Wallet(_) => "Wallet",
            AppError::Quote(_) => "Quote",
            AppError::TransactionBuild(_) => "TransactionBuild",
            AppError::TransactionSubmit(_) => "TransactionSubmit",
            AppError::Internal(_) => "Internal",
        };

        let body = Json(json!({
            "error": message,
            "code": error_code,
        }));

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
