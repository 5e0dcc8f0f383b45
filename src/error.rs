//! Error types for the voting server.
//!
//! Every handler returns [`Result`], and every failure is rendered by the
//! single [`IntoResponse`] impl below.
//!
//! # Error Categories
//!
//! - **Plain-text notices (200)**: missing reset token, empty image catalog
//! - **Client errors (4xx)**: form bodies that could not be read
//! - **Server errors (5xx)**: identity provider failures the handler did not
//!   recover from, session store failures, I/O errors
//!
//! Provider rejections of signup, login and reset-start are recovered in the
//! handlers and re-rendered as the form with a message, so they never reach
//! this layer.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::services::identity::IdentityError;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    // -------------------------------------------------------------------------
    // Notices
    // -------------------------------------------------------------------------
    /// Password reset link opened without a token
    #[error("Invalid reset token")]
    InvalidResetToken,

    /// Image directory has no eligible files
    #[error("Please add images to the {0} folder.")]
    NoImages(String),

    // -------------------------------------------------------------------------
    // Client Errors (4xx)
    // -------------------------------------------------------------------------
    /// Form body missing, of the wrong content type, or undecodable
    #[error("Invalid form: {0}")]
    InvalidForm(#[from] FormRejection),

    // -------------------------------------------------------------------------
    // Server Errors (5xx)
    // -------------------------------------------------------------------------
    /// Identity provider call failed
    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),

    /// Session store error
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidResetToken => StatusCode::OK,
            Self::NoImages(_) => StatusCode::OK,

            Self::InvalidForm(rejection) => rejection.status(),

            Self::Identity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, "Server error occurred");
        } else {
            tracing::debug!(error = %self, "Request ended with a notice");
        }

        // Don't expose provider or I/O details to clients
        let body = if self.is_server_error() {
            "An internal error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, body).into_response()
    }
}
