//! Middleware components for the voting server.
//!
//! This module contains middleware for:
//! - Requiring a logged-in session

pub mod auth;

pub use auth::{CurrentUser, RequireLogin, RequireLoginLayer};
