//! HTTP request handlers for the voting server.
//!
//! This module contains all endpoint handlers organized by functionality:
//! - `auth`: Signup, login and logout
//! - `password`: Password reset request and completion
//! - `vote`: The image voting page
//! - `health`: Health check endpoints

pub mod auth;
pub mod health;
pub mod password;
pub mod vote;

pub use auth::auth_routes;
pub use health::health_routes;
pub use password::password_routes;
pub use vote::vote_routes;
