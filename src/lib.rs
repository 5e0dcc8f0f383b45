//! # Cute Cats
//!
//! A small voting site: log in through the Stytch passwords API, get shown a
//! random cat picture, and vote on whether it is cute or very cute.
//!
//! ## Features
//!
//! - **Accounts**: Signup, login and password reset delegated to the identity provider
//! - **Sessions**: Signed session cookie backed by an in-process store
//! - **Voting**: Uniform random pick from an image directory; votes are logged, not stored
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  HTTP Server                     │
//! │  ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌──────┐ │
//! │  │ Auth     │ │ Password │ │ Vote    │ │Static│ │
//! │  └──────────┘ └──────────┘ └─────────┘ └──────┘ │
//! ├─────────────────────────────────────────────────┤
//! │        Session layer (signed cookie)             │
//! ├─────────────────────────────────────────────────┤
//! │  ┌──────────────────┐   ┌─────────────────────┐ │
//! │  │ Identity client  │   │   Image picker      │ │
//! │  └──────────────────┘   └─────────────────────┘ │
//! ├─────────────────────────────────────────────────┤
//! │        Stytch API        /    File system        │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! export STYTCH_PROJECT_ID=project-test-...
//! export STYTCH_SECRET=secret-test-...
//! export SESSION_SECRET=$(openssl rand -hex 32)
//! cargo run --release
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
pub use middleware::RequireLogin;
pub use state::AppState;

use axum::Router;
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{cookie::Key, cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::config::SessionConfig;

/// Run the voting server with the given configuration.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;
    let app = create_router(state)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!(
        address = %addr,
        images = %config.images.dir.display(),
        environment = %config.identity.environment,
        "Server starting"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router
///
/// # Errors
/// Returns error if the session signing key cannot be derived
pub fn create_router(state: AppState) -> Result<Router> {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.session.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.session.expiry_minutes,
        )))
        .with_signed(signing_key(&state.config.session)?);

    let images = ServeDir::new(&state.config.images.dir);
    let images_prefix = state.config.images.url_prefix.clone();

    Ok(Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::password_routes())
        .merge(handlers::vote_routes())
        .nest("/health", handlers::health_routes())
        .nest_service(&images_prefix, images)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Derive the cookie signing key from the configured secret
fn signing_key(config: &SessionConfig) -> Result<Key> {
    Key::try_from(config.secret.expose_secret().as_bytes())
        .map_err(|e| AppError::internal(format!("Invalid session secret: {}", e)))
}
