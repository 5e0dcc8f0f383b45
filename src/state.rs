//! Application state management.
//!
//! This module defines the shared application state that is accessible
//! from all request handlers via Axum's State extractor. It is built once
//! at startup from an explicit [`Config`]; nothing is initialized globally.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(State(state): State<AppState>) -> impl IntoResponse {
//!     let image = state.images.pick_random().await?;
//!     // ...
//! }
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::services::{IdentityClient, ImagePicker};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Identity provider client
    pub identity: Arc<IdentityClient>,

    /// Random image source for the voting page
    pub images: Arc<ImagePicker>,
}

impl AppState {
    /// Create a new application state
    ///
    /// # Errors
    /// Returns error if the identity client cannot be built
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.server.request_timeout);
        let identity = IdentityClient::new(&config.identity, timeout)?;
        let images = ImagePicker::new(config.images.dir.clone());

        Ok(Self {
            config: Arc::new(config),
            identity: Arc::new(identity),
            images: Arc::new(images),
        })
    }

    /// Public URL of an image file in the catalog
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}/{}",
            self.config.images.url_prefix,
            crate::views::url_encode(filename)
        )
    }

    /// Image directory as shown to users
    pub fn image_dir_display(&self) -> String {
        self.images.dir().display().to_string()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &"<Config>")
            .field("identity", &"<IdentityClient>")
            .field("images", &self.images)
            .finish()
    }
}
