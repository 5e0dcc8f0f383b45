//! Configuration module for the voting server.
//!
//! Non-secret settings are loaded from a TOML file. Secrets (provider
//! credentials and the session signing secret) only ever come from the
//! process environment, optionally seeded from a `.env` file.
//!
//! # Configuration Sources (in order of priority)
//! 1. `config.local.toml` - Local overrides (gitignored)
//! 2. `config.toml` - Main configuration file
//! 3. Default values
//!
//! # Environment
//! - `STYTCH_PROJECT_ID` - identity provider project id
//! - `STYTCH_SECRET` - identity provider secret
//! - `SESSION_SECRET` - session cookie signing secret (at least 64 bytes)
//!
//! # Example
//! ```rust,ignore
//! let config = Config::load("config.toml")?;
//! println!("Server will listen on {}:{}", config.server.host, config.server.port);
//! ```

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PROJECT_ID: &str = "STYTCH_PROJECT_ID";
pub const ENV_PROVIDER_SECRET: &str = "STYTCH_SECRET";
pub const ENV_SESSION_SECRET: &str = "SESSION_SECRET";

/// Minimum length of the session signing secret, imposed by the cookie signing key.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Timeout for outbound identity provider calls, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_request_timeout() -> u64 {
    30
}

/// Image catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    /// Directory holding the images to vote on
    #[serde(default = "default_image_dir")]
    pub dir: PathBuf,
    /// URL prefix the directory is served under
    #[serde(default = "default_image_url_prefix")]
    pub url_prefix: String,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("static/images")
}

fn default_image_url_prefix() -> String {
    "/static/images".to_string()
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_image_dir(),
            url_prefix: default_image_url_prefix(),
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Inactivity expiry in minutes
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,
    /// Only send the cookie over HTTPS
    #[serde(default)]
    pub secure_cookies: bool,
    /// Cookie signing secret, from `SESSION_SECRET`
    #[serde(skip)]
    pub secret: SecretString,
}

fn default_expiry_minutes() -> i64 {
    60 * 24 * 7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: default_expiry_minutes(),
            secure_cookies: false,
            secret: SecretString::default(),
        }
    }
}

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Provider environment: "test" or "live"
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Overrides the environment's API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Project id, from `STYTCH_PROJECT_ID`
    #[serde(skip)]
    pub project_id: String,
    /// Project secret, from `STYTCH_SECRET`
    #[serde(skip)]
    pub secret: SecretString,
}

fn default_environment() -> String {
    "test".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            base_url: None,
            project_id: String::new(),
            secret: SecretString::default(),
        }
    }
}

impl IdentityConfig {
    /// API base URL for the configured environment
    pub fn api_base_url(&self) -> &str {
        if let Some(url) = &self.base_url {
            return url;
        }
        match self.environment.as_str() {
            "live" => "https://api.stytch.com",
            _ => "https://test.stytch.com",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Config {
    /// Load configuration from a file path and the process environment
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed, a secret
    /// is missing, or validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Tries to load from:
    /// 1. `config.local.toml` (if exists)
    /// 2. `config.toml`
    pub fn load_default() -> Result<Self, ConfigError> {
        if Path::new("config.local.toml").exists() {
            return Self::load("config.local.toml");
        }

        if Path::new("config.toml").exists() {
            return Self::load("config.toml");
        }

        Err(ConfigError::ValidationError(
            "No configuration file found. Expected config.toml or config.local.toml".to_string(),
        ))
    }

    /// Fill in secrets from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnvVar(key))
        };

        self.identity.project_id = required(ENV_PROJECT_ID)?;
        self.identity.secret = SecretString::from(required(ENV_PROVIDER_SECRET)?);
        self.session.secret = SecretString::from(required(ENV_SESSION_SECRET)?);

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret.expose_secret().len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::ValidationError(format!(
                "{} must be at least {} bytes",
                ENV_SESSION_SECRET, MIN_SESSION_SECRET_LEN
            )));
        }

        if self.session.expiry_minutes <= 0 {
            return Err(ConfigError::ValidationError(
                "session.expiry_minutes must be positive".to_string(),
            ));
        }

        let valid_environments = ["test", "live"];
        if !valid_environments.contains(&self.identity.environment.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "identity.environment must be one of: {:?}",
                valid_environments
            )));
        }

        if let Some(url) = &self.identity.base_url {
            if url.ends_with('/') {
                return Err(ConfigError::ValidationError(
                    "identity.base_url should not have a trailing slash".to_string(),
                ));
            }
        }

        if !self.images.url_prefix.starts_with('/') || self.images.url_prefix.len() < 2 {
            return Err(ConfigError::ValidationError(
                "images.url_prefix must be an absolute path other than /".to_string(),
            ));
        }

        Ok(())
    }
}
