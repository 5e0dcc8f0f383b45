//! Identity provider client for the Stytch passwords API.
//!
//! This module handles:
//! - Creating password credentials
//! - Authenticating email/password pairs
//! - Starting and completing email-based password resets
//!
//! Every call is a single attempt. Requests authenticate with HTTP basic auth
//! using the project id and secret.

use crate::config::IdentityConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const CREATE_PATH: &str = "/v1/passwords";
const AUTHENTICATE_PATH: &str = "/v1/passwords/authenticate";
const RESET_START_PATH: &str = "/v1/passwords/email/reset/start";
const RESET_PATH: &str = "/v1/passwords/email/reset";

/// Identity provider errors
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider answered and rejected the request
    #[error("{0}")]
    Api(ProviderErrorDetails),

    /// The provider could not be reached or answered with garbage
    #[error("Identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error body returned by the provider
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderErrorDetails {
    pub status_code: u16,
    #[serde(default)]
    pub request_id: String,
    pub error_type: String,
    pub error_message: String,
    #[serde(default)]
    pub error_url: String,
}

impl ProviderErrorDetails {
    /// Stand-in for an error response whose body could not be decoded
    fn unparsed(status: reqwest::StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            request_id: String::new(),
            error_type: "unknown_error".to_string(),
            error_message: format!("Unexpected response status {}", status),
            error_url: String::new(),
        }
    }
}

impl fmt::Display for ProviderErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.error_message)
    }
}

/// Fields we keep from a successful provider response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderReceipt {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ResetStartRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    token: &'a str,
    password: &'a str,
}

/// Client for the identity provider
#[derive(Debug, Clone)]
pub struct IdentityClient {
    base_url: String,
    project_id: String,
    secret: SecretString,
    client: reqwest::Client,
}

impl IdentityClient {
    /// Create a new identity client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &IdentityConfig, timeout: Duration) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: config.api_base_url().to_string(),
            project_id: config.project_id.clone(),
            secret: config.secret.clone(),
            client,
        })
    }

    /// Register a new email/password credential
    pub async fn create_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderReceipt, IdentityError> {
        self.post(CREATE_PATH, &CredentialRequest { email, password })
            .await
    }

    /// Check an email/password pair
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderReceipt, IdentityError> {
        self.post(AUTHENTICATE_PATH, &CredentialRequest { email, password })
            .await
    }

    /// Ask the provider to email a reset link to `email`
    pub async fn start_password_reset(&self, email: &str) -> Result<ProviderReceipt, IdentityError> {
        self.post(RESET_START_PATH, &ResetStartRequest { email }).await
    }

    /// Consume a reset token and set the new password
    pub async fn complete_password_reset(
        &self,
        token: &str,
        password: &str,
    ) -> Result<ProviderReceipt, IdentityError> {
        self.post(RESET_PATH, &ResetRequest { token, password }).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ProviderReceipt, IdentityError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.project_id, Some(self.secret.expose_secret()))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let receipt: ProviderReceipt = response.json().await?;
            debug!(path = path, request_id = %receipt.request_id, "Identity provider call succeeded");
            return Ok(receipt);
        }

        let details = response
            .json::<ProviderErrorDetails>()
            .await
            .unwrap_or_else(|_| ProviderErrorDetails::unparsed(status));

        warn!(
            path = path,
            status = details.status_code,
            error_type = %details.error_type,
            request_id = %details.request_id,
            "Identity provider rejected request"
        );

        Err(IdentityError::Api(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> IdentityClient {
        let config = IdentityConfig {
            environment: "test".to_string(),
            base_url: Some(server.url()),
            project_id: "project-test-123".to_string(),
            secret: SecretString::from("secret-test-456".to_string()),
        };
        IdentityClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_sends_basic_auth_and_credentials() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", AUTHENTICATE_PATH)
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .match_body(Matcher::Json(json!({
                "email": "cat@example.com",
                "password": "hunter22hunter22"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status_code":200,"request_id":"req-1","user_id":"user-1"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let receipt = client
            .authenticate("cat@example.com", "hunter22hunter22")
            .await
            .unwrap();

        assert_eq!(receipt.request_id, "req-1");
        assert_eq!(receipt.user_id.as_deref(), Some("user-1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_carries_provider_details() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", CREATE_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status_code": 400,
                    "request_id": "req-2",
                    "error_type": "weak_password",
                    "error_message": "Password is too weak.",
                    "error_url": "https://stytch.com/docs/api/errors/400"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .create_credential("cat@example.com", "123")
            .await
            .unwrap_err();

        match err {
            IdentityError::Api(details) => {
                assert_eq!(details.status_code, 400);
                assert_eq!(details.error_type, "weak_password");
                assert_eq!(details.to_string(), "weak_password: Password is too weak.");
            }
            other => panic!("expected provider rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", RESET_START_PATH)
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .start_password_reset("cat@example.com")
            .await
            .unwrap_err();

        match err {
            IdentityError::Api(details) => {
                assert_eq!(details.status_code, 502);
                assert_eq!(details.error_type, "unknown_error");
            }
            other => panic!("expected provider rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_reset_sends_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", RESET_PATH)
            .match_body(Matcher::Json(json!({
                "token": "reset-token-abc",
                "password": "brand-new-password"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status_code":200,"request_id":"req-3"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .complete_password_reset("reset-token-abc", "brand-new-password")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let config = IdentityConfig {
            base_url: Some("http://127.0.0.1:1".to_string()),
            project_id: "project-test-123".to_string(),
            secret: SecretString::from("secret-test-456".to_string()),
            ..Default::default()
        };
        let client = IdentityClient::new(&config, Duration::from_secs(5)).unwrap();

        let err = client
            .authenticate("cat@example.com", "hunter22hunter22")
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::Transport(_)));
    }
}
