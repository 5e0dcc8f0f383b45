//! Common test utilities and helpers.

#![allow(dead_code)]

use cute_cats::{
    config::{Config, IdentityConfig, ImagesConfig, LoggingConfig, ServerConfig, SessionConfig},
    create_router, AppState,
};
use mockito::{Matcher, Mock, ServerGuard};
use secrecy::SecretString;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const TEST_EMAIL: &str = "cat@example.com";
pub const TEST_PASSWORD: &str = "whiskers-and-yarn-42";

pub const CREATE_PATH: &str = "/v1/passwords";
pub const AUTHENTICATE_PATH: &str = "/v1/passwords/authenticate";
pub const RESET_START_PATH: &str = "/v1/passwords/email/reset/start";
pub const RESET_PATH: &str = "/v1/passwords/email/reset";

/// Test server instance
pub struct TestServer {
    pub base_url: String,
    /// Stands in for the identity provider
    pub provider: ServerGuard,
    pub images: TempDir,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a test server with one image in the catalog
    pub async fn start() -> Self {
        Self::start_with_images(&["a.png"]).await
    }

    /// Start a test server whose image directory holds `files`
    pub async fn start_with_images(files: &[&str]) -> Self {
        let provider = mockito::Server::new_async().await;
        let images = TempDir::new().expect("Failed to create temp dir");
        for name in files {
            tokio::fs::write(images.path().join(name), b"fake image bytes")
                .await
                .expect("Failed to write test image");
        }

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        let config = create_test_config(&images, addr.port(), &provider.url());
        let state = AppState::new(config).expect("Failed to create app state");
        let app = create_router(state).expect("Failed to create router");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            tokio::select! {
                _ = axum::serve(listener, app) => {}
                _ = shutdown_rx => {}
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            provider,
            images,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// HTTP client that keeps cookies and does not follow redirects
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Provider accepts any call to `path`
    pub async fn mock_ok(&mut self, path: &str) -> Mock {
        self.provider
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status_code":200,"request_id":"request-id-test-ok","user_id":"user-test-1"}"#)
            .create_async()
            .await
    }

    /// Provider rejects calls to `path` with the given error
    pub async fn mock_rejection(
        &mut self,
        path: &str,
        status: u16,
        error_type: &str,
        error_message: &str,
    ) -> Mock {
        let body = serde_json::json!({
            "status_code": status,
            "request_id": "request-id-test-err",
            "error_type": error_type,
            "error_message": error_message,
            "error_url": format!("https://stytch.com/docs/api/errors/{}", status),
        });

        self.provider
            .mock("POST", path)
            .with_status(status as usize)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Provider accepts exactly the test credentials
    pub async fn mock_authenticate_test_user(&mut self) -> Mock {
        self.provider
            .mock("POST", AUTHENTICATE_PATH)
            .match_body(Matcher::Json(serde_json::json!({
                "email": TEST_EMAIL,
                "password": TEST_PASSWORD,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status_code":200,"request_id":"request-id-test-ok","user_id":"user-test-1"}"#)
            .create_async()
            .await
    }

    /// Log `client` in with the test credentials
    pub async fn login(&self, client: &reqwest::Client) -> reqwest::Response {
        client
            .post(self.url("/login"))
            .form(&[("username", TEST_EMAIL), ("password", TEST_PASSWORD)])
            .send()
            .await
            .expect("Failed to send login")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Location header of a redirect response
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("Missing location header")
        .to_str()
        .unwrap()
}

/// Full `Set-Cookie` header for the session id cookie, if one was set
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("id="))
        .map(str::to_string)
}

/// `name=value` pair of a `Set-Cookie` header
pub fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default().trim()
}

/// Create test configuration
fn create_test_config(images: &TempDir, port: u16, provider_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            request_timeout: 10,
        },
        images: ImagesConfig {
            dir: images.path().to_path_buf(),
            url_prefix: "/static/images".to_string(),
        },
        session: SessionConfig {
            expiry_minutes: 60,
            secure_cookies: false,
            secret: SecretString::from("k".repeat(64)),
        },
        identity: IdentityConfig {
            environment: "test".to_string(),
            base_url: Some(provider_url.to_string()),
            project_id: "project-test-00000000".to_string(),
            secret: SecretString::from("secret-test-00000000".to_string()),
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
    }
}
