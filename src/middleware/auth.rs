//! Login guard middleware.
//!
//! Wraps routes that need a logged-in user. Requests whose session carries no
//! username are redirected to `/login`; the rest get a [`CurrentUser`]
//! extension the handler can extract.
//!
//! Must sit inside the session layer, which is what puts the [`Session`] into
//! the request extensions.
//!
//! # Example
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/", get(show_vote))
//!     .route_layer(RequireLogin::new("/login").layer());
//! ```

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Redirect, Response},
};
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tower_sessions::Session;
use tracing::debug;

use crate::error::AppError;
use crate::models::SessionUser;

/// Username of the logged-in user, set by [`RequireLogin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

/// Login guard
#[derive(Clone)]
pub struct RequireLogin {
    /// Where logged-out requests are sent
    login_path: Arc<str>,
}

impl RequireLogin {
    pub fn new(login_path: &str) -> Self {
        Self {
            login_path: Arc::from(login_path),
        }
    }

    /// Create a Tower Layer for this guard
    pub fn layer(&self) -> RequireLoginLayer {
        RequireLoginLayer {
            guard: self.clone(),
        }
    }
}

/// Tower Layer for the login guard
#[derive(Clone)]
pub struct RequireLoginLayer {
    guard: RequireLogin,
}

impl<S> Layer<S> for RequireLoginLayer {
    type Service = RequireLoginMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireLoginMiddleware {
            inner,
            guard: self.guard.clone(),
        }
    }
}

/// Login guard middleware service
#[derive(Clone)]
pub struct RequireLoginMiddleware<S> {
    inner: S,
    guard: RequireLogin,
}

impl<S> Service<Request<Body>> for RequireLoginMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let session = req.extensions().get::<Session>().cloned();
        let login_path = self.guard.login_path.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(session) = session else {
                return Ok(AppError::internal("Session layer missing").into_response());
            };

            match SessionUser::get(&session).await {
                Ok(Some(username)) => {
                    req.extensions_mut().insert(CurrentUser(username));
                    inner.call(req).await
                }
                Ok(None) => {
                    debug!(path = %req.uri().path(), "Not logged in, redirecting");
                    Ok(Redirect::to(&login_path).into_response())
                }
                Err(e) => Ok(e.into_response()),
            }
        })
    }
}
