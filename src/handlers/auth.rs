//! Signup, login and logout handlers.
//!
//! ## Endpoints
//!
//! - `GET/POST /signup` - Create a password credential with the provider
//! - `GET/POST /login` - Authenticate and start a session
//! - `GET /logout` - End the session
//!
//! Provider rejections are shown on the form that was submitted. Transport
//! failures are server errors.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tower_sessions::Session;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{CredentialsForm, SessionUser};
use crate::services::IdentityError;
use crate::state::AppState;
use crate::views;

/// GET /signup
async fn signup_page() -> Html<String> {
    views::signup(None)
}

/// POST /signup
async fn signup(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    match state
        .identity
        .create_credential(&form.username, &form.password)
        .await
    {
        Ok(receipt) => {
            info!(email = %form.username, user_id = ?receipt.user_id, "Credential created");
            Ok(Redirect::to("/login").into_response())
        }
        Err(IdentityError::Api(details)) => {
            let message = format!("An error occurred: {}", details);
            Ok(views::signup(Some(&message)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
async fn login_page() -> Html<String> {
    views::login(None)
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    match state
        .identity
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(_) => {
            SessionUser::insert(&session, &form.username).await?;
            info!(email = %form.username, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(IdentityError::Api(details)) => {
            debug!(email = %form.username, error_type = %details.error_type, "Login rejected");
            let message = format!("There was an error {}", details.error_type);
            Ok(views::login(Some(&message)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
///
/// Logged-out callers are simply redirected.
async fn logout(session: Session) -> Result<Redirect> {
    SessionUser::remove(&session).await?;
    Ok(Redirect::to("/login"))
}

/// Create signup/login/logout routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_page).post(signup))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}
