//! Password reset handlers.
//!
//! ## Endpoints
//!
//! - `GET/POST /reset_password` - Ask the provider to email a reset link
//! - `GET/POST /complete_password_reset?token=T` - Set a new password
//!
//! A provider failure while completing a reset is not caught here and ends as
//! a server error.

use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{NewPasswordForm, ResetRequestForm, ResetTokenQuery};
use crate::services::IdentityError;
use crate::state::AppState;
use crate::views;

/// GET /reset_password
async fn reset_password_page() -> Html<String> {
    views::reset_password(None)
}

/// POST /reset_password
async fn reset_password(
    State(state): State<AppState>,
    Form(form): Form<ResetRequestForm>,
) -> Result<Html<String>> {
    match state.identity.start_password_reset(&form.username).await {
        Ok(_) => {
            info!(email = %form.username, "Password reset email requested");
            Ok(views::password_reset_sent())
        }
        Err(IdentityError::Api(details)) => {
            let message = format!("Failed to send reset email. {}", details);
            Ok(views::reset_password(Some(&message)))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /complete_password_reset?token=T
async fn complete_password_reset_page(
    Query(query): Query<ResetTokenQuery>,
) -> Result<Html<String>> {
    let token = query.token().ok_or(AppError::InvalidResetToken)?;
    Ok(views::complete_password_reset(token))
}

/// POST /complete_password_reset?token=T
///
/// The token is checked before the form body so a bare POST still gets the
/// invalid-token notice.
async fn complete_password_reset(
    State(state): State<AppState>,
    Query(query): Query<ResetTokenQuery>,
    form: std::result::Result<Form<NewPasswordForm>, FormRejection>,
) -> Result<Redirect> {
    let token = query.token().ok_or(AppError::InvalidResetToken)?;
    let Form(form) = form?;

    state
        .identity
        .complete_password_reset(token, &form.new_password)
        .await?;

    info!("Password reset completed");
    Ok(Redirect::to("/login"))
}

/// Create password reset routes
pub fn password_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reset_password",
            get(reset_password_page).post(reset_password),
        )
        .route(
            "/complete_password_reset",
            get(complete_password_reset_page).post(complete_password_reset),
        )
}
