//! Voting page handlers.
//!
//! ## Endpoints
//!
//! - `GET /` - Show a random image
//! - `POST /` - Record a "cute" / "very cute" vote
//!
//! Both require a logged-in session. Votes are logged and then dropped.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::get,
    Extension, Form, Json, Router,
};
use tracing::info;

use crate::error::{AppError, Result};
use crate::middleware::{CurrentUser, RequireLogin};
use crate::models::{Vote, VoteForm, VoteResponse};
use crate::state::AppState;
use crate::views;

async fn pick_image(state: &AppState) -> Result<String> {
    state
        .images
        .pick_random()
        .await?
        .ok_or_else(|| AppError::NoImages(state.image_dir_display()))
}

/// GET /
async fn show_vote(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> Result<Html<String>> {
    let image = pick_image(&state).await?;
    Ok(views::cat_vote(&state.image_url(&image), &username))
}

/// POST /
///
/// The vote is attributed to a freshly picked image, not the one the user
/// was shown.
async fn submit_vote(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<VoteResponse>> {
    // No form content type means no `cute` field
    let form = match form {
        Ok(Form(pairs)) => VoteForm::from_pairs(pairs),
        Err(FormRejection::InvalidFormContentType(_)) => VoteForm::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let image = pick_image(&state).await?;
    let vote = Vote::from_form(image, &form);

    info!(
        user = %username,
        image = %vote.image_filename,
        verdict = vote.verdict(),
        "Image {} marked as: {}",
        vote.image_filename,
        vote.verdict()
    );

    Ok(Json(VoteResponse { success: true }))
}

/// Create voting routes, guarded by the login check
pub fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(show_vote).post(submit_vote))
        .route_layer(RequireLogin::new("/login").layer())
}
