//! Home page: upload form and question form next to the results.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::error;

use crate::state::{SharedState, UploadMode};
use crate::views::home::render_home;

#[derive(Deserialize)]
pub struct HomeQuery {
    /// Switches the upload tab: `url` or `file`.
    pub mode: Option<UploadMode>,
}

pub async fn home(
    State(state): State<SharedState>,
    Query(query): Query<HomeQuery>,
) -> Response {
    let mut session = state.session.write().await;
    if let Some(mode) = query.mode {
        session.upload_mode = mode;
    }
    let toasts = session.take_toasts();
    match render_home(&session, &toasts, &state.upload_policy) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render home page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
