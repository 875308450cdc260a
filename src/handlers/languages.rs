//! Language list handler

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{
    grader::{languages::all_configs, LanguageConfig},
    state::AppState,
};

/// Languages offered by the editor
#[derive(Debug, Serialize)]
pub struct LanguageListResponse {
    pub languages: Vec<LanguageConfig>,
}

async fn list_languages() -> Json<LanguageListResponse> {
    Json(LanguageListResponse {
        languages: all_configs(),
    })
}

/// Language routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/languages", get(list_languages))
}
