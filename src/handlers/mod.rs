//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod assignments;
pub mod auth;
pub mod health;
pub mod languages;
pub mod workshops;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(languages::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/workshops", workshops::routes(state.clone()))
        .nest("/assignments", assignments::routes(state))
}
