//! Assignment handlers
//!
//! Listing, running, testing and submitting code for assignments. Grading
//! runs on the blocking thread pool.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth_middleware, state::AppState};

/// Assignment routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/{id}/submit", post(handler::submit))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handler::list_assignments))
        .route("/{id}", get(handler::get_assignment))
        .route("/{id}/run", post(handler::run_code))
        .route("/{id}/test", post(handler::run_tests))
        .route("/{id}/timer", get(handler::timer))
        .merge(protected)
}
