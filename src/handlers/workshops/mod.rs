//! Workshop handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{middleware, routing::get, Router};

use crate::{middleware::auth_middleware, state::AppState};

/// Workshop routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", axum::routing::post(handler::create_workshop))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handler::list_workshops))
        .route("/{id}", get(handler::get_workshop))
        .merge(protected)
}
