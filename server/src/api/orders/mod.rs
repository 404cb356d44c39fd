//! Order API module

mod handler;

use axum::routing::{get, post, put};
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_mine).post(handler::place))
        .route("/all", get(handler::list_all))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/status", put(handler::update_status))
}
