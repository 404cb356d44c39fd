//! Address API module

mod handler;

use axum::routing::{get, put};
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/addresses", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/default", put(handler::set_default))
}
