//! Favorite API module

mod handler;

use axum::routing::get;
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/favorites", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{product_id}",
            get(handler::check).delete(handler::delete),
        )
}
