//! Review API module

mod handler;

use axum::routing::{get, post};
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/mine", get(handler::list_mine))
        .route("/product/{product_id}", get(handler::list_by_product))
        .route("/product/{product_id}/summary", get(handler::summary))
        .route("/{id}", axum::routing::put(handler::update).delete(handler::delete))
}
