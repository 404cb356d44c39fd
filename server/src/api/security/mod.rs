//! Account security API module

mod handler;

use axum::routing::{get, put};
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/security", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/info", get(handler::info))
        .route("/email", put(handler::update_email))
        .route("/login-history", get(handler::login_history))
}
