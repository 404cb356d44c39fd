//! Auth API module

mod handler;

use axum::routing::{get, post, put};
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me).put(handler::update_profile))
        .route("/password", put(handler::change_password))
}
