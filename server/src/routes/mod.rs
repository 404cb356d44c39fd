//! Router assembly
//!
//! Merges the per-resource routers and applies the shared middleware
//! stack: request ids, tracing, auth guard, compression, CORS, timeout.

use std::time::Duration;

use axum::{middleware, Router};
use http::HeaderName;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::require_auth;
use crate::core::AppState;

static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// All resource routers, without middleware or state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::products::router())
        .merge(api::categories::router())
        .merge(api::orders::router())
        .merge(api::addresses::router())
        .merge(api::payment_methods::router())
        .merge(api::reviews::router())
        .merge(api::notifications::router())
        .merge(api::favorites::router())
        .merge(api::campaigns::router())
        .merge(api::security::router())
}

/// The full application with middleware and state applied
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    // Cross-origin access is wide open during development only; production
    // deployments sit behind a frontend served from the same origin.
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    };

    build_router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
