//! Authentication middleware
//!
//! Validates `Authorization: Bearer <token>` on every `/api/` request and
//! injects [`CurrentUser`] into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use super::{CurrentUser, JwtService};
use crate::core::AppState;

/// Routes reachable without a token
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (`/health`)
/// - registration and login
/// - public catalog reads (products, categories, campaigns, product reviews)
fn is_public(method: &http::Method, path: &str) -> bool {
    if !path.starts_with("/api/") {
        return true;
    }
    if path == "/api/auth/login" || path == "/api/auth/register" {
        return true;
    }
    if method == http::Method::GET {
        return path.starts_with("/api/products")
            || path.starts_with("/api/categories")
            || path.starts_with("/api/campaigns")
            || path.starts_with("/api/reviews/product/");
    }
    false
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without credentials");
            return Err(AppError::unauthorized());
        }
    };

    let claims = state.jwt.validate(token).inspect_err(|e| {
        tracing::warn!(uri = %req.uri(), error = %e, "Token rejected");
    })?;
    let user = CurrentUser::try_from(claims)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
