//! Authenticated-user extractor

use super::Claims;
use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::AppError;

/// The authenticated caller, injected into request extensions by
/// [`require_auth`](super::require_auth)
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| AppError::invalid_token("Malformed subject claim"))?;
        Ok(Self {
            id,
            email: claims.email,
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}
