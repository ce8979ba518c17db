//! Resolves the `x-user-id` header to the acting user.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use super::error::ApiError;
use crate::backend::domain::{Actor, DomainError};
use crate::backend::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated caller. Rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Actor);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized(format!("Missing {} header", USER_ID_HEADER)))?;

        match state.identity.current_user(credential).await {
            Ok(Some(actor)) => {
                debug!("Request from {} ({})", actor.id, actor.role);
                Ok(CurrentUser(actor))
            }
            Ok(None) => Err(ApiError::unauthorized(format!("Unknown user: {}", credential))),
            Err(e) => Err(DomainError::Persistence(e).into()),
        }
    }
}
