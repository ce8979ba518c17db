//! # REST API Interface Layer
//!
//! HTTP endpoints for the ride coordination backend. This layer:
//! - resolves the caller from the `x-user-id` header ([`identity`])
//! - maps JSON DTOs from the `shared` crate to domain commands ([`mappers`])
//! - translates domain errors to HTTP status codes ([`error`])
//!
//! Handlers hold no business logic; every rule lives in the domain services.

pub mod assignment_apis;
pub mod child_apis;
pub mod dashboard_apis;
pub mod error;
pub mod identity;
pub mod mappers;
pub mod profile_apis;
pub mod ride_apis;

use axum::Router;

use crate::backend::AppState;

pub use error::ApiError;
pub use identity::{CurrentUser, USER_ID_HEADER};

/// Every `/api` route, relative to the `/api` prefix.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(profile_apis::router())
        .merge(assignment_apis::router())
        .merge(child_apis::router())
        .merge(ride_apis::router())
        .merge(dashboard_apis::router())
}
