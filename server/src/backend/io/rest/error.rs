//! Translation of domain failures into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::backend::domain::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown caller credential.
    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(e) => match e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {:#}", self);
            return (status, "Internal storage error").into_response();
        }
        warn!("Request rejected ({}): {}", status, self);
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::ride::{RideEvent, RideStatus};

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::unauthorized("who?"), StatusCode::UNAUTHORIZED),
            (DomainError::validation("bad").into(), StatusCode::BAD_REQUEST),
            (DomainError::forbidden("no").into(), StatusCode::FORBIDDEN),
            (DomainError::not_found("gone").into(), StatusCode::NOT_FOUND),
            (
                DomainError::InvalidTransition {
                    ride_id: "r1".to_string(),
                    status: RideStatus::Scheduled,
                    event: RideEvent::DropOff,
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Persistence(anyhow::anyhow!("disk full")).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected);
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
