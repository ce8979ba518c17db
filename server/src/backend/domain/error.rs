//! Error type shared by every domain service.

use thiserror::Error;

use super::models::ride::{IllegalTransition, RideEvent, RideStatus};

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The backing store failed to read or write.
    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),

    /// A caller-supplied value broke a referential, role or format rule.
    #[error("{0}")]
    Validation(String),

    /// The ride is not in the status the requested event starts from.
    #[error("ride {ride_id} is {status}, cannot apply {event}")]
    InvalidTransition {
        ride_id: String,
        status: RideStatus,
        event: RideEvent,
    },

    /// The acting user may not perform the operation.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }

    pub fn invalid_transition(ride_id: &str, illegal: IllegalTransition) -> Self {
        DomainError::InvalidTransition {
            ride_id: ride_id.to_string(),
            status: illegal.from,
            event: illegal.event,
        }
    }
}
