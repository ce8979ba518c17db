//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Implementations report failures as `anyhow::Error`; the domain layer wraps
//! them into `DomainError::Persistence`. Ordering guarantees are listed per
//! method, the domain layer re-sorts whenever a view depends on order.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveTime;
use std::sync::Arc;

use crate::backend::domain::models::child::Child;
use crate::backend::domain::models::profile::{Profile, Role};
use crate::backend::domain::models::ride::{Ride, RideStatus};

/// Trait defining the interface for profile storage operations
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Store a new profile
    async fn store_profile(&self, profile: &Profile) -> Result<()>;

    /// Retrieve a specific profile by ID
    async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>>;

    /// List all profiles, newest first
    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    /// List profiles holding `role`, ordered by full name
    async fn list_profiles_by_role(&self, role: Role) -> Result<Vec<Profile>>;
}

/// Trait defining the interface for child storage operations
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child
    async fn store_child(&self, child: &Child) -> Result<()>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> Result<Option<Child>>;

    /// List all children ordered by name
    async fn list_children(&self) -> Result<Vec<Child>>;

    /// List the children owned by a parent
    async fn list_children_for_parent(&self, parent_id: &str) -> Result<Vec<Child>>;

    /// List the children currently assigned to a driver
    async fn list_children_for_driver(&self, driver_id: &str) -> Result<Vec<Child>>;

    /// Overwrite the assigned driver of a child.
    /// Returns false if the child does not exist.
    async fn update_assigned_driver(&self, child_id: &str, driver_id: Option<&str>) -> Result<bool>;
}

/// Trait defining the interface for ride storage operations
#[async_trait]
pub trait RideStorage: Send + Sync {
    /// Store a new ride
    async fn store_ride(&self, ride: &Ride) -> Result<()>;

    /// Retrieve a specific ride by ID
    async fn get_ride(&self, ride_id: &str) -> Result<Option<Ride>>;

    /// List every ride
    async fn list_rides(&self) -> Result<Vec<Ride>>;

    /// List the rides driven by a driver
    async fn list_rides_for_driver(&self, driver_id: &str) -> Result<Vec<Ride>>;

    /// List the rides of any of the given children
    async fn list_rides_for_children(&self, child_ids: &[String]) -> Result<Vec<Ride>>;

    /// Overwrite status and drop time of a ride.
    /// Returns false if the ride does not exist.
    async fn update_ride_status(
        &self,
        ride_id: &str,
        status: RideStatus,
        drop_time: Option<NaiveTime>,
    ) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// Hands out the repositories of one backend so the domain layer can be wired
/// without knowing which backend is in use.
pub trait Connection: Send + Sync {
    fn profile_repository(&self) -> Arc<dyn ProfileStorage>;

    fn child_repository(&self) -> Arc<dyn ChildStorage>;

    fn ride_repository(&self) -> Arc<dyn RideStorage>;
}
