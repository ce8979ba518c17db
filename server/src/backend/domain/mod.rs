//! # Domain Module
//!
//! Contains all business logic for the ride coordination backend.
//!
//! ## Module Organization
//!
//! - **assignment_service**: admin-side child/driver assignment
//! - **ride_service**: ride status lifecycle and ride views
//! - **profile_service**: signup and profile lookup
//! - **child_service**: child registration and per-parent/per-driver lists
//! - **dashboard_service**: role-specific landing views
//! - **actor**: the acting user, authorization guards, identity seam
//! - **clock**: injectable source of "now"
//!
//! ## Business Rules
//!
//! - Every operation receives the acting user explicitly and checks it
//!   before reading or writing anything
//! - A child has at most one assigned driver, who must hold the driver role
//! - A ride only moves forward: scheduled, picked up, dropped off
//! - Services hold no cached state; storage is the single source of truth

pub mod actor;
pub mod assignment_service;
pub mod child_service;
pub mod clock;
pub mod commands;
pub mod dashboard_service;
pub mod error;
pub mod models;
pub mod profile_service;
pub mod ride_service;

#[cfg(test)]
pub mod test_support;

pub use actor::{Actor, IdentityService, ProfileIdentity};
pub use assignment_service::AssignmentService;
pub use child_service::ChildService;
pub use clock::{Clock, FixedClock, LocalClock};
pub use dashboard_service::{DashboardLimits, DashboardService, DashboardView};
pub use error::{DomainError, DomainResult};
pub use profile_service::ProfileService;
pub use ride_service::RideService;
