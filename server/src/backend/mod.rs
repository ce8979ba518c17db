//! # Backend Module
//!
//! Contains all non-transport logic for the ride coordination server.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (business rules, services)
//!     ↓
//! Storage Layer (memory or file persistence)
//! ```
//!
//! [`initialize_backend`] wires the services over a storage [`Connection`];
//! [`create_router`] exposes them under `/api`.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::backend::domain::{
    AssignmentService, ChildService, Clock, DashboardLimits, DashboardService, IdentityService,
    ProfileIdentity, ProfileService, RideService,
};
use crate::backend::storage::Connection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
    pub child_service: ChildService,
    pub assignment_service: AssignmentService,
    pub ride_service: RideService,
    pub dashboard_service: DashboardService,
    pub identity: Arc<dyn IdentityService>,
}

/// Initialize the backend with all required services
pub fn initialize_backend(connection: &dyn Connection, clock: Arc<dyn Clock>, limits: DashboardLimits) -> AppState {
    info!("Setting up repositories");
    let profiles = connection.profile_repository();
    let children = connection.child_repository();
    let rides = connection.ride_repository();

    info!("Setting up domain services");
    let profile_service = ProfileService::new(profiles.clone());
    let child_service = ChildService::new(profiles.clone(), children.clone());
    let assignment_service = AssignmentService::new(profiles.clone(), children.clone());
    let ride_service = RideService::new(profiles.clone(), children, rides, clock);
    let dashboard_service = DashboardService::new(
        profile_service.clone(),
        child_service.clone(),
        assignment_service.clone(),
        ride_service.clone(),
        limits,
    );

    AppState {
        profile_service,
        child_service,
        assignment_service,
        ride_service,
        dashboard_service,
        identity: Arc::new(ProfileIdentity::new(profiles)),
    }
}

/// Create the Axum router with all routes configured. `cors_origin` is a
/// single origin, or `*` for any.
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);
    let cors = if cors_origin == "*" {
        cors.allow_origin(Any)
    } else {
        let origin = cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
        cors.allow_origin(origin)
    };

    Ok(Router::new()
        .nest("/api", io::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
