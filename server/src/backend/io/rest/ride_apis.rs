//! # REST API for Rides
//!
//! Status transitions reported by drivers, and the ride lists shown to
//! drivers, parents and admins.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::identity::CurrentUser;
use super::mappers::RideMapper;
use crate::backend::AppState;
use shared::UpcomingRidesResponse;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rides/:ride_id/pickup", post(mark_picked_up))
        .route("/rides/:ride_id/dropoff", post(mark_dropped_off))
        .route("/drivers/:driver_id/rides", get(ride_history))
        .route("/drivers/:driver_id/rides/today", get(todays_rides))
        .route("/parents/:parent_id/rides", get(parent_rides))
        .route("/parents/:parent_id/rides/upcoming", get(upcoming_rides))
        .route("/admin/rides", get(recent_rides))
}

pub async fn mark_picked_up(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(ride_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/rides/{}/pickup", ride_id);

    match state.ride_service.mark_picked_up(&actor, &ride_id).await {
        Ok(result) => (StatusCode::OK, Json(RideMapper::to_ride_status_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn mark_dropped_off(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(ride_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/rides/{}/dropoff", ride_id);

    match state.ride_service.mark_dropped_off(&actor, &ride_id).await {
        Ok(result) => (StatusCode::OK, Json(RideMapper::to_ride_status_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn todays_rides(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(driver_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/drivers/{}/rides/today", driver_id);

    match state.ride_service.todays_rides(&actor, &driver_id).await {
        Ok(rides) => (StatusCode::OK, Json(RideMapper::to_ride_list_dto(rides))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn ride_history(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(driver_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/drivers/{}/rides", driver_id);

    match state.ride_service.ride_history(&actor, &driver_id).await {
        Ok(rides) => (StatusCode::OK, Json(RideMapper::to_ride_list_dto(rides))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn parent_rides(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(parent_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/parents/{}/rides", parent_id);

    match state.ride_service.parent_rides(&actor, &parent_id).await {
        Ok(rides) => (StatusCode::OK, Json(RideMapper::to_ride_list_dto(rides))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn upcoming_rides(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(parent_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/parents/{}/rides/upcoming", parent_id);

    match state.ride_service.upcoming_count(&actor, &parent_id).await {
        Ok(upcoming_rides) => {
            let response = UpcomingRidesResponse {
                parent_id,
                upcoming_rides,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn recent_rides(State(state): State<AppState>, CurrentUser(actor): CurrentUser) -> impl IntoResponse {
    info!("GET /api/admin/rides");

    match state.ride_service.recent_rides(&actor).await {
        Ok(rides) => (StatusCode::OK, Json(RideMapper::to_ride_list_dto(rides))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
