//! # REST API for Driver Assignment
//!
//! Admin-only endpoints backing the assignment table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::identity::CurrentUser;
use super::mappers::{ChildMapper, ProfileMapper};
use crate::backend::domain::commands::assignment::AssignDriverCommand;
use crate::backend::AppState;
use shared::{AssignDriverRequest, DriverListResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/children", get(list_children))
        .route("/admin/drivers", get(list_eligible_drivers))
        .route("/admin/children/:child_id/driver", put(assign_driver))
}

/// Every child with parent and driver names
pub async fn list_children(State(state): State<AppState>, CurrentUser(actor): CurrentUser) -> impl IntoResponse {
    info!("GET /api/admin/children");

    match state.assignment_service.list_children(&actor).await {
        Ok(views) => (StatusCode::OK, Json(ChildMapper::to_assignment_list_dto(views))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_eligible_drivers(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/admin/drivers");

    match state.assignment_service.list_eligible_drivers(&actor).await {
        Ok(drivers) => {
            let response = DriverListResponse {
                drivers: drivers.into_iter().map(ProfileMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Set (`{"driver_id": "..."}`) or clear (`{"driver_id": null}`) a child's driver
pub async fn assign_driver(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(child_id): Path<String>,
    Json(request): Json<AssignDriverRequest>,
) -> impl IntoResponse {
    info!("PUT /api/admin/children/{}/driver - request: {:?}", child_id, request);

    let command = AssignDriverCommand {
        child_id,
        driver_id: request.driver_id,
    };

    match state.assignment_service.assign(&actor, command).await {
        Ok(result) => (StatusCode::OK, Json(ChildMapper::to_assign_driver_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
