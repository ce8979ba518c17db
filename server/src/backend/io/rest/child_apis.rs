//! # REST API for Child Management
//!
//! Parents register and list their children; drivers list the children
//! assigned to them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::identity::CurrentUser;
use super::mappers::ChildMapper;
use crate::backend::AppState;
use shared::CreateChildRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/children", get(list_my_children).post(create_child))
        .route("/drivers/:driver_id/children", get(list_assigned_children))
}

/// Register a child for the calling parent
pub async fn create_child(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(request): Json<CreateChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - request: {:?}", request);

    let command = ChildMapper::to_register_command(request);
    match state.child_service.register_child(&actor, command).await {
        Ok(child) => {
            let response = ChildMapper::to_child_response_dto(child, "Child added successfully!");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// The calling parent's children
pub async fn list_my_children(State(state): State<AppState>, CurrentUser(actor): CurrentUser) -> impl IntoResponse {
    info!("GET /api/children - parent {}", actor.id);

    match state.child_service.children_for_parent(&actor, &actor.id).await {
        Ok(children) => (StatusCode::OK, Json(ChildMapper::to_child_list_dto(children))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_assigned_children(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(driver_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/drivers/{}/children", driver_id);

    match state.child_service.assigned_children(&actor, &driver_id).await {
        Ok(views) => (StatusCode::OK, Json(ChildMapper::to_assigned_children_dto(views))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
