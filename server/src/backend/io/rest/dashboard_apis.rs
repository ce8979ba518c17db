use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::identity::CurrentUser;
use super::mappers::DashboardMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// The caller's role-specific dashboard
pub async fn get_dashboard(State(state): State<AppState>, CurrentUser(actor): CurrentUser) -> impl IntoResponse {
    info!("GET /api/dashboard - {} {}", actor.role, actor.id);

    match state.dashboard_service.dashboard(&actor).await {
        Ok(view) => (StatusCode::OK, Json(DashboardMapper::to_dto(view))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
