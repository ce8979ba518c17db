//! # REST API for Profiles
//!
//! Signup, the caller's own profile, and the admin user list.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::identity::CurrentUser;
use super::mappers::ProfileMapper;
use crate::backend::AppState;
use shared::CreateProfileRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", post(register_profile))
        .route("/me", get(get_me))
        .route("/admin/profiles", get(list_profiles))
}

/// Sign up. Needs no credential.
pub async fn register_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles - role: {:?}", request.role);

    let command = ProfileMapper::to_register_command(request);
    match state.profile_service.register_profile(command).await {
        Ok(profile) => {
            let response = ProfileMapper::to_profile_response_dto(profile, "Profile created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_me(State(state): State<AppState>, CurrentUser(actor): CurrentUser) -> impl IntoResponse {
    info!("GET /api/me - {}", actor.id);

    match state.profile_service.get_profile(&actor.id).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileMapper::to_dto(profile))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_profiles(State(state): State<AppState>, CurrentUser(actor): CurrentUser) -> impl IntoResponse {
    info!("GET /api/admin/profiles");

    match state.profile_service.list_profiles(&actor).await {
        Ok(profiles) => (StatusCode::OK, Json(ProfileMapper::to_profile_list_dto(profiles))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
