//! services/api/src/web/profile.rs
//!
//! Handlers for the signed-in profile.

use crate::web::{
    dto::{ProfileRequest, ProfileResponse},
    rest::{bad_request, reject, HandlerError},
    state::AppState,
};
use axum::{extract::State, response::Json, Extension};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "The signed-in profile", body = ProfileResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<ProfileResponse>, HandlerError> {
    let profile = state
        .db
        .get_profile(profile_id)
        .await
        .map_err(|e| reject("Failed to load profile", e))?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    put,
    path = "/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid profile details"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, HandlerError> {
    let details = req.into_details().map_err(bad_request)?;
    let profile = state
        .db
        .update_profile(profile_id, &details)
        .await
        .map_err(|e| reject("Failed to update profile", e))?;
    Ok(Json(profile.into()))
}
