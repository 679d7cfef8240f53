//! services/api/src/web/favorites.rs

use crate::web::{
    dto::{PropertyCard, ToggleFavoriteRequest, ToggleFavoriteResponse},
    rest::{reject, HandlerError},
    state::AppState,
};
use axum::{extract::State, response::Json, Extension};
use std::sync::Arc;
use uuid::Uuid;

/// Add the property to the caller's favorites, or remove it if it is already there.
#[utoipa::path(
    post,
    path = "/favorites/toggle",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 200, description = "Favorite toggled", body = ToggleFavoriteResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn toggle_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Json(req): Json<ToggleFavoriteRequest>,
) -> Result<Json<ToggleFavoriteResponse>, HandlerError> {
    let existing = state
        .db
        .find_favorite(profile_id, req.property_id)
        .await
        .map_err(|e| reject("Failed to look up favorite", e))?;

    let response = match existing {
        Some(favorite) => {
            state
                .db
                .remove_favorite(profile_id, favorite.id)
                .await
                .map_err(|e| reject("Failed to remove favorite", e))?;
            ToggleFavoriteResponse {
                favorite_id: None,
                message: "Removed from Faves".to_string(),
            }
        }
        None => {
            let favorite = state
                .db
                .add_favorite(profile_id, req.property_id)
                .await
                .map_err(|e| reject("Failed to add favorite", e))?;
            ToggleFavoriteResponse {
                favorite_id: Some(favorite.id),
                message: "Added to Faves".to_string(),
            }
        }
    };
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/favorites",
    responses(
        (status = 200, description = "The caller's favorite properties", body = [PropertyCard])
    )
)]
pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<Vec<PropertyCard>>, HandlerError> {
    let favorites = state
        .db
        .list_favorites(profile_id)
        .await
        .map_err(|e| reject("Failed to list favorites", e))?;
    Ok(Json(favorites.into_iter().map(PropertyCard::from).collect()))
}
