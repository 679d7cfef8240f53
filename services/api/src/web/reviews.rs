//! services/api/src/web/reviews.rs
//!
//! Handlers for property reviews.

use crate::web::{
    dto::{CreateReviewRequest, MessageResponse, ReviewResponse},
    rest::{bad_request, reject, HandlerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use std::sync::Arc;
use uuid::Uuid;

/// Review a property. Hosts cannot review their own listings and each guest reviews a property once.
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review submitted", body = MessageResponse),
        (status = 400, description = "Invalid rating or comment, or own property"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Property already reviewed by the caller")
    )
)]
pub async fn create_review_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    req.validate().map_err(bad_request)?;

    let property = state
        .db
        .get_property(req.property_id)
        .await
        .map_err(|e| reject("Failed to load property", e))?;
    if property.profile_id == profile_id {
        return Err(bad_request("You cannot review your own property".to_string()));
    }

    let existing = state
        .db
        .find_review(profile_id, property.id)
        .await
        .map_err(|e| reject("Failed to look up review", e))?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            "You have already reviewed this property".to_string(),
        ));
    }

    state
        .db
        .create_review(profile_id, property.id, req.rating, req.comment.trim())
        .await
        .map_err(|e| reject("Failed to submit review", e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("review submitted successfully!")),
    ))
}

#[utoipa::path(
    get,
    path = "/properties/{id}/reviews",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Reviews, newest first", body = [ReviewResponse])
    )
)]
pub async fn list_property_reviews_handler(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, HandlerError> {
    let reviews = state
        .db
        .list_reviews_for_property(property_id)
        .await
        .map_err(|e| reject("Failed to list reviews", e))?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "Reviews written by the caller", body = [ReviewResponse])
    )
)]
pub async fn list_my_reviews_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, HandlerError> {
    let reviews = state
        .db
        .list_reviews_by_profile(profile_id)
        .await
        .map_err(|e| reject("Failed to list reviews", e))?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 404, description = "No such review written by the caller")
    )
)]
pub async fn delete_review_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state
        .db
        .delete_review(profile_id, review_id)
        .await
        .map_err(|e| reject("Failed to delete review", e))?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
