//! services/api/src/web/properties.rs
//!
//! Handlers for browsing and managing property listings.

use crate::web::{
    dto::{
        MessageResponse, PropertyCard, PropertyDetailsResponse, PropertyQuery, PropertyRequest,
        PropertyResponse,
    },
    rest::{bad_request, reject, HandlerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use rental_core::{availability::disabled_dates_for, domain::PropertyFilter};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// List properties, newest first.
#[utoipa::path(
    get,
    path = "/properties",
    params(PropertyQuery),
    responses(
        (status = 200, description = "Matching properties", body = [PropertyCard])
    )
)]
pub async fn list_properties_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PropertyQuery>,
) -> Result<Json<Vec<PropertyCard>>, HandlerError> {
    let filter = PropertyFilter {
        search: query.search.unwrap_or_default(),
        category: query.category.filter(|c| !c.is_empty()),
    };
    let properties = state
        .db
        .list_properties(&filter)
        .await
        .map_err(|e| reject("Failed to list properties", e))?;
    Ok(Json(properties.into_iter().map(PropertyCard::from).collect()))
}

/// A property with its rating and the days that can no longer be booked.
#[utoipa::path(
    get,
    path = "/properties/{id}",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property details", body = PropertyDetailsResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn property_details_handler(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<PropertyDetailsResponse>, HandlerError> {
    let property = state
        .db
        .get_property(property_id)
        .await
        .map_err(|e| reject("Failed to load property", e))?;
    let host = state
        .db
        .get_profile(property.profile_id)
        .await
        .map_err(|e| reject("Failed to load host", e))?;
    let rating = state
        .db
        .property_rating(property_id)
        .await
        .map_err(|e| reject("Failed to load rating", e))?;
    let bookings = state
        .db
        .list_bookings_for_property(property_id)
        .await
        .map_err(|e| reject("Failed to load bookings", e))?;

    let index = disabled_dates_for(&bookings, state.today());
    Ok(Json(PropertyDetailsResponse {
        property: property.into(),
        host: host.into(),
        rating: rating.into(),
        availability: (&index).into(),
    }))
}

#[utoipa::path(
    post,
    path = "/properties",
    request_body = PropertyRequest,
    responses(
        (status = 201, description = "Property created", body = PropertyResponse),
        (status = 400, description = "Invalid property details"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn create_property_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Json(req): Json<PropertyRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let details = req.into_details().map_err(bad_request)?;
    let property = state
        .db
        .create_property(profile_id, &details)
        .await
        .map_err(|e| reject("Failed to create property", e))?;

    info!("Profile {} listed property {}", profile_id, property.id);
    Ok((StatusCode::CREATED, Json(PropertyResponse::from(property))))
}

#[utoipa::path(
    put,
    path = "/properties/{id}",
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = PropertyResponse),
        (status = 404, description = "No such property owned by the caller")
    )
)]
pub async fn update_property_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Path(property_id): Path<Uuid>,
    Json(req): Json<PropertyRequest>,
) -> Result<Json<PropertyResponse>, HandlerError> {
    let details = req.into_details().map_err(bad_request)?;
    let property = state
        .db
        .update_property(profile_id, property_id, &details)
        .await
        .map_err(|e| reject("Failed to update property", e))?;
    Ok(Json(property.into()))
}

#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property deleted", body = MessageResponse),
        (status = 404, description = "No such property owned by the caller")
    )
)]
pub async fn delete_property_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state
        .db
        .delete_property(profile_id, property_id)
        .await
        .map_err(|e| reject("Failed to delete property", e))?;

    info!("Profile {} deleted property {}", profile_id, property_id);
    Ok(Json(MessageResponse::new("Rental deleted successfully!")))
}
