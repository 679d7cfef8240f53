//! services/api/src/web/rentals.rs
//!
//! The host dashboard: owned properties, their reservations and earnings.

use crate::web::{
    dto::{PropertyResponse, RentalResponse, ReservationResponse, ReservationStatsResponse},
    rest::{reject, HandlerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use std::sync::Arc;
use uuid::Uuid;

/// The caller's properties with the nights and revenue of their paid bookings.
#[utoipa::path(
    get,
    path = "/rentals",
    responses(
        (status = 200, description = "Owned properties with booking sums", body = [RentalResponse])
    )
)]
pub async fn list_rentals_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<Vec<RentalResponse>>, HandlerError> {
    let rentals = state
        .db
        .rental_summaries(profile_id)
        .await
        .map_err(|e| reject("Failed to list rentals", e))?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

/// An owned property, for editing.
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "The property", body = PropertyResponse),
        (status = 404, description = "No such property owned by the caller")
    )
)]
pub async fn rental_details_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, HandlerError> {
    let property = state
        .db
        .get_rental(profile_id, property_id)
        .await
        .map_err(|e| reject("Failed to load rental", e))?;
    Ok(Json(property.into()))
}

/// Paid bookings made on the caller's properties, newest first.
#[utoipa::path(
    get,
    path = "/reservations",
    responses(
        (status = 200, description = "Reservations of owned properties", body = [ReservationResponse])
    )
)]
pub async fn list_reservations_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, HandlerError> {
    let reservations = state
        .db
        .list_reservations_for_host(profile_id)
        .await
        .map_err(|e| reject("Failed to list reservations", e))?;
    Ok(Json(
        reservations.into_iter().map(ReservationResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/reservations/stats",
    responses(
        (status = 200, description = "Totals across owned properties", body = ReservationStatsResponse)
    )
)]
pub async fn reservation_stats_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<ReservationStatsResponse>, HandlerError> {
    let stats = state
        .db
        .reservation_stats(profile_id)
        .await
        .map_err(|e| reject("Failed to load reservation stats", e))?;
    Ok(Json(stats.into()))
}
