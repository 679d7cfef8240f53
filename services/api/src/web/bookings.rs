//! services/api/src/web/bookings.rs
//!
//! Handlers for a guest's bookings.

use crate::web::{
    dto::{BookingResponse, CreateBookingRequest, MessageResponse, ReservationResponse},
    rest::{reject, HandlerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use rental_core::booking::{self, NewBookingRequest};
use std::sync::Arc;
use uuid::Uuid;

/// Reserve a property. The booking stays unpaid until it is confirmed.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created, awaiting payment", body = BookingResponse),
        (status = 400, description = "The stay covers no nights or its total is too large"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Some of the dates are unavailable")
    )
)]
pub async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let request = NewBookingRequest {
        profile_id,
        property_id: req.property_id,
        check_in: req.check_in,
        check_out: req.check_out,
    };
    let booking = booking::create_booking(state.db.as_ref(), request, state.today())
        .await
        .map_err(|e| reject("Failed to create booking", e))?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// Paid bookings of the signed-in guest, newest first.
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "The caller's bookings", body = [ReservationResponse])
    )
)]
pub async fn list_bookings_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, HandlerError> {
    let bookings = state
        .db
        .list_bookings_by_profile(profile_id)
        .await
        .map_err(|e| reject("Failed to list bookings", e))?;
    Ok(Json(bookings.into_iter().map(ReservationResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 404, description = "No such booking made by the caller")
    )
)]
pub async fn delete_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state
        .db
        .delete_booking(profile_id, booking_id)
        .await
        .map_err(|e| reject("Failed to delete booking", e))?;
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}

/// Mark a booking as paid once checkout completes.
#[utoipa::path(
    post,
    path = "/bookings/{id}/confirm",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking paid", body = BookingResponse),
        (status = 404, description = "No such booking made by the caller"),
        (status = 409, description = "The dates were paid for by another guest first")
    )
)]
pub async fn confirm_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(profile_id): Extension<Uuid>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let booking = booking::confirm_payment(state.db.as_ref(), profile_id, booking_id, state.today())
        .await
        .map_err(|e| reject("Failed to confirm booking", e))?;
    Ok(Json(booking.into()))
}
