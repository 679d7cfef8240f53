//! services/api/src/web/availability.rs
//!
//! Handlers exposing a property's calendar to date pickers.

use crate::web::{
    dto::{DisabledDatesResponse, SelectedRangeDto, SelectionCheckResponse},
    rest::{reject, HandlerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Json,
};
use rental_core::{
    availability::{disabled_dates_for, DisabledDateIndex},
    ports::PortResult,
    selection::validate_selection,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Loads a property's bookings and builds its disabled-date index for today.
///
/// Fails with `NotFound` when the property does not exist.
pub async fn load_disabled_dates(state: &AppState, property_id: Uuid) -> PortResult<DisabledDateIndex> {
    state.db.get_property(property_id).await?;
    let bookings = state.db.list_bookings_for_property(property_id).await?;
    Ok(disabled_dates_for(&bookings, state.today()))
}

#[utoipa::path(
    get,
    path = "/properties/{id}/availability",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Days that cannot be selected", body = DisabledDatesResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn availability_handler(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<DisabledDatesResponse>, HandlerError> {
    let index = load_disabled_dates(&state, property_id)
        .await
        .map_err(|e| reject("Failed to load availability", e))?;
    Ok(Json((&index).into()))
}

/// Validates a tentative selection. A rejected selection comes back empty with a notice.
#[utoipa::path(
    post,
    path = "/properties/{id}/availability/check",
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = SelectedRangeDto,
    responses(
        (status = 200, description = "Validation outcome", body = SelectionCheckResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn check_selection_handler(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
    Json(range): Json<SelectedRangeDto>,
) -> Result<Json<SelectionCheckResponse>, HandlerError> {
    let index = load_disabled_dates(&state, property_id)
        .await
        .map_err(|e| reject("Failed to load availability", e))?;

    let outcome = validate_selection(&index, range.into());
    if !outcome.is_valid() {
        debug!("Rejected selection {:?} for property {}", range, property_id);
    }
    Ok(Json(outcome.into()))
}
