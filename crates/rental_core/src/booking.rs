//! crates/rental_core/src/booking.rs
//!
//! The booking-creation workflow: prices a requested stay, checks it against
//! the property's calendar and persists it as an unpaid booking awaiting checkout.

use crate::{
    availability::{disabled_dates_for, expand_range_to_dates, SelectedRange},
    domain::{Booking, NewBooking},
    ports::{DatabaseService, PortError},
    pricing::calculate_totals,
};
use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBookingRequest {
    pub profile_id: Uuid,
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Property {0} not found")]
    PropertyNotFound(Uuid),

    /// The stay covers zero or fewer nights.
    #[error("A stay must last at least one night (got {total_nights})")]
    InvalidStay { total_nights: i64 },

    #[error("Some of the requested dates are unavailable: {}", format_days(.conflicts))]
    DatesUnavailable { conflicts: Vec<NaiveDate> },

    #[error("The order total of this stay is too large")]
    OrderTotalTooLarge,

    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),
}

fn format_days(days: &[NaiveDate]) -> String {
    days.iter()
        .map(|day| day.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Creates an unpaid booking for the requested stay.
///
/// The requesting profile's earlier unpaid bookings are purged first. The stay
/// is rejected when it covers no nights or when any of its days, checkout
/// included, is already blocked as seen on `today`.
pub async fn create_booking(
    db: &dyn DatabaseService,
    request: NewBookingRequest,
    today: NaiveDate,
) -> Result<Booking, BookingError> {
    let purged = db.delete_unpaid_bookings(request.profile_id).await?;
    if purged > 0 {
        debug!(
            "Purged {} unpaid booking(s) for profile {}",
            purged, request.profile_id
        );
    }

    let property = db
        .get_property(request.property_id)
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => BookingError::PropertyNotFound(request.property_id),
            other => BookingError::Port(other),
        })?;

    let totals = calculate_totals(request.check_in, request.check_out, property.price);
    if !totals.is_valid_stay() {
        return Err(BookingError::InvalidStay {
            total_nights: totals.total_nights,
        });
    }
    if totals.is_saturated() {
        return Err(BookingError::OrderTotalTooLarge);
    }

    let existing = db.list_bookings_for_property(property.id).await?;
    ensure_available(&existing, request.check_in, request.check_out, today)?;

    let booking = db
        .create_booking(NewBooking {
            profile_id: request.profile_id,
            property_id: property.id,
            check_in: request.check_in,
            check_out: request.check_out,
            total_nights: totals.total_nights,
            order_total: totals.order_total,
        })
        .await?;

    info!(
        "Created booking {} for property {} ({} nights, total {})",
        booking.id, booking.property_id, booking.total_nights, booking.order_total
    );
    Ok(booking)
}

/// Marks a booking as paid once checkout succeeds.
///
/// Unpaid bookings never block each other, so the stay is checked again
/// against the property's other paid bookings before it is confirmed. The
/// booking's days become blocked for everyone else from this point on.
/// Confirming an already paid booking returns it unchanged.
pub async fn confirm_payment(
    db: &dyn DatabaseService,
    profile_id: Uuid,
    booking_id: Uuid,
    today: NaiveDate,
) -> Result<Booking, BookingError> {
    let booking = db.get_booking(profile_id, booking_id).await?;
    if booking.payment_status {
        return Ok(booking);
    }

    let others: Vec<Booking> = db
        .list_bookings_for_property(booking.property_id)
        .await?
        .into_iter()
        .filter(|other| other.id != booking.id)
        .collect();
    ensure_available(&others, booking.check_in, booking.check_out, today)?;

    let booking = db.confirm_booking_payment(profile_id, booking_id).await?;
    info!("Payment confirmed for booking {}", booking.id);
    Ok(booking)
}

/// Fails with the requested days, checkout included, that `bookings` already block on `today`.
fn ensure_available(
    bookings: &[Booking],
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<(), BookingError> {
    let index = disabled_dates_for(bookings, today);
    let conflicts: Vec<NaiveDate> = expand_range_to_dates(&SelectedRange::new(check_in, check_out))
        .into_iter()
        .filter(|day| index.contains(*day))
        .collect();
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(BookingError::DatesUnavailable { conflicts })
    }
}
