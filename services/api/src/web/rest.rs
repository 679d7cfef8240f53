//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification and the error mapping
//! shared by every REST handler.

use crate::error::ApiError;
use crate::web::{
    auth, availability, bookings, dto, favorites, profile, properties, rentals, reviews,
};
use axum::http::StatusCode;
use tracing::{error, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        properties::list_properties_handler,
        properties::property_details_handler,
        properties::create_property_handler,
        properties::update_property_handler,
        properties::delete_property_handler,
        profile::get_profile_handler,
        profile::update_profile_handler,
        availability::availability_handler,
        availability::check_selection_handler,
        bookings::create_booking_handler,
        bookings::list_bookings_handler,
        bookings::delete_booking_handler,
        bookings::confirm_booking_handler,
        reviews::create_review_handler,
        reviews::list_property_reviews_handler,
        reviews::list_my_reviews_handler,
        reviews::delete_review_handler,
        favorites::toggle_favorite_handler,
        favorites::list_favorites_handler,
        rentals::list_rentals_handler,
        rentals::rental_details_handler,
        rentals::list_reservations_handler,
        rentals::reservation_stats_handler,
    ),
    components(
        schemas(
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            dto::ProfileRequest,
            dto::ProfileResponse,
            dto::PropertyRequest,
            dto::PropertyResponse,
            dto::PropertyCard,
            dto::HostResponse,
            dto::PropertyDetailsResponse,
            dto::DisabledDatesResponse,
            dto::SelectedRangeDto,
            dto::SelectionCheckResponse,
            dto::CreateBookingRequest,
            dto::BookingResponse,
            dto::ReservationResponse,
            dto::CreateReviewRequest,
            dto::ReviewResponse,
            dto::RatingResponse,
            dto::ToggleFavoriteRequest,
            dto::ToggleFavoriteResponse,
            dto::RentalResponse,
            dto::ReservationStatsResponse,
            dto::MessageResponse,
        )
    ),
    tags(
        (name = "Rental Marketplace API", description = "Listings, bookings, reviews, favorites and the host dashboard.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

/// The error half of every REST handler's return type.
pub type HandlerError = (StatusCode, String);

/// Logs a failed operation and turns it into a response.
///
/// Server-side failures only expose `context`; client errors expose their message.
pub fn reject(context: &str, err: impl Into<ApiError>) -> HandlerError {
    let err = err.into();
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}: {:?}", context, err);
        return (status, context.to_string());
    }

    let message = match err {
        ApiError::Port(e) => e.to_string(),
        ApiError::Booking(e) => e.to_string(),
        other => other.to_string(),
    };
    warn!("{}: {}", context, message);
    (status, message)
}

/// A `400 Bad Request` for payloads that fail validation.
pub fn bad_request(message: String) -> HandlerError {
    (StatusCode::BAD_REQUEST, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rental_core::{booking::BookingError, ports::PortError};

    #[test]
    fn not_found_keeps_its_message() {
        let (status, message) = reject(
            "Failed to load property",
            PortError::NotFound("Property 1 not found".to_string()),
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Item not found: Property 1 not found");
    }

    #[test]
    fn unexpected_errors_hide_details() {
        let (status, message) = reject(
            "Failed to list bookings",
            PortError::Unexpected("connection reset".to_string()),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Failed to list bookings");
    }

    #[test]
    fn booking_rejections_map_to_client_errors() {
        let (status, _) = reject("Failed", BookingError::InvalidStay { total_nights: 0 });
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = reject("Failed", BookingError::OrderTotalTooLarge);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let day = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let (status, message) = reject(
            "Failed",
            BookingError::DatesUnavailable {
                conflicts: vec![day],
            },
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(message.contains("2024-05-12"));
    }
}
