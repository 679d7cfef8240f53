//! services/api/src/web/router.rs
//!
//! Assembles the REST and WebSocket routes. CORS, body limits and the Swagger UI
//! are layered on by the binary.

use crate::web::{
    auth::{login_handler, logout_handler, signup_handler},
    availability::{availability_handler, check_selection_handler},
    bookings::{
        confirm_booking_handler, create_booking_handler, delete_booking_handler,
        list_bookings_handler,
    },
    calendar_ws::calendar_ws_handler,
    favorites::{list_favorites_handler, toggle_favorite_handler},
    middleware::require_auth,
    profile::{get_profile_handler, update_profile_handler},
    properties::{
        create_property_handler, delete_property_handler, list_properties_handler,
        property_details_handler, update_property_handler,
    },
    rentals::{
        list_rentals_handler, list_reservations_handler, rental_details_handler,
        reservation_stats_handler,
    },
    reviews::{
        create_review_handler, delete_review_handler, list_my_reviews_handler,
        list_property_reviews_handler,
    },
    state::AppState,
};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn api_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/properties", get(list_properties_handler))
        .route("/properties/{id}", get(property_details_handler))
        .route("/properties/{id}/availability", get(availability_handler))
        .route(
            "/properties/{id}/availability/check",
            post(check_selection_handler),
        )
        .route("/properties/{id}/reviews", get(list_property_reviews_handler))
        .route("/properties/{id}/calendar", get(calendar_ws_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/profile", get(get_profile_handler).put(update_profile_handler))
        .route("/properties", post(create_property_handler))
        .route(
            "/properties/{id}",
            put(update_property_handler).delete(delete_property_handler),
        )
        .route(
            "/bookings",
            post(create_booking_handler).get(list_bookings_handler),
        )
        .route("/bookings/{id}", delete(delete_booking_handler))
        .route("/bookings/{id}/confirm", post(confirm_booking_handler))
        .route("/reviews", post(create_review_handler).get(list_my_reviews_handler))
        .route("/reviews/{id}", delete(delete_review_handler))
        .route("/favorites", get(list_favorites_handler))
        .route("/favorites/toggle", post(toggle_favorite_handler))
        .route("/rentals", get(list_rentals_handler))
        .route("/rentals/{id}", get(rental_details_handler))
        .route("/reservations", get(list_reservations_handler))
        .route("/reservations/stats", get(reservation_stats_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
}
