pub mod auth;
pub mod availability;
pub mod bookings;
pub mod calendar_ws;
pub mod dto;
pub mod favorites;
pub mod middleware;
pub mod profile;
pub mod properties;
pub mod protocol;
pub mod rentals;
pub mod rest;
pub mod router;
pub mod reviews;
pub mod state;

// Re-exported for the binary that builds the router.
pub use calendar_ws::calendar_ws_handler;
pub use middleware::require_auth;
pub use router::api_router;
