//! crates/rental_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the marketplace's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of a specific data store.

use crate::domain::{
    Booking, Favorite, NewBooking, Profile, ProfileCredentials, ProfileDetails, Property,
    PropertyDetails, PropertyFilter, PropertyRating, RentalSummary, Reservation,
    ReservationStats, Review, ReviewListing,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Owner-scoped operations (`update_property`, `delete_booking`, ...) report
/// `NotFound` when the row does not exist or belongs to someone else.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Profiles & Auth ---
    async fn create_profile(
        &self,
        email: &str,
        hashed_password: &str,
        details: &ProfileDetails,
    ) -> PortResult<Profile>;

    async fn get_profile_by_email(&self, email: &str) -> PortResult<ProfileCredentials>;

    async fn get_profile(&self, profile_id: Uuid) -> PortResult<Profile>;

    async fn update_profile(&self, profile_id: Uuid, details: &ProfileDetails) -> PortResult<Profile>;

    async fn create_auth_session(
        &self,
        session_id: &str,
        profile_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Properties ---
    async fn create_property(&self, owner_id: Uuid, details: &PropertyDetails) -> PortResult<Property>;

    async fn list_properties(&self, filter: &PropertyFilter) -> PortResult<Vec<Property>>;

    async fn get_property(&self, property_id: Uuid) -> PortResult<Property>;

    async fn update_property(
        &self,
        owner_id: Uuid,
        property_id: Uuid,
        details: &PropertyDetails,
    ) -> PortResult<Property>;

    async fn delete_property(&self, owner_id: Uuid, property_id: Uuid) -> PortResult<()>;

    // --- Bookings ---
    async fn list_bookings_for_property(&self, property_id: Uuid) -> PortResult<Vec<Booking>>;

    async fn create_booking(&self, booking: NewBooking) -> PortResult<Booking>;

    /// Removes the profile's abandoned (unpaid) bookings, returning how many were deleted.
    async fn delete_unpaid_bookings(&self, profile_id: Uuid) -> PortResult<u64>;

    /// A booking made by the profile, paid or not.
    async fn get_booking(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<Booking>;

    async fn confirm_booking_payment(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<Booking>;

    /// Paid bookings made by the profile, newest first.
    async fn list_bookings_by_profile(&self, profile_id: Uuid) -> PortResult<Vec<Reservation>>;

    async fn delete_booking(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<()>;

    /// Paid bookings on properties owned by the host, newest first.
    async fn list_reservations_for_host(&self, owner_id: Uuid) -> PortResult<Vec<Reservation>>;

    // --- Reviews ---
    async fn create_review(
        &self,
        profile_id: Uuid,
        property_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> PortResult<Review>;

    async fn find_review(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Option<Review>>;

    async fn list_reviews_for_property(&self, property_id: Uuid) -> PortResult<Vec<ReviewListing>>;

    async fn list_reviews_by_profile(&self, profile_id: Uuid) -> PortResult<Vec<ReviewListing>>;

    async fn delete_review(&self, profile_id: Uuid, review_id: Uuid) -> PortResult<()>;

    async fn property_rating(&self, property_id: Uuid) -> PortResult<PropertyRating>;

    // --- Favorites ---
    async fn find_favorite(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Option<Favorite>>;

    async fn add_favorite(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Favorite>;

    async fn remove_favorite(&self, profile_id: Uuid, favorite_id: Uuid) -> PortResult<()>;

    async fn list_favorites(&self, profile_id: Uuid) -> PortResult<Vec<Property>>;

    // --- Host Dashboard ---
    /// A property as seen by its owner for editing.
    async fn get_rental(&self, owner_id: Uuid, property_id: Uuid) -> PortResult<Property>;

    async fn rental_summaries(&self, owner_id: Uuid) -> PortResult<Vec<RentalSummary>>;

    async fn reservation_stats(&self, owner_id: Uuid) -> PortResult<ReservationStats>;
}
