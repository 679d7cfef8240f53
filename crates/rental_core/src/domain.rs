//! crates/rental_core/src/domain.rs
//!
//! Defines the pure, core data structures for the marketplace.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

// Represents a marketplace member - used throughout app
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_image: String,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct ProfileCredentials {
    pub profile_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

/// The editable part of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDetails {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub profile_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// A rentable property listed by a host.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub tagline: String,
    pub category: String,
    pub image: String,
    pub country: String,
    pub description: String,
    /// Nightly price in whole currency units.
    pub price: i64,
    pub guests: i32,
    pub bedrooms: i32,
    pub beds: i32,
    pub baths: i32,
    pub amenities: String,
    pub created_at: DateTime<Utc>,
}

/// Host-supplied fields used to create or update a property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDetails {
    pub name: String,
    pub tagline: String,
    pub category: String,
    pub image: String,
    pub country: String,
    pub description: String,
    pub price: i64,
    pub guests: i32,
    pub bedrooms: i32,
    pub beds: i32,
    pub baths: i32,
    pub amenities: String,
}

/// Search parameters for the public property listing.
///
/// An empty `search` matches every property; `category: None` matches every category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub search: String,
    pub category: Option<String>,
}

/// A reservation of a property by a guest.
///
/// `check_in` and `check_out` are calendar days; the stay covers the nights
/// between them. Only bookings with `payment_status == true` block the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_nights: i64,
    pub order_total: i64,
    pub payment_status: bool,
    pub created_at: DateTime<Utc>,
}

/// A booking about to be persisted, with its totals already computed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub profile_id: Uuid,
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_nights: i64,
    pub order_total: i64,
}

/// A paid booking joined with the property it reserves, as shown to guests and hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub booking: Booking,
    pub property_name: String,
    pub property_country: String,
    pub property_price: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub property_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A review together with what is displayed about its author or its property.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewListing {
    pub review: Review,
    /// Author first name for property pages, property name for "my reviews".
    pub title: String,
    /// Author avatar for property pages, property image for "my reviews".
    pub image: String,
}

/// Average rating and review count of a property.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyRating {
    pub rating: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub property_id: Uuid,
}

/// A host's property with the sums of its paid bookings.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalSummary {
    pub property_id: Uuid,
    pub name: String,
    pub price: i64,
    pub total_nights_sum: i64,
    pub order_total_sum: i64,
}

/// Totals across every property a host owns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReservationStats {
    pub properties: i64,
    pub nights: i64,
    pub amount: i64,
}
