//! services/api/src/web/dto.rs
//!
//! Request and response payloads of the REST API, and their conversions to
//! and from the core domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rental_core::{
    availability::{DisabledDateIndex, SelectedRange},
    domain::{
        Booking, Profile, ProfileDetails, Property, PropertyDetails, PropertyRating,
        RentalSummary, Reservation, ReservationStats, ReviewListing,
    },
    pricing::MAX_NIGHTLY_PRICE,
    selection::SelectionOutcome,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

//=========================================================================================
// Profiles
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct ProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl ProfileRequest {
    pub fn into_details(self) -> Result<ProfileDetails, String> {
        let details = ProfileDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
        };
        if details.first_name.len() < 2 || details.last_name.len() < 2 || details.username.len() < 2 {
            return Err("First name, last name and username need at least 2 characters".to_string());
        }
        Ok(details)
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_image: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            username: profile.username,
            profile_image: profile.profile_image,
        }
    }
}

//=========================================================================================
// Properties
//=========================================================================================

#[derive(Deserialize, ToSchema, Clone)]
pub struct PropertyRequest {
    pub name: String,
    pub tagline: String,
    pub category: String,
    /// URL of an already uploaded image.
    pub image: String,
    pub country: String,
    pub description: String,
    pub price: i64,
    pub guests: i32,
    pub bedrooms: i32,
    pub beds: i32,
    pub baths: i32,
    #[serde(default)]
    pub amenities: String,
}

impl PropertyRequest {
    pub fn into_details(self) -> Result<PropertyDetails, String> {
        if self.name.trim().len() < 2 {
            return Err("Name must be at least 2 characters".to_string());
        }
        if !(0..=MAX_NIGHTLY_PRICE).contains(&self.price) {
            return Err(format!("Price must be between 0 and {}", MAX_NIGHTLY_PRICE));
        }
        if [self.guests, self.bedrooms, self.beds, self.baths]
            .iter()
            .any(|count| *count < 0)
        {
            return Err("Room and guest counts cannot be negative".to_string());
        }
        Ok(PropertyDetails {
            name: self.name.trim().to_string(),
            tagline: self.tagline,
            category: self.category,
            image: self.image,
            country: self.country,
            description: self.description,
            price: self.price,
            guests: self.guests,
            bedrooms: self.bedrooms,
            beds: self.beds,
            baths: self.baths,
            amenities: self.amenities,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct PropertyResponse {
    pub id: Uuid,
    pub profile_id: Uuid,
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
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            profile_id: p.profile_id,
            name: p.name,
            tagline: p.tagline,
            category: p.category,
            image: p.image,
            country: p.country,
            description: p.description,
            price: p.price,
            guests: p.guests,
            bedrooms: p.bedrooms,
            beds: p.beds,
            baths: p.baths,
            amenities: p.amenities,
            created_at: p.created_at,
        }
    }
}

/// The compact form used by listings and favorites.
#[derive(Serialize, ToSchema)]
pub struct PropertyCard {
    pub id: Uuid,
    pub name: String,
    pub tagline: String,
    pub country: String,
    pub price: i64,
    pub image: String,
}

impl From<Property> for PropertyCard {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            name: p.name,
            tagline: p.tagline,
            country: p.country,
            price: p.price,
            image: p.image,
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct PropertyQuery {
    /// Case-insensitive match on name or tagline.
    pub search: Option<String>,
    pub category: Option<String>,
}

/// What a property page shows about its host.
#[derive(Serialize, ToSchema)]
pub struct HostResponse {
    pub first_name: String,
    pub profile_image: String,
}

impl From<Profile> for HostResponse {
    fn from(profile: Profile) -> Self {
        Self {
            first_name: profile.first_name,
            profile_image: profile.profile_image,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PropertyDetailsResponse {
    pub property: PropertyResponse,
    pub host: HostResponse,
    pub rating: RatingResponse,
    pub availability: DisabledDatesResponse,
}

//=========================================================================================
// Availability
//=========================================================================================

/// The disabled days of a property's calendar.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct DisabledDatesResponse {
    /// Every day strictly before this one is disabled.
    pub before: Option<NaiveDate>,
    /// Further disabled days, ascending.
    pub dates: Vec<NaiveDate>,
}

impl From<&DisabledDateIndex> for DisabledDatesResponse {
    fn from(index: &DisabledDateIndex) -> Self {
        Self {
            before: index.before(),
            dates: index.dates().collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectedRangeDto {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl From<SelectedRangeDto> for SelectedRange {
    fn from(dto: SelectedRangeDto) -> Self {
        SelectedRange {
            from: dto.from,
            to: dto.to,
        }
    }
}

impl From<SelectedRange> for SelectedRangeDto {
    fn from(range: SelectedRange) -> Self {
        Self {
            from: range.from,
            to: range.to,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct SelectionCheckResponse {
    pub valid: bool,
    /// The selection to keep: the submitted range, or an empty one when it was rejected.
    pub range: SelectedRangeDto,
    pub notice: Option<String>,
}

impl From<SelectionOutcome> for SelectionCheckResponse {
    fn from(outcome: SelectionOutcome) -> Self {
        Self {
            valid: outcome.is_valid(),
            range: outcome.range().into(),
            notice: outcome.notice().map(str::to_string),
        }
    }
}

//=========================================================================================
// Bookings
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_nights: i64,
    pub order_total: i64,
    pub payment_status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            property_id: b.property_id,
            check_in: b.check_in,
            check_out: b.check_out,
            total_nights: b.total_nights,
            order_total: b.order_total,
            payment_status: b.payment_status,
            created_at: b.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReservationResponse {
    pub booking: BookingResponse,
    pub property_name: String,
    pub property_country: String,
    pub property_price: i64,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            booking: r.booking.into(),
            property_name: r.property_name,
            property_country: r.property_country,
            property_price: r.property_price,
        }
    }
}

//=========================================================================================
// Reviews & Favorites
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub property_id: Uuid,
    /// 1 to 5 stars.
    pub rating: i32,
    pub comment: String,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=5).contains(&self.rating) {
            return Err("Rating must be between 1 and 5".to_string());
        }
        let len = self.comment.trim().chars().count();
        if !(10..=1000).contains(&len) {
            return Err("Comment must be between 10 and 1000 characters".to_string());
        }
        Ok(())
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub property_id: Uuid,
    pub rating: i32,
    pub comment: String,
    /// Author first name, or property name when listing one's own reviews.
    pub title: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewListing> for ReviewResponse {
    fn from(listing: ReviewListing) -> Self {
        Self {
            id: listing.review.id,
            property_id: listing.review.property_id,
            rating: listing.review.rating,
            comment: listing.review.comment,
            title: listing.title,
            image: listing.image,
            created_at: listing.review.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct RatingResponse {
    pub rating: f64,
    pub count: i64,
}

impl From<PropertyRating> for RatingResponse {
    fn from(r: PropertyRating) -> Self {
        Self {
            rating: r.rating,
            count: r.count,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ToggleFavoriteRequest {
    pub property_id: Uuid,
}

#[derive(Serialize, ToSchema)]
pub struct ToggleFavoriteResponse {
    /// The new favorite, or `None` when it was removed.
    pub favorite_id: Option<Uuid>,
    pub message: String,
}

//=========================================================================================
// Host Dashboard
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct RentalResponse {
    pub property_id: Uuid,
    pub name: String,
    pub price: i64,
    pub total_nights_sum: i64,
    pub order_total_sum: i64,
}

impl From<RentalSummary> for RentalResponse {
    fn from(r: RentalSummary) -> Self {
        Self {
            property_id: r.property_id,
            name: r.name,
            price: r.price,
            total_nights_sum: r.total_nights_sum,
            order_total_sum: r.order_total_sum,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReservationStatsResponse {
    pub properties: i64,
    pub nights: i64,
    pub amount: i64,
}

impl From<ReservationStats> for ReservationStatsResponse {
    fn from(s: ReservationStats) -> Self {
        Self {
            properties: s.properties,
            nights: s.nights,
            amount: s.amount,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property_request(price: i64) -> PropertyRequest {
        PropertyRequest {
            name: "Cabin".to_string(),
            tagline: "Quiet".to_string(),
            category: "cabin".to_string(),
            image: "https://img.example.com/cabin.jpg".to_string(),
            country: "NO".to_string(),
            description: "A small cabin.".to_string(),
            price,
            guests: 2,
            bedrooms: 1,
            beds: 1,
            baths: 1,
            amenities: String::new(),
        }
    }

    #[test]
    fn price_must_stay_within_bounds() {
        assert!(property_request(0).into_details().is_ok());
        assert!(property_request(MAX_NIGHTLY_PRICE).into_details().is_ok());
        assert!(property_request(-1).into_details().is_err());
        assert!(property_request(MAX_NIGHTLY_PRICE + 1).into_details().is_err());
        assert!(property_request(i64::MAX / 2 + 1).into_details().is_err());
    }

    #[test]
    fn review_rating_and_comment_are_validated() {
        let review = |rating, comment: &str| CreateReviewRequest {
            property_id: Uuid::new_v4(),
            rating,
            comment: comment.to_string(),
        };
        assert!(review(5, "Lovely place to stay").validate().is_ok());
        assert!(review(0, "Lovely place to stay").validate().is_err());
        assert!(review(4, "Too short").validate().is_err());
    }
}
