//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the `DatabaseService` port.
//!
//! Selected with `DATABASE_URL=memory` for local runs without PostgreSQL, and
//! used by the integration tests. Everything is lost when the process exits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rental_core::domain::{
    Booking, Favorite, NewBooking, Profile, ProfileCredentials, ProfileDetails, Property,
    PropertyDetails, PropertyFilter, PropertyRating, RentalSummary, Reservation,
    ReservationStats, Review, ReviewListing,
};
use rental_core::ports::{DatabaseService, PortError, PortResult};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Store {
    profiles: HashMap<Uuid, Profile>,
    passwords: HashMap<Uuid, String>,
    sessions: HashMap<String, (Uuid, DateTime<Utc>)>,
    properties: Vec<Property>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
    favorites: Vec<Favorite>,
}

impl Store {
    fn property(&self, property_id: Uuid) -> PortResult<&Property> {
        self.properties
            .iter()
            .find(|p| p.id == property_id)
            .ok_or_else(|| PortError::NotFound(format!("Property {} not found", property_id)))
    }

    fn reservation(&self, booking: &Booking) -> Option<Reservation> {
        let property = self.property(booking.property_id).ok()?;
        Some(Reservation {
            booking: booking.clone(),
            property_name: property.name.clone(),
            property_country: property.country.clone(),
            property_price: property.price,
        })
    }

    fn paid_bookings_of(&self, property_id: Uuid) -> impl Iterator<Item = &Booking> {
        self.bookings
            .iter()
            .filter(move |b| b.property_id == property_id && b.payment_status)
    }
}

/// Newest first, matching the ordering of the PostgreSQL adapter.
fn newest_first<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[derive(Default)]
pub struct MemoryAdapter {
    store: RwLock<Store>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for MemoryAdapter {
    async fn create_profile(
        &self,
        email: &str,
        hashed_password: &str,
        details: &ProfileDetails,
    ) -> PortResult<Profile> {
        let mut store = self.store.write().await;
        if store
            .profiles
            .values()
            .any(|p| p.email == email || p.username == details.username)
        {
            return Err(PortError::Conflict(format!("Profile {} already exists", email)));
        }
        let profile = Profile {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: details.first_name.clone(),
            last_name: details.last_name.clone(),
            username: details.username.clone(),
            profile_image: String::new(),
        };
        store.passwords.insert(profile.id, hashed_password.to_string());
        store.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn get_profile_by_email(&self, email: &str) -> PortResult<ProfileCredentials> {
        let store = self.store.read().await;
        let profile = store
            .profiles
            .values()
            .find(|p| p.email == email)
            .ok_or_else(|| PortError::NotFound(format!("Profile with email {} not found", email)))?;
        let hashed_password = store
            .passwords
            .get(&profile.id)
            .cloned()
            .ok_or_else(|| PortError::Unexpected("Profile has no password".to_string()))?;
        Ok(ProfileCredentials {
            profile_id: profile.id,
            email: profile.email.clone(),
            hashed_password,
        })
    }

    async fn get_profile(&self, profile_id: Uuid) -> PortResult<Profile> {
        self.store
            .read()
            .await
            .profiles
            .get(&profile_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Profile {} not found", profile_id)))
    }

    async fn update_profile(&self, profile_id: Uuid, details: &ProfileDetails) -> PortResult<Profile> {
        let mut store = self.store.write().await;
        let profile = store
            .profiles
            .get_mut(&profile_id)
            .ok_or_else(|| PortError::NotFound(format!("Profile {} not found", profile_id)))?;
        profile.first_name = details.first_name.clone();
        profile.last_name = details.last_name.clone();
        profile.username = details.username.clone();
        Ok(profile.clone())
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        profile_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        self.store
            .write()
            .await
            .sessions
            .insert(session_id.to_string(), (profile_id, expires_at));
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        match self.store.read().await.sessions.get(session_id) {
            Some((profile_id, expires_at)) if *expires_at > Utc::now() => Ok(*profile_id),
            _ => Err(PortError::Unauthorized),
        }
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.store.write().await.sessions.remove(session_id);
        Ok(())
    }

    async fn create_property(&self, owner_id: Uuid, details: &PropertyDetails) -> PortResult<Property> {
        let property = Property {
            id: Uuid::new_v4(),
            profile_id: owner_id,
            name: details.name.clone(),
            tagline: details.tagline.clone(),
            category: details.category.clone(),
            image: details.image.clone(),
            country: details.country.clone(),
            description: details.description.clone(),
            price: details.price,
            guests: details.guests,
            bedrooms: details.bedrooms,
            beds: details.beds,
            baths: details.baths,
            amenities: details.amenities.clone(),
            created_at: Utc::now(),
        };
        self.store.write().await.properties.push(property.clone());
        Ok(property)
    }

    async fn list_properties(&self, filter: &PropertyFilter) -> PortResult<Vec<Property>> {
        let search = filter.search.to_lowercase();
        let store = self.store.read().await;
        let matches = store
            .properties
            .iter()
            .filter(|p| filter.category.as_ref().map_or(true, |c| &p.category == c))
            .filter(|p| {
                p.name.to_lowercase().contains(&search) || p.tagline.to_lowercase().contains(&search)
            })
            .cloned()
            .collect();
        Ok(newest_first(matches, |p: &Property| p.created_at))
    }

    async fn get_property(&self, property_id: Uuid) -> PortResult<Property> {
        self.store.read().await.property(property_id).cloned()
    }

    async fn update_property(
        &self,
        owner_id: Uuid,
        property_id: Uuid,
        details: &PropertyDetails,
    ) -> PortResult<Property> {
        let mut store = self.store.write().await;
        let property = store
            .properties
            .iter_mut()
            .find(|p| p.id == property_id && p.profile_id == owner_id)
            .ok_or_else(|| PortError::NotFound(format!("Property {} not found", property_id)))?;
        property.name = details.name.clone();
        property.tagline = details.tagline.clone();
        property.category = details.category.clone();
        property.image = details.image.clone();
        property.country = details.country.clone();
        property.description = details.description.clone();
        property.price = details.price;
        property.guests = details.guests;
        property.bedrooms = details.bedrooms;
        property.beds = details.beds;
        property.baths = details.baths;
        property.amenities = details.amenities.clone();
        Ok(property.clone())
    }

    async fn delete_property(&self, owner_id: Uuid, property_id: Uuid) -> PortResult<()> {
        let mut store = self.store.write().await;
        let before = store.properties.len();
        store
            .properties
            .retain(|p| !(p.id == property_id && p.profile_id == owner_id));
        if store.properties.len() == before {
            return Err(PortError::NotFound(format!("Property {} not found", property_id)));
        }
        store.bookings.retain(|b| b.property_id != property_id);
        store.reviews.retain(|r| r.property_id != property_id);
        store.favorites.retain(|f| f.property_id != property_id);
        Ok(())
    }

    async fn list_bookings_for_property(&self, property_id: Uuid) -> PortResult<Vec<Booking>> {
        let store = self.store.read().await;
        let mut bookings: Vec<Booking> = store
            .bookings
            .iter()
            .filter(|b| b.property_id == property_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.check_in);
        Ok(bookings)
    }

    async fn create_booking(&self, booking: NewBooking) -> PortResult<Booking> {
        let mut store = self.store.write().await;
        store.property(booking.property_id)?;
        let booking = Booking {
            id: Uuid::new_v4(),
            profile_id: booking.profile_id,
            property_id: booking.property_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_nights: booking.total_nights,
            order_total: booking.order_total,
            payment_status: false,
            created_at: Utc::now(),
        };
        store.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn delete_unpaid_bookings(&self, profile_id: Uuid) -> PortResult<u64> {
        let mut store = self.store.write().await;
        let before = store.bookings.len();
        store
            .bookings
            .retain(|b| b.profile_id != profile_id || b.payment_status);
        Ok((before - store.bookings.len()) as u64)
    }

    async fn get_booking(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<Booking> {
        self.store
            .read()
            .await
            .bookings
            .iter()
            .find(|b| b.id == booking_id && b.profile_id == profile_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Booking {} not found", booking_id)))
    }

    async fn confirm_booking_payment(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<Booking> {
        let mut store = self.store.write().await;
        let booking = store
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id && b.profile_id == profile_id)
            .ok_or_else(|| PortError::NotFound(format!("Booking {} not found", booking_id)))?;
        booking.payment_status = true;
        Ok(booking.clone())
    }

    async fn list_bookings_by_profile(&self, profile_id: Uuid) -> PortResult<Vec<Reservation>> {
        let store = self.store.read().await;
        let reservations = store
            .bookings
            .iter()
            .filter(|b| b.profile_id == profile_id && b.payment_status)
            .filter_map(|b| store.reservation(b))
            .collect();
        Ok(newest_first(reservations, |r: &Reservation| r.booking.created_at))
    }

    async fn delete_booking(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<()> {
        let mut store = self.store.write().await;
        let before = store.bookings.len();
        store
            .bookings
            .retain(|b| !(b.id == booking_id && b.profile_id == profile_id));
        if store.bookings.len() == before {
            return Err(PortError::NotFound(format!("Booking {} not found", booking_id)));
        }
        Ok(())
    }

    async fn list_reservations_for_host(&self, owner_id: Uuid) -> PortResult<Vec<Reservation>> {
        let store = self.store.read().await;
        let reservations = store
            .properties
            .iter()
            .filter(|p| p.profile_id == owner_id)
            .flat_map(|p| store.paid_bookings_of(p.id))
            .filter_map(|b| store.reservation(b))
            .collect();
        Ok(newest_first(reservations, |r: &Reservation| r.booking.created_at))
    }

    async fn create_review(
        &self,
        profile_id: Uuid,
        property_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> PortResult<Review> {
        let mut store = self.store.write().await;
        store.property(property_id)?;
        if store
            .reviews
            .iter()
            .any(|r| r.profile_id == profile_id && r.property_id == property_id)
        {
            return Err(PortError::Conflict(format!(
                "Property {} already reviewed",
                property_id
            )));
        }
        let review = Review {
            id: Uuid::new_v4(),
            profile_id,
            property_id,
            rating,
            comment: comment.to_string(),
            created_at: Utc::now(),
        };
        store.reviews.push(review.clone());
        Ok(review)
    }

    async fn find_review(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Option<Review>> {
        Ok(self
            .store
            .read()
            .await
            .reviews
            .iter()
            .find(|r| r.profile_id == profile_id && r.property_id == property_id)
            .cloned())
    }

    async fn list_reviews_for_property(&self, property_id: Uuid) -> PortResult<Vec<ReviewListing>> {
        let store = self.store.read().await;
        let listings = store
            .reviews
            .iter()
            .filter(|r| r.property_id == property_id)
            .map(|r| {
                let author = store.profiles.get(&r.profile_id);
                ReviewListing {
                    review: r.clone(),
                    title: author.map(|a| a.first_name.clone()).unwrap_or_default(),
                    image: author.map(|a| a.profile_image.clone()).unwrap_or_default(),
                }
            })
            .collect();
        Ok(newest_first(listings, |l: &ReviewListing| l.review.created_at))
    }

    async fn list_reviews_by_profile(&self, profile_id: Uuid) -> PortResult<Vec<ReviewListing>> {
        let store = self.store.read().await;
        let listings = store
            .reviews
            .iter()
            .filter(|r| r.profile_id == profile_id)
            .filter_map(|r| {
                let property = store.property(r.property_id).ok()?;
                Some(ReviewListing {
                    review: r.clone(),
                    title: property.name.clone(),
                    image: property.image.clone(),
                })
            })
            .collect();
        Ok(newest_first(listings, |l: &ReviewListing| l.review.created_at))
    }

    async fn delete_review(&self, profile_id: Uuid, review_id: Uuid) -> PortResult<()> {
        let mut store = self.store.write().await;
        let before = store.reviews.len();
        store
            .reviews
            .retain(|r| !(r.id == review_id && r.profile_id == profile_id));
        if store.reviews.len() == before {
            return Err(PortError::NotFound(format!("Review {} not found", review_id)));
        }
        Ok(())
    }

    async fn property_rating(&self, property_id: Uuid) -> PortResult<PropertyRating> {
        let store = self.store.read().await;
        let ratings: Vec<i32> = store
            .reviews
            .iter()
            .filter(|r| r.property_id == property_id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(PropertyRating::default());
        }
        let count = ratings.len() as i64;
        let rating = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / count as f64;
        Ok(PropertyRating { rating, count })
    }

    async fn find_favorite(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Option<Favorite>> {
        Ok(self
            .store
            .read()
            .await
            .favorites
            .iter()
            .find(|f| f.profile_id == profile_id && f.property_id == property_id)
            .cloned())
    }

    async fn add_favorite(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Favorite> {
        let mut store = self.store.write().await;
        store.property(property_id)?;
        if store
            .favorites
            .iter()
            .any(|f| f.profile_id == profile_id && f.property_id == property_id)
        {
            return Err(PortError::Conflict(format!(
                "Property {} is already a favorite",
                property_id
            )));
        }
        let favorite = Favorite {
            id: Uuid::new_v4(),
            profile_id,
            property_id,
        };
        store.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove_favorite(&self, profile_id: Uuid, favorite_id: Uuid) -> PortResult<()> {
        let mut store = self.store.write().await;
        let before = store.favorites.len();
        store
            .favorites
            .retain(|f| !(f.id == favorite_id && f.profile_id == profile_id));
        if store.favorites.len() == before {
            return Err(PortError::NotFound(format!("Favorite {} not found", favorite_id)));
        }
        Ok(())
    }

    async fn list_favorites(&self, profile_id: Uuid) -> PortResult<Vec<Property>> {
        let store = self.store.read().await;
        Ok(store
            .favorites
            .iter()
            .filter(|f| f.profile_id == profile_id)
            .filter_map(|f| store.property(f.property_id).ok().cloned())
            .collect())
    }

    async fn get_rental(&self, owner_id: Uuid, property_id: Uuid) -> PortResult<Property> {
        let store = self.store.read().await;
        store
            .property(property_id)
            .ok()
            .filter(|p| p.profile_id == owner_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Rental {} not found", property_id)))
    }

    async fn rental_summaries(&self, owner_id: Uuid) -> PortResult<Vec<RentalSummary>> {
        let store = self.store.read().await;
        let owned: Vec<&Property> = newest_first(
            store
                .properties
                .iter()
                .filter(|p| p.profile_id == owner_id)
                .collect(),
            |p: &&Property| p.created_at,
        );
        Ok(owned
            .into_iter()
            .map(|p| RentalSummary {
                property_id: p.id,
                name: p.name.clone(),
                price: p.price,
                total_nights_sum: store.paid_bookings_of(p.id).map(|b| b.total_nights).sum(),
                order_total_sum: store.paid_bookings_of(p.id).map(|b| b.order_total).sum(),
            })
            .collect())
    }

    async fn reservation_stats(&self, owner_id: Uuid) -> PortResult<ReservationStats> {
        let store = self.store.read().await;
        let mut stats = ReservationStats::default();
        for property in store.properties.iter().filter(|p| p.profile_id == owner_id) {
            stats.properties += 1;
            for booking in store.paid_bookings_of(property.id) {
                stats.nights += booking.total_nights;
                stats.amount += booking.order_total;
            }
        }
        Ok(stats)
    }
}
