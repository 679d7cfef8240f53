//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rental_core::domain::{
    Booking, Favorite, NewBooking, Profile, ProfileCredentials, ProfileDetails, Property,
    PropertyDetails, PropertyFilter, PropertyRating, RentalSummary, Reservation,
    ReservationStats, Review, ReviewListing,
};
use rental_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            PortError::Conflict(db.message().to_string())
        }
        _ => PortError::Unexpected(e.to_string()),
    }
}

fn not_found(what: String) -> impl FnOnce(sqlx::Error) -> PortError {
    move |e| match e {
        sqlx::Error::RowNotFound => PortError::NotFound(what),
        other => unexpected(other),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

const PROFILE_COLUMNS: &str = "id, email, first_name, last_name, username, profile_image";

const PROPERTY_COLUMNS: &str = "id, profile_id, name, tagline, category, image, country, \
     description, price, guests, bedrooms, beds, baths, amenities, created_at";

const BOOKING_COLUMNS: &str = "id, profile_id, property_id, check_in, check_out, \
     total_nights, order_total, payment_status, created_at";

const RESERVATION_SELECT: &str = "SELECT b.id, b.profile_id, b.property_id, b.check_in, \
     b.check_out, b.total_nights, b.order_total, b.payment_status, b.created_at, \
     p.name AS property_name, p.country AS property_country, p.price AS property_price \
     FROM bookings b JOIN properties p ON p.id = b.property_id";

#[derive(FromRow)]
struct ProfileRecord {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    username: String,
    profile_image: String,
}
impl ProfileRecord {
    fn to_domain(self) -> Profile {
        Profile {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            profile_image: self.profile_image,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: Uuid,
    email: String,
    hashed_password: String,
}

#[derive(FromRow)]
struct PropertyRecord {
    id: Uuid,
    profile_id: Uuid,
    name: String,
    tagline: String,
    category: String,
    image: String,
    country: String,
    description: String,
    price: i64,
    guests: i32,
    bedrooms: i32,
    beds: i32,
    baths: i32,
    amenities: String,
    created_at: DateTime<Utc>,
}
impl PropertyRecord {
    fn to_domain(self) -> Property {
        Property {
            id: self.id,
            profile_id: self.profile_id,
            name: self.name,
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
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct BookingRecord {
    id: Uuid,
    profile_id: Uuid,
    property_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    total_nights: i64,
    order_total: i64,
    payment_status: bool,
    created_at: DateTime<Utc>,
}
impl BookingRecord {
    fn to_domain(self) -> Booking {
        Booking {
            id: self.id,
            profile_id: self.profile_id,
            property_id: self.property_id,
            check_in: self.check_in,
            check_out: self.check_out,
            total_nights: self.total_nights,
            order_total: self.order_total,
            payment_status: self.payment_status,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct ReservationRecord {
    #[sqlx(flatten)]
    booking: BookingRecord,
    property_name: String,
    property_country: String,
    property_price: i64,
}
impl ReservationRecord {
    fn to_domain(self) -> Reservation {
        Reservation {
            booking: self.booking.to_domain(),
            property_name: self.property_name,
            property_country: self.property_country,
            property_price: self.property_price,
        }
    }
}

#[derive(FromRow)]
struct ReviewRecord {
    id: Uuid,
    profile_id: Uuid,
    property_id: Uuid,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}
impl ReviewRecord {
    fn to_domain(self) -> Review {
        Review {
            id: self.id,
            profile_id: self.profile_id,
            property_id: self.property_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct ReviewListingRecord {
    #[sqlx(flatten)]
    review: ReviewRecord,
    title: String,
    image: String,
}
impl ReviewListingRecord {
    fn to_domain(self) -> ReviewListing {
        ReviewListing {
            review: self.review.to_domain(),
            title: self.title,
            image: self.image,
        }
    }
}

#[derive(FromRow)]
struct FavoriteRecord {
    id: Uuid,
    profile_id: Uuid,
    property_id: Uuid,
}
impl FavoriteRecord {
    fn to_domain(self) -> Favorite {
        Favorite {
            id: self.id,
            profile_id: self.profile_id,
            property_id: self.property_id,
        }
    }
}

#[derive(FromRow)]
struct RentalSummaryRecord {
    id: Uuid,
    name: String,
    price: i64,
    total_nights_sum: i64,
    order_total_sum: i64,
}
impl RentalSummaryRecord {
    fn to_domain(self) -> RentalSummary {
        RentalSummary {
            property_id: self.id,
            name: self.name,
            price: self.price,
            total_nights_sum: self.total_nights_sum,
            order_total_sum: self.order_total_sum,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_profile(
        &self,
        email: &str,
        hashed_password: &str,
        details: &ProfileDetails,
    ) -> PortResult<Profile> {
        let query = format!(
            "INSERT INTO profiles (id, email, hashed_password, first_name, last_name, username) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PROFILE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(hashed_password)
            .bind(&details.first_name)
            .bind(&details.last_name)
            .bind(&details.username)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn get_profile_by_email(&self, email: &str) -> PortResult<ProfileCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, email, hashed_password FROM profiles WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(format!("Profile with email {} not found", email)))?;

        Ok(ProfileCredentials {
            profile_id: record.id,
            email: record.email,
            hashed_password: record.hashed_password,
        })
    }

    async fn get_profile(&self, profile_id: Uuid) -> PortResult<Profile> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        let record = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(profile_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Profile {} not found", profile_id)))?;
        Ok(record.to_domain())
    }

    async fn update_profile(&self, profile_id: Uuid, details: &ProfileDetails) -> PortResult<Profile> {
        let query = format!(
            "UPDATE profiles SET first_name = $1, last_name = $2, username = $3 \
             WHERE id = $4 RETURNING {PROFILE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(&details.first_name)
            .bind(&details.last_name)
            .bind(&details.username)
            .bind(profile_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Profile {} not found", profile_id)))?;
        Ok(record.to_domain())
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        profile_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, profile_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(profile_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let profile_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT profile_id FROM auth_sessions WHERE id = $1 AND expires_at > now()",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        profile_id.ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn create_property(&self, owner_id: Uuid, details: &PropertyDetails) -> PortResult<Property> {
        let query = format!(
            "INSERT INTO properties (id, profile_id, name, tagline, category, image, country, \
             description, price, guests, bedrooms, beds, baths, amenities) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {PROPERTY_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PropertyRecord>(&query)
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(&details.name)
            .bind(&details.tagline)
            .bind(&details.category)
            .bind(&details.image)
            .bind(&details.country)
            .bind(&details.description)
            .bind(details.price)
            .bind(details.guests)
            .bind(details.bedrooms)
            .bind(details.beds)
            .bind(details.baths)
            .bind(&details.amenities)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_properties(&self, filter: &PropertyFilter) -> PortResult<Vec<Property>> {
        let query = format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties \
             WHERE ($1::TEXT IS NULL OR category = $1) \
             AND (name ILIKE '%' || $2 || '%' OR tagline ILIKE '%' || $2 || '%') \
             ORDER BY created_at DESC"
        );
        let records = sqlx::query_as::<_, PropertyRecord>(&query)
            .bind(filter.category.as_deref())
            .bind(&filter.search)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_property(&self, property_id: Uuid) -> PortResult<Property> {
        let query = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1");
        let record = sqlx::query_as::<_, PropertyRecord>(&query)
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Property {} not found", property_id)))?;
        Ok(record.to_domain())
    }

    async fn update_property(
        &self,
        owner_id: Uuid,
        property_id: Uuid,
        details: &PropertyDetails,
    ) -> PortResult<Property> {
        let query = format!(
            "UPDATE properties SET name = $1, tagline = $2, category = $3, image = $4, \
             country = $5, description = $6, price = $7, guests = $8, bedrooms = $9, \
             beds = $10, baths = $11, amenities = $12 \
             WHERE id = $13 AND profile_id = $14 RETURNING {PROPERTY_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PropertyRecord>(&query)
            .bind(&details.name)
            .bind(&details.tagline)
            .bind(&details.category)
            .bind(&details.image)
            .bind(&details.country)
            .bind(&details.description)
            .bind(details.price)
            .bind(details.guests)
            .bind(details.bedrooms)
            .bind(details.beds)
            .bind(details.baths)
            .bind(&details.amenities)
            .bind(property_id)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Property {} not found", property_id)))?;
        Ok(record.to_domain())
    }

    async fn delete_property(&self, owner_id: Uuid, property_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1 AND profile_id = $2")
            .bind(property_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Property {} not found", property_id)));
        }
        Ok(())
    }

    async fn list_bookings_for_property(&self, property_id: Uuid) -> PortResult<Vec<Booking>> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE property_id = $1 ORDER BY check_in ASC"
        );
        let records = sqlx::query_as::<_, BookingRecord>(&query)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> PortResult<Booking> {
        let query = format!(
            "INSERT INTO bookings (id, profile_id, property_id, check_in, check_out, \
             total_nights, order_total) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {BOOKING_COLUMNS}"
        );
        let record = sqlx::query_as::<_, BookingRecord>(&query)
            .bind(Uuid::new_v4())
            .bind(booking.profile_id)
            .bind(booking.property_id)
            .bind(booking.check_in)
            .bind(booking.check_out)
            .bind(booking.total_nights)
            .bind(booking.order_total)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn delete_unpaid_bookings(&self, profile_id: Uuid) -> PortResult<u64> {
        let result =
            sqlx::query("DELETE FROM bookings WHERE profile_id = $1 AND payment_status = FALSE")
                .bind(profile_id)
                .execute(&self.pool)
                .await
                .map_err(unexpected)?;
        Ok(result.rows_affected())
    }

    async fn get_booking(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<Booking> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 AND profile_id = $2");
        let record = sqlx::query_as::<_, BookingRecord>(&query)
            .bind(booking_id)
            .bind(profile_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Booking {} not found", booking_id)))?;
        Ok(record.to_domain())
    }

    async fn confirm_booking_payment(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<Booking> {
        let query = format!(
            "UPDATE bookings SET payment_status = TRUE WHERE id = $1 AND profile_id = $2 \
             RETURNING {BOOKING_COLUMNS}"
        );
        let record = sqlx::query_as::<_, BookingRecord>(&query)
            .bind(booking_id)
            .bind(profile_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Booking {} not found", booking_id)))?;
        Ok(record.to_domain())
    }

    async fn list_bookings_by_profile(&self, profile_id: Uuid) -> PortResult<Vec<Reservation>> {
        let query = format!(
            "{RESERVATION_SELECT} WHERE b.profile_id = $1 AND b.payment_status = TRUE \
             ORDER BY b.created_at DESC"
        );
        let records = sqlx::query_as::<_, ReservationRecord>(&query)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn delete_booking(&self, profile_id: Uuid, booking_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND profile_id = $2")
            .bind(booking_id)
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Booking {} not found", booking_id)));
        }
        Ok(())
    }

    async fn list_reservations_for_host(&self, owner_id: Uuid) -> PortResult<Vec<Reservation>> {
        let query = format!(
            "{RESERVATION_SELECT} WHERE p.profile_id = $1 AND b.payment_status = TRUE \
             ORDER BY b.created_at DESC"
        );
        let records = sqlx::query_as::<_, ReservationRecord>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_review(
        &self,
        profile_id: Uuid,
        property_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> PortResult<Review> {
        let record = sqlx::query_as::<_, ReviewRecord>(
            "INSERT INTO reviews (id, profile_id, property_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, profile_id, property_id, rating, comment, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(property_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn find_review(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Option<Review>> {
        let record = sqlx::query_as::<_, ReviewRecord>(
            "SELECT id, profile_id, property_id, rating, comment, created_at FROM reviews \
             WHERE profile_id = $1 AND property_id = $2",
        )
        .bind(profile_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(|r| r.to_domain()))
    }

    async fn list_reviews_for_property(&self, property_id: Uuid) -> PortResult<Vec<ReviewListing>> {
        let records = sqlx::query_as::<_, ReviewListingRecord>(
            "SELECT r.id, r.profile_id, r.property_id, r.rating, r.comment, r.created_at, \
             pr.first_name AS title, pr.profile_image AS image \
             FROM reviews r JOIN profiles pr ON pr.id = r.profile_id \
             WHERE r.property_id = $1 ORDER BY r.created_at DESC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_reviews_by_profile(&self, profile_id: Uuid) -> PortResult<Vec<ReviewListing>> {
        let records = sqlx::query_as::<_, ReviewListingRecord>(
            "SELECT r.id, r.profile_id, r.property_id, r.rating, r.comment, r.created_at, \
             p.name AS title, p.image AS image \
             FROM reviews r JOIN properties p ON p.id = r.property_id \
             WHERE r.profile_id = $1 ORDER BY r.created_at DESC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn delete_review(&self, profile_id: Uuid, review_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND profile_id = $2")
            .bind(review_id)
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Review {} not found", review_id)));
        }
        Ok(())
    }

    async fn property_rating(&self, property_id: Uuid) -> PortResult<PropertyRating> {
        let (rating, count): (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(rating)::FLOAT8, COUNT(*) FROM reviews WHERE property_id = $1",
        )
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(PropertyRating {
            rating: rating.unwrap_or(0.0),
            count,
        })
    }

    async fn find_favorite(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Option<Favorite>> {
        let record = sqlx::query_as::<_, FavoriteRecord>(
            "SELECT id, profile_id, property_id FROM favorites \
             WHERE profile_id = $1 AND property_id = $2",
        )
        .bind(profile_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(|r| r.to_domain()))
    }

    async fn add_favorite(&self, profile_id: Uuid, property_id: Uuid) -> PortResult<Favorite> {
        let record = sqlx::query_as::<_, FavoriteRecord>(
            "INSERT INTO favorites (id, profile_id, property_id) VALUES ($1, $2, $3) \
             RETURNING id, profile_id, property_id",
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn remove_favorite(&self, profile_id: Uuid, favorite_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1 AND profile_id = $2")
            .bind(favorite_id)
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Favorite {} not found", favorite_id)));
        }
        Ok(())
    }

    async fn list_favorites(&self, profile_id: Uuid) -> PortResult<Vec<Property>> {
        let query = format!(
            "SELECT {} FROM favorites f JOIN properties p ON p.id = f.property_id \
             WHERE f.profile_id = $1 ORDER BY f.created_at DESC",
            prefixed("p", PROPERTY_COLUMNS)
        );
        let records = sqlx::query_as::<_, PropertyRecord>(&query)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_rental(&self, owner_id: Uuid, property_id: Uuid) -> PortResult<Property> {
        let query =
            format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1 AND profile_id = $2");
        let record = sqlx::query_as::<_, PropertyRecord>(&query)
            .bind(property_id)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found(format!("Rental {} not found", property_id)))?;
        Ok(record.to_domain())
    }

    async fn rental_summaries(&self, owner_id: Uuid) -> PortResult<Vec<RentalSummary>> {
        let records = sqlx::query_as::<_, RentalSummaryRecord>(
            "SELECT p.id, p.name, p.price, \
             COALESCE(SUM(b.total_nights), 0)::BIGINT AS total_nights_sum, \
             COALESCE(SUM(b.order_total), 0)::BIGINT AS order_total_sum \
             FROM properties p \
             LEFT JOIN bookings b ON b.property_id = p.id AND b.payment_status = TRUE \
             WHERE p.profile_id = $1 \
             GROUP BY p.id, p.name, p.price, p.created_at ORDER BY p.created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn reservation_stats(&self, owner_id: Uuid) -> PortResult<ReservationStats> {
        let properties: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE profile_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(unexpected)?;

        let (nights, amount): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(b.total_nights), 0)::BIGINT, COALESCE(SUM(b.order_total), 0)::BIGINT \
             FROM bookings b JOIN properties p ON p.id = b.property_id \
             WHERE p.profile_id = $1 AND b.payment_status = TRUE",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(ReservationStats {
            properties,
            nights,
            amount,
        })
    }
}

/// Qualifies each column of a comma-separated list with a table alias.
fn prefixed(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(|column| format!("{}.{}", alias, column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::prefixed;

    #[test]
    fn prefixed_qualifies_every_column() {
        assert_eq!(prefixed("p", "id, name,price"), "p.id, p.name, p.price");
    }
}
