//! Exercises the booking workflow against the in-memory store.

use api_lib::adapters::MemoryAdapter;
use chrono::NaiveDate;
use rental_core::{
    booking::{confirm_payment, create_booking, BookingError, NewBookingRequest},
    domain::{ProfileDetails, Property, PropertyDetails},
    ports::DatabaseService,
};
use uuid::Uuid;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(1, 1)
}

async fn profile(db: &MemoryAdapter, username: &str) -> Uuid {
    db.create_profile(
        &format!("{}@example.com", username),
        "not-a-real-hash",
        &ProfileDetails {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn property(db: &MemoryAdapter, owner: Uuid, price: i64) -> Property {
    db.create_property(
        owner,
        &PropertyDetails {
            name: "Cabin by the lake".to_string(),
            tagline: "Quiet and cozy".to_string(),
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
        },
    )
    .await
    .unwrap()
}

fn request(guest: Uuid, property_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> NewBookingRequest {
    NewBookingRequest {
        profile_id: guest,
        property_id,
        check_in,
        check_out,
    }
}

#[tokio::test]
async fn prices_and_stores_an_unpaid_booking() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let guest = profile(&db, "guest").await;
    let cabin = property(&db, host, 100).await;

    let booking = create_booking(&db, request(guest, cabin.id, day(3, 1), day(3, 4)), today())
        .await
        .unwrap();

    assert_eq!(booking.total_nights, 3);
    assert_eq!(booking.order_total, 300);
    assert!(!booking.payment_status);
    assert_eq!(db.list_bookings_for_property(cabin.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejects_stays_without_nights() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let guest = profile(&db, "guest").await;
    let cabin = property(&db, host, 100).await;

    let same_day = create_booking(&db, request(guest, cabin.id, day(3, 1), day(3, 1)), today()).await;
    assert!(matches!(same_day, Err(BookingError::InvalidStay { total_nights: 0 })));

    let reversed = create_booking(&db, request(guest, cabin.id, day(3, 4), day(3, 1)), today()).await;
    assert!(matches!(reversed, Err(BookingError::InvalidStay { total_nights: -3 })));

    assert!(db.list_bookings_for_property(cabin.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_property_is_reported() {
    let db = MemoryAdapter::new();
    let guest = profile(&db, "guest").await;
    let missing = Uuid::new_v4();

    let result = create_booking(&db, request(guest, missing, day(3, 1), day(3, 4)), today()).await;
    assert!(matches!(result, Err(BookingError::PropertyNotFound(id)) if id == missing));
}

#[tokio::test]
async fn paid_booking_blocks_overlapping_stays() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let first = profile(&db, "first").await;
    let second = profile(&db, "second").await;
    let cabin = property(&db, host, 80).await;

    let booking = create_booking(&db, request(first, cabin.id, day(5, 10), day(5, 15)), today())
        .await
        .unwrap();
    confirm_payment(&db, first, booking.id, today()).await.unwrap();

    let result = create_booking(&db, request(second, cabin.id, day(5, 12), day(5, 13)), today()).await;
    match result {
        Err(BookingError::DatesUnavailable { conflicts }) => {
            assert_eq!(conflicts, vec![day(5, 12), day(5, 13)]);
        }
        other => panic!("expected DatesUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn checkout_day_of_a_paid_booking_is_blocked() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let first = profile(&db, "first").await;
    let second = profile(&db, "second").await;
    let cabin = property(&db, host, 80).await;

    let booking = create_booking(&db, request(first, cabin.id, day(5, 10), day(5, 15)), today())
        .await
        .unwrap();
    confirm_payment(&db, first, booking.id, today()).await.unwrap();

    let starts_on_checkout =
        create_booking(&db, request(second, cabin.id, day(5, 15), day(5, 18)), today()).await;
    assert!(matches!(
        starts_on_checkout,
        Err(BookingError::DatesUnavailable { ref conflicts }) if conflicts == &vec![day(5, 15)]
    ));

    let next_day = create_booking(&db, request(second, cabin.id, day(5, 16), day(5, 18)), today()).await;
    assert!(next_day.is_ok());
}

#[tokio::test]
async fn unpaid_bookings_do_not_block_and_are_purged() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let first = profile(&db, "first").await;
    let second = profile(&db, "second").await;
    let cabin = property(&db, host, 50).await;

    create_booking(&db, request(first, cabin.id, day(6, 1), day(6, 5)), today())
        .await
        .unwrap();
    // The first guest never paid, so the same days are still open.
    create_booking(&db, request(second, cabin.id, day(6, 2), day(6, 4)), today())
        .await
        .unwrap();
    assert_eq!(db.list_bookings_for_property(cabin.id).await.unwrap().len(), 2);

    // A new attempt by the first guest drops their abandoned checkout.
    create_booking(&db, request(first, cabin.id, day(7, 1), day(7, 3)), today())
        .await
        .unwrap();
    let bookings = db.list_bookings_for_property(cabin.id).await.unwrap();
    assert_eq!(bookings.len(), 2);
    assert!(bookings
        .iter()
        .all(|b| b.profile_id != first || b.check_in == day(7, 1)));
}

#[tokio::test]
async fn past_days_cannot_be_booked() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let guest = profile(&db, "guest").await;
    let cabin = property(&db, host, 100).await;

    let result = create_booking(&db, request(guest, cabin.id, day(2, 27), day(3, 2)), day(3, 1)).await;
    match result {
        Err(BookingError::DatesUnavailable { conflicts }) => {
            assert_eq!(conflicts, vec![day(2, 27), day(2, 28)]);
        }
        other => panic!("expected DatesUnavailable, got {:?}", other),
    }

    let from_today = create_booking(&db, request(guest, cabin.id, day(3, 1), day(3, 2)), day(3, 1)).await;
    assert!(from_today.is_ok());
}

#[tokio::test]
async fn only_the_guest_can_confirm_their_booking() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let guest = profile(&db, "guest").await;
    let cabin = property(&db, host, 100).await;

    let booking = create_booking(&db, request(guest, cabin.id, day(3, 1), day(3, 4)), today())
        .await
        .unwrap();

    let by_host = confirm_payment(&db, host, booking.id, today()).await;
    assert!(matches!(by_host, Err(BookingError::Port(_))));

    let paid = confirm_payment(&db, guest, booking.id, today()).await.unwrap();
    assert!(paid.payment_status);
}

#[tokio::test]
async fn second_guest_cannot_pay_for_dates_already_paid() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let first = profile(&db, "first").await;
    let second = profile(&db, "second").await;
    let cabin = property(&db, host, 80).await;

    // Neither booking is paid yet, so both are accepted.
    let a = create_booking(&db, request(first, cabin.id, day(5, 10), day(5, 15)), today())
        .await
        .unwrap();
    let b = create_booking(&db, request(second, cabin.id, day(5, 14), day(5, 16)), today())
        .await
        .unwrap();

    confirm_payment(&db, first, a.id, today()).await.unwrap();
    match confirm_payment(&db, second, b.id, today()).await {
        Err(BookingError::DatesUnavailable { conflicts }) => {
            assert_eq!(conflicts, vec![day(5, 14), day(5, 15)]);
        }
        other => panic!("expected DatesUnavailable, got {:?}", other),
    }

    let paid: Vec<_> = db
        .list_bookings_for_property(cabin.id)
        .await
        .unwrap()
        .into_iter()
        .filter(|b| b.payment_status)
        .collect();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].id, a.id);
}

#[tokio::test]
async fn confirming_twice_is_harmless() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let guest = profile(&db, "guest").await;
    let cabin = property(&db, host, 100).await;

    let booking = create_booking(&db, request(guest, cabin.id, day(3, 1), day(3, 4)), today())
        .await
        .unwrap();
    confirm_payment(&db, guest, booking.id, today()).await.unwrap();
    let again = confirm_payment(&db, guest, booking.id, today()).await.unwrap();
    assert!(again.payment_status);
}

#[tokio::test]
async fn order_total_overflow_is_rejected() {
    let db = MemoryAdapter::new();
    let host = profile(&db, "host").await;
    let guest = profile(&db, "guest").await;
    let pricey = property(&db, host, i64::MAX / 2 + 1).await;

    let result = create_booking(&db, request(guest, pricey.id, day(3, 1), day(3, 4)), today()).await;
    assert!(matches!(result, Err(BookingError::OrderTotalTooLarge)));
    assert!(db.list_bookings_for_property(pricey.id).await.unwrap().is_empty());
}
