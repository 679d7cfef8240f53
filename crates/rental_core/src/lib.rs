pub mod availability;
pub mod booking;
pub mod domain;
pub mod ports;
pub mod pricing;
pub mod selection;

pub use availability::{
    calendar_day, compute_blocked_periods, disabled_dates_for, expand_range_to_dates,
    expand_to_disabled_date_index, BlockedPeriod, DisabledDateIndex, SelectedRange,
};
pub use booking::{confirm_payment, create_booking, BookingError, NewBookingRequest};
pub use domain::{
    AuthSession, Booking, Favorite, NewBooking, Profile, ProfileCredentials, ProfileDetails,
    Property, PropertyDetails, PropertyFilter, PropertyRating, RentalSummary, Reservation,
    ReservationStats, Review, ReviewListing,
};
pub use ports::{DatabaseService, PortError, PortResult};
pub use pricing::{calculate_totals, PricingResult, MAX_NIGHTLY_PRICE};
pub use selection::{SelectionEvent, SelectionOutcome, SelectionWatcher, UNAVAILABLE_NOTICE};
