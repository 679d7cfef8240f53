//! crates/rental_core/src/pricing.rs
//!
//! Night count and order total for a stay.

use chrono::NaiveDate;

/// Highest nightly price a property can be listed at, in whole currency units.
pub const MAX_NIGHTLY_PRICE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingResult {
    pub total_nights: i64,
    /// Saturates at `i64::MAX`/`i64::MIN` instead of wrapping.
    pub order_total: i64,
}

impl PricingResult {
    /// A stay must cover at least one night before it can be booked.
    pub fn is_valid_stay(&self) -> bool {
        self.total_nights > 0
    }

    /// Whether the order total hit the bounds of `i64`.
    pub fn is_saturated(&self) -> bool {
        self.order_total == i64::MAX || self.order_total == i64::MIN
    }
}

/// Computes the nights between `check_in` and `check_out` and their price.
///
/// The checkout day is not a night: 2024-03-01 to 2024-03-04 is three nights.
/// When `check_out <= check_in` the night count is zero or negative and is
/// returned as is; callers reject it with [`PricingResult::is_valid_stay`].
pub fn calculate_totals(check_in: NaiveDate, check_out: NaiveDate, price: i64) -> PricingResult {
    let total_nights = (check_out - check_in).num_days();
    PricingResult {
        total_nights,
        order_total: total_nights.saturating_mul(price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_night_stay() {
        let totals = calculate_totals(day(2024, 3, 1), day(2024, 3, 4), 100);
        assert_eq!(
            totals,
            PricingResult {
                total_nights: 3,
                order_total: 300
            }
        );
        assert!(totals.is_valid_stay());
    }

    #[test]
    fn same_day_stay_has_no_nights() {
        let totals = calculate_totals(day(2024, 3, 4), day(2024, 3, 4), 100);
        assert_eq!(totals.total_nights, 0);
        assert_eq!(totals.order_total, 0);
        assert!(!totals.is_valid_stay());
    }

    #[test]
    fn reversed_stay_is_negative() {
        let totals = calculate_totals(day(2024, 3, 4), day(2024, 3, 1), 100);
        assert_eq!(totals.total_nights, -3);
        assert!(!totals.is_valid_stay());
    }

    #[test]
    fn month_and_leap_boundaries() {
        assert_eq!(calculate_totals(day(2024, 2, 28), day(2024, 3, 1), 50).total_nights, 2);
        assert_eq!(calculate_totals(day(2023, 12, 30), day(2024, 1, 2), 80).order_total, 240);
    }

    #[test]
    fn huge_prices_saturate_instead_of_overflowing() {
        let totals = calculate_totals(day(2024, 3, 1), day(2024, 3, 4), i64::MAX / 2 + 1);
        assert_eq!(totals.total_nights, 3);
        assert_eq!(totals.order_total, i64::MAX);
        assert!(totals.is_saturated());

        let reversed = calculate_totals(day(2024, 3, 4), day(2024, 3, 1), i64::MAX / 2 + 1);
        assert_eq!(reversed.order_total, i64::MIN);
        assert!(!calculate_totals(day(2024, 3, 1), day(2024, 3, 4), MAX_NIGHTLY_PRICE).is_saturated());
    }

    #[test]
    fn is_deterministic() {
        let a = calculate_totals(day(2024, 7, 1), day(2024, 7, 8), 129);
        let b = calculate_totals(day(2024, 7, 1), day(2024, 7, 8), 129);
        assert_eq!(a, b);
    }
}
