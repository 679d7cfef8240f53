//! crates/rental_core/src/availability.rs
//!
//! Works out which calendar days of a property cannot be booked.
//!
//! Paid bookings block their whole `[check_in, check_out]` span, checkout day
//! included, and every day before "today" is blocked so that past dates cannot
//! be selected. All comparisons are on `NaiveDate`, so time-of-day and timezone
//! never leak into membership checks.

use crate::domain::Booking;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Start of the open-ended past period (1970-01-01).
pub fn past_sentinel() -> NaiveDate {
    NaiveDate::default()
}

/// Normalizes a timestamp to its UTC calendar day.
pub fn calendar_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

//=========================================================================================
// Blocked Periods
//=========================================================================================

/// A closed interval of calendar days during which a property is unavailable.
///
/// Only the period built by [`BlockedPeriod::before`] is open-ended: it also
/// covers every day preceding its `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
    open_ended_past: bool,
}

impl BlockedPeriod {
    /// Builds a period, returning `None` when `to < from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self {
            from,
            to,
            open_ended_past: false,
        })
    }

    /// The period covering every day strictly before `today`.
    pub fn before(today: NaiveDate) -> Self {
        let sentinel = past_sentinel();
        let to = today.pred_opt().unwrap_or(sentinel).max(sentinel);
        Self {
            from: sentinel,
            to,
            open_ended_past: true,
        }
    }

    pub fn is_open_ended_past(&self) -> bool {
        self.open_ended_past
    }
}

/// Produces the periods a property is blocked for: the past, then one period per paid booking.
///
/// Unpaid bookings are abandoned checkouts and never block the calendar. A booking
/// whose `check_out` precedes its `check_in` contributes nothing.
pub fn compute_blocked_periods(bookings: &[Booking], today: NaiveDate) -> Vec<BlockedPeriod> {
    let mut periods = Vec::with_capacity(bookings.len() + 1);
    periods.push(BlockedPeriod::before(today));
    periods.extend(
        bookings
            .iter()
            .filter(|booking| booking.payment_status)
            .filter_map(|booking| BlockedPeriod::new(booking.check_in, booking.check_out)),
    );
    periods
}

//=========================================================================================
// Disabled Date Index
//=========================================================================================

/// The flattened set of unavailable calendar days.
///
/// Days before `before` are members without being stored one by one; every
/// other member is held explicitly. Membership is boolean: overlapping periods
/// never count a day twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledDateIndex {
    before: Option<NaiveDate>,
    dates: BTreeSet<NaiveDate>,
}

impl DisabledDateIndex {
    /// Every day strictly before this one is disabled.
    pub fn before(&self) -> Option<NaiveDate> {
        self.before
    }

    /// Explicitly disabled days on or after the past cutoff, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.before.is_some_and(|cutoff| day < cutoff) || self.dates.contains(&day)
    }

    /// Whether any day of the range is disabled. An incomplete range never intersects.
    pub fn intersects(&self, range: &SelectedRange) -> bool {
        expand_range_to_dates(range)
            .into_iter()
            .any(|day| self.contains(day))
    }

    fn block_until(&mut self, last_blocked: NaiveDate) {
        let cutoff = last_blocked.succ_opt().unwrap_or(NaiveDate::MAX);
        if self.before.map_or(true, |current| cutoff > current) {
            self.before = Some(cutoff);
            self.dates = self.dates.split_off(&cutoff);
        }
    }

    fn insert(&mut self, day: NaiveDate) {
        if !self.contains(day) {
            self.dates.insert(day);
        }
    }
}

/// Expands blocked periods into per-day membership.
pub fn expand_to_disabled_date_index(periods: &[BlockedPeriod]) -> DisabledDateIndex {
    let mut index = DisabledDateIndex::default();

    for period in periods.iter().filter(|p| p.is_open_ended_past()) {
        index.block_until(period.to);
    }
    for period in periods.iter().filter(|p| !p.is_open_ended_past()) {
        for day in days_inclusive(period.from, period.to) {
            index.insert(day);
        }
    }

    index
}

/// Builds the index for a property's bookings as seen on `today`.
pub fn disabled_dates_for(bookings: &[Booking], today: NaiveDate) -> DisabledDateIndex {
    expand_to_disabled_date_index(&compute_blocked_periods(bookings, today))
}

//=========================================================================================
// Selected Range
//=========================================================================================

/// An in-progress check-in/check-out selection. Either endpoint may still be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SelectedRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Every calendar day of a complete range, ascending. Empty while either endpoint is missing.
///
/// Endpoints are not reordered: a range ending before it starts yields no days.
pub fn expand_range_to_dates(range: &SelectedRange) -> Vec<NaiveDate> {
    match (range.from, range.to) {
        (Some(from), Some(to)) => days_inclusive(from, to).collect(),
        _ => Vec::new(),
    }
}

fn days_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = if to < from {
        0
    } else {
        (to - from).num_days() as u64 + 1
    };
    (0..span).filter_map(move |offset| from.checked_add_days(Days::new(offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(check_in: NaiveDate, check_out: NaiveDate, paid: bool) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            check_in,
            check_out,
            total_nights: (check_out - check_in).num_days(),
            order_total: 0,
            payment_status: paid,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_booking_list_only_blocks_the_past() {
        let today = day(2024, 5, 1);
        let periods = compute_blocked_periods(&[], today);
        assert_eq!(periods, vec![BlockedPeriod::before(today)]);
        assert_eq!(periods[0].to, day(2024, 4, 30));
    }

    #[test]
    fn unpaid_bookings_do_not_block() {
        let today = day(2024, 5, 1);
        let bookings = vec![
            booking(day(2024, 5, 10), day(2024, 5, 15), true),
            booking(day(2024, 6, 1), day(2024, 6, 3), false),
        ];
        let periods = compute_blocked_periods(&bookings, today);
        assert_eq!(periods.len(), 2);
        assert_eq!(
            periods[1],
            BlockedPeriod::new(day(2024, 5, 10), day(2024, 5, 15)).unwrap()
        );

        let index = expand_to_disabled_date_index(&periods);
        assert!(!index.contains(day(2024, 6, 2)));
    }

    #[test]
    fn paid_booking_span_is_fully_disabled() {
        let today = day(2024, 5, 1);
        let index = disabled_dates_for(&[booking(day(2024, 5, 10), day(2024, 5, 15), true)], today);

        for d in 10..=15 {
            assert!(index.contains(day(2024, 5, d)), "2024-05-{d} should be disabled");
        }
        assert!(!index.contains(day(2024, 5, 9)));
        assert!(!index.contains(day(2024, 5, 16)));
        assert_eq!(index.dates().count(), 6);
    }

    #[test]
    fn every_day_before_today_is_disabled() {
        let today = day(2024, 5, 1);
        let index = disabled_dates_for(&[], today);

        assert!(index.contains(day(2024, 4, 30)));
        assert!(index.contains(day(2001, 1, 1)));
        assert!(index.contains(past_sentinel()));
        assert_eq!(past_sentinel(), day(1970, 1, 1));
        assert!(!index.contains(today));
        assert_eq!(index.before(), Some(today));
    }

    #[test]
    fn overlapping_bookings_count_each_day_once() {
        let today = day(2024, 5, 1);
        let index = disabled_dates_for(
            &[
                booking(day(2024, 5, 10), day(2024, 5, 15), true),
                booking(day(2024, 5, 13), day(2024, 5, 18), true),
            ],
            today,
        );
        let dates: Vec<_> = index.dates().collect();
        let expected: Vec<_> = (10..=18).map(|d| day(2024, 5, d)).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn past_part_of_a_booking_is_covered_by_the_cutoff() {
        let today = day(2024, 5, 12);
        let index = disabled_dates_for(&[booking(day(2024, 5, 10), day(2024, 5, 15), true)], today);
        let dates: Vec<_> = index.dates().collect();
        assert_eq!(dates.first(), Some(&day(2024, 5, 12)));
        assert!(index.contains(day(2024, 5, 10)));
    }

    #[test]
    fn expansion_is_idempotent() {
        let periods = compute_blocked_periods(
            &[booking(day(2024, 7, 1), day(2024, 7, 4), true)],
            day(2024, 6, 1),
        );
        assert_eq!(
            expand_to_disabled_date_index(&periods),
            expand_to_disabled_date_index(&periods)
        );
    }

    #[test]
    fn incomplete_range_expands_to_nothing() {
        assert!(expand_range_to_dates(&SelectedRange::default()).is_empty());
        let half = SelectedRange {
            from: Some(day(2024, 5, 12)),
            to: None,
        };
        assert!(expand_range_to_dates(&half).is_empty());
    }

    #[test]
    fn range_expands_inclusively_in_order() {
        let range = SelectedRange::new(day(2024, 2, 27), day(2024, 3, 2));
        assert_eq!(
            expand_range_to_dates(&range),
            vec![
                day(2024, 2, 27),
                day(2024, 2, 28),
                day(2024, 2, 29),
                day(2024, 3, 1),
                day(2024, 3, 2),
            ]
        );
    }

    #[test]
    fn single_day_and_reversed_ranges() {
        let single = SelectedRange::new(day(2024, 3, 4), day(2024, 3, 4));
        assert_eq!(expand_range_to_dates(&single), vec![day(2024, 3, 4)]);

        let reversed = SelectedRange::new(day(2024, 3, 4), day(2024, 3, 1));
        assert!(expand_range_to_dates(&reversed).is_empty());
        assert!(BlockedPeriod::new(day(2024, 3, 4), day(2024, 3, 1)).is_none());
    }

    #[test]
    fn selection_overlapping_a_booking_intersects() {
        let index = disabled_dates_for(
            &[booking(day(2024, 5, 10), day(2024, 5, 15), true)],
            day(2024, 5, 1),
        );
        let inside = SelectedRange::new(day(2024, 5, 12), day(2024, 5, 13));
        let straddling = SelectedRange::new(day(2024, 5, 5), day(2024, 5, 10));
        let clear = SelectedRange::new(day(2024, 5, 16), day(2024, 5, 20));

        assert!(index.intersects(&inside));
        assert!(index.intersects(&straddling));
        assert!(!index.intersects(&clear));
    }

    #[test]
    fn periods_before_the_sentinel_are_enumerated_not_open_ended() {
        let old = BlockedPeriod::new(day(1960, 1, 1), day(1960, 1, 5)).unwrap();
        assert!(!old.is_open_ended_past());
        assert!(BlockedPeriod::before(day(2024, 5, 1)).is_open_ended_past());

        let index = expand_to_disabled_date_index(&[old]);
        assert_eq!(index.before(), None);
        assert!(!index.contains(day(1950, 6, 1)));
        assert!(!index.contains(day(1959, 12, 31)));
        assert!(index.contains(day(1960, 1, 3)));
        assert!(!index.contains(day(1960, 1, 6)));
        assert_eq!(index.dates().count(), 5);
    }

    #[test]
    fn booking_starting_on_the_sentinel_does_not_block_earlier_days() {
        let period = BlockedPeriod::new(past_sentinel(), day(1970, 1, 3)).unwrap();
        let index = expand_to_disabled_date_index(&[period]);
        assert!(index.contains(day(1970, 1, 2)));
        assert!(!index.contains(day(1969, 12, 31)));
    }

    #[test]
    fn calendar_day_strips_time_of_day() {
        let late = Utc.with_ymd_and_hms(2024, 5, 10, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 1).unwrap();
        assert_eq!(calendar_day(late), calendar_day(early));
        assert_eq!(calendar_day(late), day(2024, 5, 10));
    }
}
