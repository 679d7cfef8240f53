//! crates/rental_core/src/selection.rs
//!
//! Keeps a date-picker selection valid against a property's disabled days.
//!
//! Every change to the selection goes through [`SelectionWatcher::select`], which
//! validates it synchronously. A selection touching a disabled day is replaced
//! with the empty range before it is stored, so listeners never observe it.

use crate::availability::{DisabledDateIndex, SelectedRange};

/// Shown to the user when their selection was reset.
pub const UNAVAILABLE_NOTICE: &str = "Some dates are booked or unavailable. Please select again.";

/// The result of a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Accepted(SelectedRange),
    /// The attempted range touched a disabled day; the selection is now empty.
    Rejected { attempted: SelectedRange },
}

impl SelectionOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, SelectionOutcome::Accepted(_))
    }

    /// The selection in force after the change.
    pub fn range(&self) -> SelectedRange {
        match self {
            SelectionOutcome::Accepted(range) => *range,
            SelectionOutcome::Rejected { .. } => SelectedRange::default(),
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SelectionOutcome::Accepted(_) => None,
            SelectionOutcome::Rejected { .. } => Some(UNAVAILABLE_NOTICE),
        }
    }
}

/// Delivered to listeners whenever the stored selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    pub previous: SelectedRange,
    pub outcome: SelectionOutcome,
}

type Listener = Box<dyn Fn(&SelectionEvent) + Send + Sync>;

/// Validates a range against an index.
pub fn validate_selection(index: &DisabledDateIndex, range: SelectedRange) -> SelectionOutcome {
    if index.intersects(&range) {
        SelectionOutcome::Rejected { attempted: range }
    } else {
        SelectionOutcome::Accepted(range)
    }
}

/// Holds the current selection of one date picker.
pub struct SelectionWatcher {
    index: DisabledDateIndex,
    current: SelectedRange,
    listeners: Vec<Listener>,
}

impl SelectionWatcher {
    pub fn new(index: DisabledDateIndex) -> Self {
        Self {
            index,
            current: SelectedRange::default(),
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> SelectedRange {
        self.current
    }

    /// Registers a listener for selection changes.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Applies a new selection.
    ///
    /// Listeners only run when the outcome differs from the stored selection or
    /// the range was rejected.
    pub fn select(&mut self, range: SelectedRange) -> SelectionOutcome {
        let outcome = validate_selection(&self.index, range);
        let previous = self.current;
        self.current = outcome.range();

        if previous != range || !outcome.is_valid() {
            self.notify(SelectionEvent { previous, outcome });
        }
        outcome
    }

    pub fn clear(&mut self) -> SelectionOutcome {
        self.select(SelectedRange::default())
    }

    /// Swaps in a freshly computed index and re-validates the current selection.
    pub fn refresh(&mut self, index: DisabledDateIndex) -> SelectionOutcome {
        self.index = index;
        let current = self.current;
        let outcome = validate_selection(&self.index, current);
        if !outcome.is_valid() {
            self.current = outcome.range();
            self.notify(SelectionEvent {
                previous: current,
                outcome,
            });
        }
        outcome
    }

    fn notify(&self, event: SelectionEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for SelectionWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionWatcher")
            .field("index", &self.index)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{expand_to_disabled_date_index, BlockedPeriod};
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booked_may_10_to_15() -> DisabledDateIndex {
        expand_to_disabled_date_index(&[
            BlockedPeriod::before(day(2024, 5, 1)),
            BlockedPeriod::new(day(2024, 5, 10), day(2024, 5, 15)).unwrap(),
        ])
    }

    #[test]
    fn overlapping_selection_is_reset_before_listeners_run() {
        let mut watcher = SelectionWatcher::new(booked_may_10_to_15());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        watcher.subscribe(move |event| sink.lock().unwrap().push(*event));

        let attempted = SelectedRange::new(day(2024, 5, 12), day(2024, 5, 13));
        let outcome = watcher.select(attempted);

        assert_eq!(outcome, SelectionOutcome::Rejected { attempted });
        assert_eq!(outcome.notice(), Some(UNAVAILABLE_NOTICE));
        assert!(watcher.current().is_empty());

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome.range(), SelectedRange::default());
    }

    #[test]
    fn free_selection_is_kept() {
        let mut watcher = SelectionWatcher::new(booked_may_10_to_15());
        let range = SelectedRange::new(day(2024, 5, 16), day(2024, 5, 20));
        assert!(watcher.select(range).is_valid());
        assert_eq!(watcher.current(), range);
    }

    #[test]
    fn partial_selection_is_accepted_until_complete() {
        let mut watcher = SelectionWatcher::new(booked_may_10_to_15());
        let half = SelectedRange {
            from: Some(day(2024, 5, 8)),
            to: None,
        };
        assert!(watcher.select(half).is_valid());

        let outcome = watcher.select(SelectedRange::new(day(2024, 5, 8), day(2024, 5, 11)));
        assert!(!outcome.is_valid());
        assert!(watcher.current().is_empty());
    }

    #[test]
    fn past_dates_cannot_be_selected() {
        let mut watcher = SelectionWatcher::new(booked_may_10_to_15());
        let outcome = watcher.select(SelectedRange::new(day(2024, 4, 28), day(2024, 5, 2)));
        assert!(!outcome.is_valid());
    }

    #[test]
    fn unchanged_selection_does_not_notify() {
        let mut watcher = SelectionWatcher::new(booked_may_10_to_15());
        let count = Arc::new(Mutex::new(0));
        let counter = count.clone();
        watcher.subscribe(move |_| *counter.lock().unwrap() += 1);

        let range = SelectedRange::new(day(2024, 5, 20), day(2024, 5, 22));
        watcher.select(range);
        watcher.select(range);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn refresh_invalidates_a_selection_that_became_booked() {
        let mut watcher = SelectionWatcher::new(booked_may_10_to_15());
        let range = SelectedRange::new(day(2024, 5, 20), day(2024, 5, 22));
        watcher.select(range);

        let updated = expand_to_disabled_date_index(&[
            BlockedPeriod::before(day(2024, 5, 1)),
            BlockedPeriod::new(day(2024, 5, 21), day(2024, 5, 23)).unwrap(),
        ]);
        let outcome = watcher.refresh(updated);

        assert_eq!(outcome, SelectionOutcome::Rejected { attempted: range });
        assert!(watcher.current().is_empty());
    }
}
