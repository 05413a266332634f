//! Pairing models.
//!
//! [`BookingPair`] values are only produced by
//! [`pair_bookings`](crate::calculation::pair_bookings); a recalculation
//! builds new pairs rather than editing existing ones.

use serde::{Deserialize, Serialize};

use super::{Booking, BookingId, Category, WarningCode};

/// A matched work or break interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPair {
    /// Work or break.
    pub category: Category,
    /// The booking with direction `in`.
    pub in_booking: Booking,
    /// The booking with direction `out`.
    pub out_booking: Booking,
    /// Interval length in minutes, never negative.
    pub duration: i32,
    /// Whether the interval spans into the next calendar day.
    pub cross_midnight: bool,
}

impl BookingPair {
    /// The booking that opens the interval (`in` for work, `out` for breaks).
    pub fn start(&self) -> &Booking {
        match self.category {
            Category::Work => &self.in_booking,
            Category::Break => &self.out_booking,
        }
    }

    /// The booking that closes the interval.
    pub fn end(&self) -> &Booking {
        match self.category {
            Category::Work => &self.out_booking,
            Category::Break => &self.in_booking,
        }
    }

    /// Start of the interval in minutes from midnight.
    pub fn start_time(&self) -> i32 {
        self.start().time
    }

    /// End of the interval, past 1439 when the pair crosses midnight.
    pub fn end_time(&self) -> i32 {
        self.start_time() + self.duration
    }
}

/// Output of the pairing engine.
///
/// Every input booking appears exactly once: in one pair or in one of the
/// unpaired lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingResult {
    /// The formed pairs, work pairs first, each category ordered by start time.
    pub pairs: Vec<BookingPair>,
    /// Unmatched bookings with direction `in`, in input order.
    pub unpaired_in_ids: Vec<BookingId>,
    /// Unmatched bookings with direction `out`, in input order.
    pub unpaired_out_ids: Vec<BookingId>,
    /// Informational findings such as cross-midnight pairs.
    pub warnings: Vec<WarningCode>,
}

impl PairingResult {
    /// Pairs of the given category.
    pub fn pairs_of(&self, category: Category) -> impl Iterator<Item = &BookingPair> {
        self.pairs.iter().filter(move |p| p.category == category)
    }

    /// Total duration of all pairs of the given category.
    pub fn total_minutes(&self, category: Category) -> i32 {
        self.pairs_of(category).map(|p| p.duration).sum()
    }

    /// Whether any booking was left unmatched.
    pub fn has_unpaired(&self) -> bool {
        !self.unpaired_in_ids.is_empty() || !self.unpaired_out_ids.is_empty()
    }

    /// The `(in, out)` ID pairs, used to compare pairing topologies.
    pub fn topology(&self) -> Vec<(BookingId, BookingId)> {
        self.pairs
            .iter()
            .map(|p| (p.in_booking.id.clone(), p.out_booking.id.clone()))
            .collect()
    }
}
