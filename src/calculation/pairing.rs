//! Booking pairing engine.
//!
//! Matches raw clock events into work and break intervals. Each category is
//! processed independently in three passes:
//!
//! 1. **Linked**: bookings carrying a `pair_id` that names a present booking of
//!    the same category and the complementary direction are matched directly,
//!    regardless of time order. Dangling links are ignored.
//! 2. **Chronological**: remaining bookings are sorted by time (stable on
//!    input order) and each interval start takes the earliest unmatched end
//!    at or after its own time.
//! 3. **Cross-midnight**: starts still unmatched take the earliest remaining
//!    end without the time constraint; the interval is assumed to run into
//!    the next day.
//!
//! For work, intervals start on `in` and end on `out`. For breaks the
//! directions are inverted: leaving work (`out`) starts the break and
//! returning (`in`) ends it.

use tracing::debug;

use crate::models::{Booking, BookingPair, Category, Direction, PairingResult, WarningCode};

use super::time_utils::interval_duration;

/// Pairs a day's bookings into work and break intervals.
///
/// The input is not modified and the output depends only on the bookings
/// and their relative input order, which breaks ties between equal times.
/// Every booking ends up in exactly one pair or in exactly one of the
/// unpaired lists.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::pair_bookings;
/// use timecalc_engine::models::{Booking, Category, Direction};
///
/// let bookings = vec![
///     Booking::new("w1", 480, Direction::In, Category::Work),
///     Booking::new("b1", 720, Direction::Out, Category::Break),
///     Booking::new("b2", 750, Direction::In, Category::Break),
///     Booking::new("w2", 1020, Direction::Out, Category::Work),
/// ];
///
/// let result = pair_bookings(&bookings);
/// assert_eq!(result.pairs.len(), 2);
/// assert_eq!(result.total_minutes(Category::Work), 540);
/// assert_eq!(result.total_minutes(Category::Break), 30);
/// assert!(!result.has_unpaired());
/// ```
pub fn pair_bookings(bookings: &[Booking]) -> PairingResult {
    let mut used = vec![false; bookings.len()];
    let mut result = PairingResult::default();

    for category in Category::ALL {
        let indices: Vec<usize> = bookings
            .iter()
            .enumerate()
            .filter(|(_, b)| b.category == category)
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            continue;
        }

        let mut pairs = Vec::new();
        pair_linked(bookings, &indices, &mut used, &mut pairs);

        let mut sorted: Vec<usize> = indices.iter().copied().filter(|&i| !used[i]).collect();
        sorted.sort_by_key(|&i| bookings[i].time);

        pair_chronological(bookings, &sorted, &mut used, &mut pairs);
        pair_cross_midnight(bookings, &sorted, &mut used, &mut pairs);

        pairs.sort_by_key(BookingPair::start_time);
        let crosses_midnight = pairs.iter().any(|p| p.cross_midnight);
        if crosses_midnight && !result.warnings.contains(&WarningCode::CrossMidnight) {
            result.warnings.push(WarningCode::CrossMidnight);
        }

        debug!(
            category = %category,
            bookings = indices.len(),
            pairs = pairs.len(),
            "Paired bookings"
        );
        result.pairs.extend(pairs);
    }

    for (booking, _) in bookings.iter().zip(&used).filter(|(_, used)| !**used) {
        if booking.direction == Direction::In {
            result.unpaired_in_ids.push(booking.id.clone());
        } else {
            result.unpaired_out_ids.push(booking.id.clone());
        }
    }

    result
}

/// Builds a pair from two bookings of opposite direction in either order.
fn make_pair(a: &Booking, b: &Booking) -> BookingPair {
    let (in_booking, out_booking) = if a.direction == Direction::In {
        (a, b)
    } else {
        (b, a)
    };
    let (start, end) = if a.is_start() { (a, b) } else { (b, a) };

    BookingPair {
        category: a.category,
        in_booking: in_booking.clone(),
        out_booking: out_booking.clone(),
        duration: interval_duration(start.time, end.time),
        cross_midnight: end.time < start.time,
    }
}

fn pair_linked(
    bookings: &[Booking],
    indices: &[usize],
    used: &mut [bool],
    pairs: &mut Vec<BookingPair>,
) {
    for &i in indices {
        if used[i] {
            continue;
        }
        let Some(pair_id) = &bookings[i].pair_id else {
            continue;
        };
        let partner = indices.iter().copied().find(|&j| {
            j != i
                && !used[j]
                && bookings[j].id == *pair_id
                && bookings[j].direction == bookings[i].direction.opposite()
        });
        if let Some(j) = partner {
            used[i] = true;
            used[j] = true;
            pairs.push(make_pair(&bookings[i], &bookings[j]));
        }
    }
}

fn pair_chronological(
    bookings: &[Booking],
    sorted: &[usize],
    used: &mut [bool],
    pairs: &mut Vec<BookingPair>,
) {
    for &i in sorted {
        if used[i] || !bookings[i].is_start() {
            continue;
        }
        let start_time = bookings[i].time;
        let end = sorted
            .iter()
            .copied()
            .find(|&j| !used[j] && !bookings[j].is_start() && bookings[j].time >= start_time);
        if let Some(j) = end {
            used[i] = true;
            used[j] = true;
            pairs.push(make_pair(&bookings[i], &bookings[j]));
        }
    }
}

fn pair_cross_midnight(
    bookings: &[Booking],
    sorted: &[usize],
    used: &mut [bool],
    pairs: &mut Vec<BookingPair>,
) {
    for &i in sorted {
        if used[i] || !bookings[i].is_start() {
            continue;
        }
        let end = sorted
            .iter()
            .copied()
            .find(|&j| !used[j] && !bookings[j].is_start());
        if let Some(j) = end {
            used[i] = true;
            used[j] = true;
            pairs.push(make_pair(&bookings[i], &bookings[j]));
        }
    }
}
