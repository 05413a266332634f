//! Parallel calculation of many employee-days.
//!
//! Days share nothing but read-only configuration, so each is calculated
//! independently on the rayon thread pool. One day's errors never affect
//! another day's result.

use rayon::prelude::*;
use tracing::info;

use crate::models::CalculationResult;

use super::day_calculator::{DayInput, calculate_day};

/// Calculates every day of a batch, returning results in input order.
///
/// The results are identical to calling
/// [`calculate_day`](super::calculate_day) on each input in turn.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::{DayInput, calculate_batch};
/// use timecalc_engine::models::{Booking, Category, DaySchedule, Direction};
///
/// let day = DayInput {
///     schedule: DaySchedule::default(),
///     bookings: vec![
///         Booking::new("w1", 480, Direction::In, Category::Work),
///         Booking::new("w2", 1020, Direction::Out, Category::Work),
///     ],
/// };
/// let broken = DayInput {
///     schedule: DaySchedule::default(),
///     bookings: vec![Booking::new("w3", 480, Direction::In, Category::Work)],
/// };
///
/// let results = calculate_batch(&[day, broken]);
/// assert_eq!(results[0].net_minutes, 540);
/// assert!(results[1].has_errors());
/// ```
pub fn calculate_batch(days: &[DayInput]) -> Vec<CalculationResult> {
    let results: Vec<CalculationResult> = days.par_iter().map(calculate_day).collect();

    let days_with_errors = results.iter().filter(|r| r.has_errors()).count();
    info!(
        days = days.len(),
        days_with_errors,
        "Calculated batch"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, Category, DaySchedule, Direction, ErrorCode};

    fn day(index: usize, come: i32, go: Option<i32>) -> DayInput {
        let mut bookings = vec![Booking::new(
            format!("d{}-in", index),
            come,
            Direction::In,
            Category::Work,
        )];
        if let Some(go) = go {
            bookings.push(Booking::new(
                format!("d{}-out", index),
                go,
                Direction::Out,
                Category::Work,
            ));
        }
        DayInput {
            schedule: DaySchedule {
                target_minutes: 480,
                ..Default::default()
            },
            bookings,
        }
    }

    #[test]
    fn test_batch_matches_sequential_calculation() {
        let days: Vec<DayInput> = (0..50)
            .map(|i| day(i, 420 + (i as i32 % 60), Some(960 + (i as i32 % 90))))
            .collect();

        let parallel = calculate_batch(&days);
        let sequential: Vec<CalculationResult> = days.iter().map(calculate_day).collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_bad_day_does_not_abort_batch() {
        let days = vec![day(0, 480, Some(1020)), day(1, 480, None), day(2, 500, Some(1000))];
        let results = calculate_batch(&days);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].net_minutes, 540);
        assert_eq!(results[1].errors, vec![ErrorCode::MissingGo]);
        assert_eq!(results[2].net_minutes, 500);
    }

    #[test]
    fn test_empty_batch() {
        assert!(calculate_batch(&[]).is_empty());
    }
}
