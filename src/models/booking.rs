//! Booking model and related types.
//!
//! A booking is one raw clock event of an employee-day. Bookings are
//! immutable for the duration of a calculation run; adjusted times are
//! carried by fresh copies produced with [`Booking::with_time`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a booking.
///
/// The engine only compares and orders IDs; it never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a booking ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BookingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Whether a booking is an arrival/return or a departure/break start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Arrival at work, or return from a break.
    In,
    /// Departure from work, or start of a break.
    Out,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// The accounting category a booking belongs to.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{Category, Direction};
///
/// // Work intervals open on an arrival...
/// assert_eq!(Category::Work.start_direction(), Direction::In);
/// // ...break intervals open when the employee leaves work.
/// assert_eq!(Category::Break.start_direction(), Direction::Out);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Work time accounting.
    Work,
    /// Break time accounting.
    Break,
}

impl Category {
    /// Both categories, in the order the pairing engine processes them.
    pub const ALL: [Category; 2] = [Category::Work, Category::Break];

    /// The direction of the booking that opens an interval of this category.
    pub fn start_direction(self) -> Direction {
        match self {
            Category::Work => Direction::In,
            Category::Break => Direction::Out,
        }
    }

    /// The direction of the booking that closes an interval of this category.
    pub fn end_direction(self) -> Direction {
        self.start_direction().opposite()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Work => write!(f, "work"),
            Category::Break => write!(f, "break"),
        }
    }
}

/// A single timestamped clock event.
///
/// `time` is minutes from midnight of the booking's calendar day.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{Booking, Category, Direction};
///
/// let arrival = Booking::new("b1", 480, Direction::In, Category::Work);
/// assert_eq!(arrival.time, 480);
/// assert!(arrival.pair_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: BookingId,
    /// Minutes from midnight.
    pub time: i32,
    /// Whether this is an in or out event.
    pub direction: Direction,
    /// Work or break accounting.
    pub category: Category,
    /// Link to a counterpart booking established by an editing workflow.
    #[serde(default)]
    pub pair_id: Option<BookingId>,
}

impl Booking {
    /// Creates an unlinked booking.
    pub fn new(
        id: impl Into<BookingId>,
        time: i32,
        direction: Direction,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            time,
            direction,
            category,
            pair_id: None,
        }
    }

    /// Returns the booking linked to the given counterpart.
    pub fn with_pair(mut self, pair_id: impl Into<BookingId>) -> Self {
        self.pair_id = Some(pair_id.into());
        self
    }

    /// Returns a copy of this booking carrying a different time.
    pub fn with_time(&self, time: i32) -> Self {
        Self {
            time,
            ..self.clone()
        }
    }

    /// Whether this booking opens an interval of its category.
    pub fn is_start(&self) -> bool {
        self.direction == self.category.start_direction()
    }
}
