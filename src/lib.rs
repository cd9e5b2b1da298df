//! The `timestep-rs` crate walks a fixed half-open time range `[start, end)`
//! in discrete, successive sub-intervals. The stepping rule is either a fixed
//! duration or a calendar-unit step ("one day", "one month") that respects
//! calendar irregularities: varying month lengths, leap years, and field
//! overflow into larger units. The final partial interval is clamped to the
//! overall end boundary rather than overshooting it.
//!
//! Instants are plain integers: milliseconds since the Unix epoch, in UTC.
//!
//! ## Examples
//!
//! Bucketing a date range by calendar month, month-end clamping included:
//!
//! ```
//! use timestep::DateTime;
//! use timestep::Interval;
//! use timestep::RangeIntervalGenerator;
//! use timestep::Unit;
//!
//! let start = DateTime::new(2024, 1, 31).instant();
//! let end = DateTime::new(2024, 4, 15).instant();
//! let months: Vec<Interval> =
//!   RangeIntervalGenerator::with_step(start, end, Unit::Month).intervals().collect();
//! assert_eq!(months[0].end, DateTime::new(2024, 2, 29).instant());
//! assert_eq!(months.last().unwrap().end, end);
//! ```
//!
//! Or driving the cursor by hand:
//!
//! ```
//! use timestep::IntervalGenerator;
//! use timestep::RangeIntervalGenerator;
//!
//! let mut generator = RangeIntervalGenerator::with_span(0, 10, 4);
//! let mut bounds = vec![];
//! loop {
//!   bounds.push((generator.current_start(), generator.current_end()));
//!   if !generator.advance() {
//!     break;
//!   }
//! }
//! assert_eq!(bounds, [(0, 4), (4, 8), (8, 10)]);
//! ```

mod calendar;
mod datetime;
mod generator;
mod interval;
#[cfg(feature = "serde")]
mod serde;
mod unit;
mod utils;

pub use calendar::CalendarStep;
pub use calendar::Gregorian;
pub use calendar::HORIZON;
pub use datetime::DateTime;
pub use generator::IntervalGenerator;
pub use generator::Intervals;
pub use generator::RangeIntervalGenerator;
pub use interval::Interval;
pub use unit::ParseUnitError;
pub use unit::Unit;

/// An instant in time: milliseconds since the Unix epoch, in UTC.
pub type Instant = i64;
