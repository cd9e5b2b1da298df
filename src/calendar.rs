//! The calendar-arithmetic capability consumed by interval generators.

use crate::Instant;
use crate::datetime::DateTime;
use crate::unit::Unit;

/// The latest instant generators treat as usable: midnight 3000-01-01 UTC.
///
/// This is deliberately far below `i64::MAX`: the stepping machinery adds to
/// interval boundaries past the overall end, so the bound itself must remain
/// safely addable without wrapping.
pub const HORIZON: Instant = DateTime::new(3000, 1, 1).instant();

/// A calendar-arithmetic capability: add N units of a calendar field to an
/// instant, with correct overflow into larger fields (day → month → year).
///
/// Interval generators consume this through dynamic dispatch, so calendar
/// stepping can be exercised against a fake calendar in tests without a real
/// calendar engine. The receiver is mutable to permit stateful
/// implementations.
pub trait CalendarStep {
  /// Add `amount` units of the given calendar field to `instant`, returning
  /// the resulting instant.
  fn add(&mut self, instant: Instant, unit: Unit, amount: i32) -> Instant;
}

/// [`CalendarStep`] over the proleptic Gregorian calendar, in UTC.
///
/// Month and year steps clamp the day-of-month: one month past January 31 is
/// the last day of February.
#[derive(Copy, Clone, Debug, Default)]
pub struct Gregorian;

impl CalendarStep for Gregorian {
  fn add(&mut self, instant: Instant, unit: Unit, amount: i32) -> Instant {
    DateTime::from_instant(instant).add(unit, amount).instant()
  }
}

#[cfg(test)]
mod tests {
  use assert2::check;

  use super::*;

  #[test]
  fn test_horizon() {
    // 3000-01-01 is 32,503,680,000 seconds past the epoch.
    check!(HORIZON == 32_503_680_000_000);
    check!(HORIZON < i64::MAX / 2);
  }

  #[test]
  fn test_gregorian_add() {
    let mut cal = Gregorian;
    let jan31 = DateTime::new(2024, 1, 31).instant();
    check!(cal.add(jan31, Unit::Month, 1) == DateTime::new(2024, 2, 29).instant());
    check!(cal.add(jan31, Unit::Day, 1) == DateTime::new(2024, 2, 1).instant());
    check!(cal.add(jan31, Unit::Year, 1) == DateTime::new(2025, 1, 31).instant());
    check!(cal.add(0, Unit::Hour, 1) == 3_600_000);
  }

  #[test]
  fn test_gregorian_add_is_stateless() {
    let mut cal = Gregorian;
    let start = DateTime::new(2024, 1, 31).instant();
    let one = cal.add(start, Unit::Month, 1);
    check!(cal.add(one, Unit::Month, 1) == DateTime::new(2024, 3, 29).instant());
  }
}
