use std::fmt;

use crate::Instant;

/// A contiguous, half-open range `[start, end)` of instants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Interval {
  pub start: Instant,
  pub end: Instant,
}

impl Interval {
  /// A representation of the half-open range `[start, end)`.
  #[inline]
  pub const fn new(start: Instant, end: Instant) -> Self {
    Self { start, end }
  }

  /// The length of this interval, in milliseconds.
  ///
  /// ## Examples
  ///
  /// ```
  /// # use timestep::Interval;
  /// assert_eq!(Interval::new(0, 86_400_000).duration(), 86_400_000);
  /// ```
  pub const fn duration(&self) -> i64 {
    self.end.saturating_sub(self.start)
  }

  /// Whether this interval contains no instants at all.
  pub const fn is_empty(&self) -> bool {
    self.start >= self.end
  }

  /// Whether the given instant falls within this interval.
  ///
  /// The start boundary is inclusive and the end boundary is exclusive.
  ///
  /// ## Examples
  ///
  /// ```
  /// # use timestep::Interval;
  /// let interval = Interval::new(0, 10);
  /// assert!(interval.contains(0));
  /// assert!(interval.contains(9));
  /// assert!(!interval.contains(10));
  /// ```
  pub const fn contains(&self, instant: Instant) -> bool {
    self.start <= instant && instant < self.end
  }
}

impl fmt::Display for Interval {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {})", self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use assert2::check;

  use super::*;

  #[test]
  fn test_contains() {
    let interval = Interval::new(5, 10);
    check!(!interval.contains(4));
    check!(interval.contains(5));
    check!(interval.contains(9));
    check!(!interval.contains(10));
  }

  #[test]
  fn test_empty() {
    check!(Interval::new(5, 5).is_empty());
    check!(!Interval::new(5, 6).is_empty());
    check!(Interval::new(5, 5).duration() == 0);
    check!(!Interval::new(5, 5).contains(5));
  }

  #[test]
  fn test_display() {
    check!(Interval::new(0, 10).to_string() == "[0, 10)");
  }
}
