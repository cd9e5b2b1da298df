//! Interval generation over half-open time ranges.

use std::cmp::Ordering;

use crate::Instant;
use crate::calendar::CalendarStep;
use crate::calendar::Gregorian;
use crate::calendar::HORIZON;
use crate::interval::Interval;
use crate::unit::Unit;

/// The surface an interval generator exposes to consumers: a mutable cursor
/// over successive sub-intervals of a fixed overall range, advanced on demand.
///
/// Consumers read the current interval through [`current_start`] and
/// [`current_end`], then call [`advance`] to move to the next one. A false
/// return from `advance` means the cursor has moved past the overall end and
/// the generator is exhausted.
///
/// [`advance`]: IntervalGenerator::advance
/// [`current_start`]: IntervalGenerator::current_start
/// [`current_end`]: IntervalGenerator::current_end
pub trait IntervalGenerator {
  /// Advance to the next sub-interval. Returns true while the cursor remains
  /// within the overall range, and false once the generator is exhausted.
  ///
  /// Exhaustion is terminal: further calls keep returning false and leave the
  /// cursor parked at the overall end.
  fn advance(&mut self) -> bool;

  /// The lower bound of the current sub-interval (inclusive).
  fn current_start(&self) -> Instant;

  /// The upper bound of the current sub-interval (exclusive).
  fn current_end(&self) -> Instant;

  /// Whether sub-intervals remain beyond the current one.
  ///
  /// This is a lookahead over cached state, not a recomputation: it reports
  /// whether the already-computed following boundary falls strictly inside
  /// the overall range.
  fn has_next(&self) -> bool;

  /// Whether the current interval is active. This generator models no gaps,
  /// so the default reports true; variants modeling sparse interval sets may
  /// override it.
  fn is_current_active(&self) -> bool {
    true
  }

  /// Whether a single instance may be reused across independent consumers.
  ///
  /// This is a caller contract, not an enforced invariant: a generator that
  /// reports true carries no consumer-specific state, but it is still a
  /// mutable cursor and concurrent advancement must be serialized by the
  /// caller.
  fn can_be_shared(&self) -> bool {
    true
  }
}

/// How the following interval boundary is computed on each advance.
enum Stepping {
  /// The whole range is a single interval; the first advance reaches `end`
  /// and no further interval exists.
  Once,
  /// Fixed-duration stepping, in milliseconds.
  Span { step: i64 },
  /// Calendar-field stepping through an injected calendar capability.
  Calendar { unit: Unit, amount: i32, stepper: Box<dyn CalendarStep> },
}

/// A generator walking a fixed range `[start, end)` in successive
/// sub-intervals, stepped by a fixed duration or by a calendar field.
///
/// Construction establishes the first sub-interval; each [`advance`] makes
/// the previous upper bound the new lower bound, so the produced intervals
/// are contiguous and non-overlapping, and the final one is clamped to the
/// overall end boundary.
///
/// [`advance`]: IntervalGenerator::advance
///
/// ## Examples
///
/// Bucketing a quarter by calendar month:
///
/// ```
/// use timestep::DateTime;
/// use timestep::Interval;
/// use timestep::RangeIntervalGenerator;
/// use timestep::Unit;
///
/// let start = DateTime::new(2024, 1, 1).instant();
/// let end = DateTime::new(2024, 4, 1).instant();
/// let months: Vec<Interval> =
///   RangeIntervalGenerator::with_step(start, end, Unit::Month).intervals().collect();
/// assert_eq!(months.len(), 3);
/// assert_eq!(months[0], Interval::new(start, DateTime::new(2024, 2, 1).instant()));
/// assert_eq!(months[2].end, end);
/// ```
pub struct RangeIntervalGenerator {
  start: Instant,
  end: Instant,
  current_end: Instant,
  next_end: Instant,
  stepping: Stepping,
}

impl RangeIntervalGenerator {
  /// A generator whose only interval is the whole range `[start, end)`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::IntervalGenerator;
  /// use timestep::RangeIntervalGenerator;
  ///
  /// let mut generator = RangeIntervalGenerator::new(0, 10);
  /// assert_eq!(generator.current_start(), 0);
  /// assert_eq!(generator.current_end(), 10);
  /// assert!(!generator.has_next());
  /// assert!(!generator.advance());
  /// ```
  ///
  /// ## Panic
  ///
  /// This function panics if `start` exceeds `end`.
  pub fn new(start: Instant, end: Instant) -> Self {
    assert!(start <= end, "Range start must not exceed its end");
    Self { start, end, current_end: end, next_end: end, stepping: Stepping::Once }
  }

  /// A generator stepping `[start, end)` by a fixed duration, in
  /// milliseconds.
  ///
  /// The final interval is truncated to `end` when the range is not an exact
  /// multiple of `step`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::Interval;
  /// use timestep::RangeIntervalGenerator;
  ///
  /// let chunks: Vec<Interval> = RangeIntervalGenerator::with_span(0, 10, 4).intervals().collect();
  /// assert_eq!(chunks, [Interval::new(0, 4), Interval::new(4, 8), Interval::new(8, 10)]);
  /// ```
  ///
  /// ## Panic
  ///
  /// This function panics if `start` exceeds `end` or `step` is not positive.
  pub fn with_span(start: Instant, end: Instant, step: i64) -> Self {
    assert!(start <= end, "Range start must not exceed its end");
    assert!(step >= 1, "Span step must be positive");
    let first = start.saturating_add(step);
    Self {
      start,
      end,
      current_end: match first > end {
        true => end,
        false => first,
      },
      next_end: first.saturating_add(step),
      stepping: Stepping::Span { step },
    }
  }

  /// A generator stepping `[start, end)` by one calendar unit at a time, over
  /// the Gregorian calendar.
  ///
  /// Calendar stepping respects calendar irregularities: one month past
  /// January 31, 2024 ends on February 29, and the month after that on
  /// March 29.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::DateTime;
  /// use timestep::IntervalGenerator;
  /// use timestep::RangeIntervalGenerator;
  /// use timestep::Unit;
  ///
  /// let start = DateTime::new(2024, 1, 31).instant();
  /// let end = DateTime::new(2024, 4, 30).instant();
  /// let mut generator = RangeIntervalGenerator::with_step(start, end, Unit::Month);
  /// assert_eq!(generator.current_end(), DateTime::new(2024, 2, 29).instant());
  /// assert!(generator.advance());
  /// assert_eq!(generator.current_start(), DateTime::new(2024, 2, 29).instant());
  /// assert_eq!(generator.current_end(), DateTime::new(2024, 3, 29).instant());
  /// ```
  ///
  /// ## Panic
  ///
  /// This function panics if `start` exceeds `end`.
  pub fn with_step(start: Instant, end: Instant, unit: Unit) -> Self {
    Self::with_step_by(start, end, unit, 1)
  }

  /// A generator stepping `[start, end)` by `amount` calendar units at a
  /// time, over the Gregorian calendar.
  ///
  /// ## Panic
  ///
  /// This function panics if `start` exceeds `end` or `amount` is not
  /// positive.
  pub fn with_step_by(start: Instant, end: Instant, unit: Unit, amount: i32) -> Self {
    Self::with_stepper(start, end, unit, amount, Box::new(Gregorian))
  }

  /// A calendar-stepped generator over an injected calendar capability.
  ///
  /// This is the seam for exercising the stepping machinery against a fake
  /// calendar; [`with_step`] and [`with_step_by`] use the real
  /// [`Gregorian`] calendar through the same path.
  ///
  /// [`with_step`]: RangeIntervalGenerator::with_step
  /// [`with_step_by`]: RangeIntervalGenerator::with_step_by
  ///
  /// ## Panic
  ///
  /// This function panics if `start` exceeds `end` or `amount` is not
  /// positive.
  pub fn with_stepper(
    start: Instant,
    end: Instant,
    unit: Unit,
    amount: i32,
    mut stepper: Box<dyn CalendarStep>,
  ) -> Self {
    assert!(start <= end, "Range start must not exceed its end");
    assert!(amount >= 1, "Calendar step amount must be positive");
    let first = stepper.add(start, unit, amount);
    Self {
      start,
      end,
      // In case the range holds just one time period.
      current_end: match first > end {
        true => end,
        false => first,
      },
      next_end: stepper.add(first, unit, amount),
      stepping: Stepping::Calendar { unit, amount, stepper },
    }
  }

  /// A plain-range generator repositioned to the very beginning: immediately
  /// after construction, `current_end()` equals `start` rather than `end`.
  ///
  /// Used when filtering values between two instants rather than enumerating
  /// groups: the caller wants a cursor at the range's opening edge, not a
  /// generator already holding the whole range.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::IntervalGenerator;
  /// use timestep::RangeIntervalGenerator;
  ///
  /// let mut generator = RangeIntervalGenerator::between(5, 10);
  /// assert_eq!(generator.current_end(), 5);
  /// assert!(generator.advance());
  /// assert_eq!(generator.current_start(), 5);
  /// assert_eq!(generator.current_end(), 10);
  /// ```
  pub fn between(start: Instant, end: Instant) -> Self {
    let mut generator = Self::new(start, end);
    generator.current_end = start;
    generator
  }

  /// A generator that is exhausted from the outset: the range `[0, 0)`.
  pub fn empty() -> Self {
    Self::new(0, 0)
  }

  /// A generator spanning all usable time, from the epoch to [`HORIZON`].
  ///
  /// The bound is a late calendar date rather than `i64::MAX` so that
  /// stepping arithmetic past the end cannot wrap. Callers that need a
  /// different notion of "forever" can supply their own bound through
  /// [`continuous_until`].
  ///
  /// [`continuous_until`]: RangeIntervalGenerator::continuous_until
  pub fn continuous() -> Self {
    Self::continuous_until(HORIZON)
  }

  /// A generator spanning `[0, end)` for an externally supplied upper bound.
  ///
  /// The bound must remain safely addable: stepping arithmetic saturates
  /// rather than wraps, but a bound at or near `i64::MAX` defeats the
  /// lookahead and should be avoided.
  pub fn continuous_until(end: Instant) -> Self {
    Self::new(0, end)
  }

  /// The lower bound of the current sub-interval. Alias of
  /// [`current_start`], kept as the raw field accessor.
  ///
  /// [`current_start`]: IntervalGenerator::current_start
  #[inline]
  pub fn start(&self) -> Instant {
    self.start
  }

  /// The upper bound of the entire range, fixed for the generator's
  /// lifetime.
  #[inline]
  pub fn end(&self) -> Instant {
    self.end
  }

  /// Ordering hook for collections of generators.
  ///
  /// Range generators define no meaningful order relative to one another;
  /// this hook is inert and always reports `Ordering::Equal`. It exists so a
  /// richer family of generator kinds can slot an ordering in later without
  /// changing the surface.
  pub fn ordering(&self, _other: &Self) -> Ordering {
    Ordering::Equal
  }

  /// Consume the generator, yielding its remaining sub-intervals in order.
  ///
  /// The union of the yielded intervals is exactly the remaining range, with
  /// no gaps and no overlaps.
  pub fn intervals(self) -> Intervals {
    Intervals { generator: self }
  }
}

impl IntervalGenerator for RangeIntervalGenerator {
  fn advance(&mut self) -> bool {
    // Move on to the next interval: the previous upper bound becomes the new
    // lower bound. If the range holds only one interval, the cursor stops
    // here.
    self.start = self.current_end;
    let follow = self.next_end;
    self.current_end = match follow > self.end {
      true => self.end,
      false => follow,
    };
    // Lookahead proceeds from the unclamped boundary, so the cached state
    // stays on the stepping grid even at the final, truncated interval.
    self.next_end = match &mut self.stepping {
      Stepping::Once => follow,
      Stepping::Span { step } => follow.saturating_add(*step),
      Stepping::Calendar { unit, amount, stepper } => stepper.add(follow, *unit, *amount),
    };
    debug_assert!(self.start <= self.current_end && self.current_end <= self.end);
    #[cfg(feature = "log")]
    log::trace!(
      start = self.start,
      end = self.current_end,
      exhausted = (self.start >= self.end);
      "interval advanced"
    );
    self.start < self.end
  }

  fn current_start(&self) -> Instant {
    self.start
  }

  fn current_end(&self) -> Instant {
    self.current_end
  }

  fn has_next(&self) -> bool {
    self.next_end < self.end
  }
}

impl Default for RangeIntervalGenerator {
  /// The unbounded preset: all usable time, as in
  /// [`continuous`](RangeIntervalGenerator::continuous).
  fn default() -> Self {
    Self::continuous()
  }
}

impl std::fmt::Debug for RangeIntervalGenerator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RangeIntervalGenerator")
      .field("start", &self.start)
      .field("end", &self.end)
      .field("current_end", &self.current_end)
      .field("next_end", &self.next_end)
      .finish_non_exhaustive()
  }
}

/// An iterator over the sub-intervals of a [`RangeIntervalGenerator`].
pub struct Intervals {
  generator: RangeIntervalGenerator,
}

impl Iterator for Intervals {
  type Item = Interval;

  fn next(&mut self) -> Option<Self::Item> {
    match self.generator.current_start() < self.generator.end() {
      false => None,
      true => {
        let interval = Interval::new(self.generator.current_start(), self.generator.current_end());
        self.generator.advance();
        Some(interval)
      },
    }
  }
}

impl IntoIterator for RangeIntervalGenerator {
  type Item = Interval;
  type IntoIter = Intervals;

  fn into_iter(self) -> Intervals {
    self.intervals()
  }
}

#[cfg(test)]
mod tests {
  use assert2::check;

  use super::*;
  use crate::datetime::DateTime;

  const DAY: i64 = 86_400_000;

  /// A fake calendar where every unit spans ten ticks regardless of field.
  struct TenTicks;

  impl CalendarStep for TenTicks {
    fn add(&mut self, instant: Instant, _unit: Unit, amount: i32) -> Instant {
      instant + amount as i64 * 10
    }
  }

  #[test]
  fn test_one_shot_range() {
    let mut generator = RangeIntervalGenerator::new(0, 10);
    check!(generator.current_start() == 0);
    check!(generator.current_end() == 10);
    check!(!generator.has_next());
    check!(!generator.advance());
    check!(generator.current_start() == 10);
    check!(generator.current_end() == 10);
  }

  #[test]
  fn test_exhaustion_is_terminal() {
    let mut generator = RangeIntervalGenerator::new(0, 10);
    check!(!generator.advance());
    for _ in 0..3 {
      check!(!generator.advance());
      check!(generator.current_start() == 10);
      check!(generator.current_end() == 10);
      check!(!generator.has_next());
    }
  }

  #[test]
  fn test_empty() {
    let mut generator = RangeIntervalGenerator::empty();
    check!(generator.current_start() == 0);
    check!(generator.end() == 0);
    check!(!generator.has_next());
    check!(!generator.advance());
    check!(RangeIntervalGenerator::empty().intervals().next().is_none());
  }

  #[test]
  fn test_between_resets_cursor() {
    let mut generator = RangeIntervalGenerator::between(5, 10);
    check!(generator.current_start() == 5);
    check!(generator.current_end() == 5);
    check!(generator.advance());
    check!(generator.current_start() == 5);
    check!(generator.current_end() == 10);
    check!(!generator.advance());
  }

  #[test]
  fn test_continuous() {
    let generator = RangeIntervalGenerator::continuous();
    check!(generator.start() == 0);
    check!(generator.end() == HORIZON);
    let bounded = RangeIntervalGenerator::continuous_until(1_000);
    check!(bounded.end() == 1_000);
    let defaulted = RangeIntervalGenerator::default();
    check!(defaulted.end() == HORIZON);
  }

  #[test]
  fn test_span_stepping() {
    let intervals: Vec<Interval> = RangeIntervalGenerator::with_span(0, 10, 4).intervals().collect();
    check!(intervals == [Interval::new(0, 4), Interval::new(4, 8), Interval::new(8, 10)]);
  }

  #[test]
  fn test_span_exact_multiple() {
    let intervals: Vec<Interval> = RangeIntervalGenerator::with_span(0, 12, 4).intervals().collect();
    check!(intervals == [Interval::new(0, 4), Interval::new(4, 8), Interval::new(8, 12)]);
  }

  #[test]
  fn test_span_shorter_than_one_step() {
    let mut generator = RangeIntervalGenerator::with_span(0, 3, 10);
    check!(generator.current_end() == 3);
    check!(!generator.has_next());
    check!(!generator.advance());
  }

  #[test]
  fn test_has_next_is_strict_lookahead() {
    let mut generator = RangeIntervalGenerator::with_span(0, 10, 4);
    check!(generator.has_next());
    check!(generator.advance());
    // The following boundary (12) already lies past the end, so no intervals
    // remain beyond the next one, even though one more advance succeeds.
    check!(!generator.has_next());
    check!(generator.advance());
    check!(generator.current_end() == 10);
    check!(!generator.advance());
  }

  #[test]
  fn test_calendar_daily() {
    let intervals: Vec<Interval> =
      RangeIntervalGenerator::with_step(0, 3 * DAY, Unit::Day).intervals().collect();
    check!(
      intervals
        == [
          Interval::new(0, DAY),
          Interval::new(DAY, 2 * DAY),
          Interval::new(2 * DAY, 3 * DAY)
        ]
    );
  }

  #[test]
  fn test_calendar_step_amount() {
    let intervals: Vec<Interval> =
      RangeIntervalGenerator::with_step_by(0, 5 * DAY, Unit::Day, 2).intervals().collect();
    check!(
      intervals
        == [
          Interval::new(0, 2 * DAY),
          Interval::new(2 * DAY, 4 * DAY),
          Interval::new(4 * DAY, 5 * DAY)
        ]
    );
  }

  #[test]
  fn test_calendar_month_end_clamping() {
    let start = DateTime::new(2024, 1, 31).instant();
    let end = DateTime::new(2024, 6, 15).instant();
    let intervals: Vec<Interval> =
      RangeIntervalGenerator::with_step(start, end, Unit::Month).intervals().collect();
    let boundary = |y, m, d| DateTime::new(y, m, d).instant();
    check!(
      intervals
        == [
          Interval::new(boundary(2024, 1, 31), boundary(2024, 2, 29)),
          Interval::new(boundary(2024, 2, 29), boundary(2024, 3, 29)),
          Interval::new(boundary(2024, 3, 29), boundary(2024, 4, 29)),
          Interval::new(boundary(2024, 4, 29), boundary(2024, 5, 29)),
          Interval::new(boundary(2024, 5, 29), boundary(2024, 6, 15)),
        ]
    );
  }

  #[test]
  fn test_calendar_shorter_than_one_step() {
    let start = DateTime::new(2024, 3, 1).instant();
    let end = DateTime::new(2024, 3, 10).instant();
    let mut generator = RangeIntervalGenerator::with_step(start, end, Unit::Month);
    check!(generator.current_start() == start);
    check!(generator.current_end() == end);
    check!(!generator.has_next());
    check!(!generator.advance());
  }

  #[test]
  fn test_calendar_exact_two_steps() {
    let mut generator = RangeIntervalGenerator::with_step(0, 2 * DAY, Unit::Day);
    // The lookahead boundary coincides with the end, so it reports no further
    // intervals, while the advance into the second interval still succeeds.
    check!(!generator.has_next());
    check!(generator.advance());
    check!(generator.current_start() == DAY);
    check!(generator.current_end() == 2 * DAY);
    check!(!generator.advance());
  }

  #[test]
  fn test_injected_stepper() {
    let generator = RangeIntervalGenerator::with_stepper(0, 35, Unit::Day, 1, Box::new(TenTicks));
    let intervals: Vec<Interval> = generator.intervals().collect();
    check!(
      intervals
        == [
          Interval::new(0, 10),
          Interval::new(10, 20),
          Interval::new(20, 30),
          Interval::new(30, 35)
        ]
    );
  }

  #[test]
  fn test_coverage_has_no_gaps_or_overlaps() {
    let start = DateTime::new(2023, 11, 30).instant();
    let end = DateTime::new(2024, 9, 1).instant();
    for generator in [
      RangeIntervalGenerator::new(start, end),
      RangeIntervalGenerator::with_span(start, end, 11 * DAY),
      RangeIntervalGenerator::with_step(start, end, Unit::Month),
      RangeIntervalGenerator::with_step_by(start, end, Unit::Week, 3),
    ] {
      let intervals: Vec<Interval> = generator.intervals().collect();
      check!(intervals.first().unwrap().start == start);
      check!(intervals.last().unwrap().end == end);
      for pair in intervals.windows(2) {
        check!(pair[0].end == pair[1].start);
      }
      check!(intervals.iter().all(|interval| !interval.is_empty()));
    }
  }

  #[test]
  fn test_queries_are_idempotent() {
    let generator = RangeIntervalGenerator::with_span(0, 10, 4);
    for _ in 0..3 {
      check!(generator.current_start() == 0);
      check!(generator.current_end() == 4);
      check!(generator.has_next());
    }
  }

  #[test]
  fn test_stub_hooks() {
    let a = RangeIntervalGenerator::new(0, 10);
    let b = RangeIntervalGenerator::empty();
    check!(a.is_current_active());
    check!(a.can_be_shared());
    check!(a.ordering(&b) == Ordering::Equal);
    check!(b.ordering(&a) == Ordering::Equal);
  }

  #[test]
  fn test_debug() {
    let repr = format!("{:?}", RangeIntervalGenerator::new(0, 10));
    check!(repr.contains("start: 0"));
    check!(repr.contains("end: 10"));
  }

  #[test]
  #[should_panic]
  fn test_inverted_range_panics() {
    RangeIntervalGenerator::new(10, 0);
  }

  #[test]
  #[should_panic]
  fn test_zero_span_panics() {
    RangeIntervalGenerator::with_span(0, 10, 0);
  }

  #[test]
  #[should_panic]
  fn test_zero_amount_panics() {
    RangeIntervalGenerator::with_step_by(0, 10, Unit::Month, 0);
  }
}
