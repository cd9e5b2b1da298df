use std::fmt;
use std::str::FromStr;

use strptime::ParseError;
use strptime::ParseResult;
use strptime::Parser;

use crate::Instant;
use crate::unit::Unit;
use crate::utils;
use crate::utils::MILLIS_PER_DAY;

/// A civil Gregorian date and time-of-day, in UTC, with millisecond precision.
///
/// `DateTime` is the calendar cursor behind calendar-unit stepping: it converts
/// between epoch-millisecond instants and calendar fields, and implements
/// field arithmetic with correct overflow into larger fields (day → month →
/// year) and day-of-month clamping.
///
/// ## Examples
///
/// ```
/// use timestep::DateTime;
/// use timestep::Unit;
///
/// let date = DateTime::new(2024, 1, 31);
/// assert_eq!(date.add(Unit::Month, 1), DateTime::new(2024, 2, 29));
/// assert_eq!(DateTime::new(2023, 1, 31).add(Unit::Month, 1), DateTime::new(2023, 2, 28));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
  year: i16,
  month: u8,
  day: u8,
  /// Milliseconds elapsed since midnight.
  msec: u32,
}

impl DateTime {
  /// Construct a new `DateTime` at midnight of the provided year, month, and
  /// day.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::DateTime;
  /// let date = DateTime::new(2012, 4, 21);
  /// assert_eq!(date.year(), 2012);
  /// assert_eq!(date.month(), 4);
  /// assert_eq!(date.day(), 21);
  /// ```
  ///
  /// ## Panic
  ///
  /// This function panics if it receives "out-of-bounds" values (e.g. "March
  /// 32" or "February 30").
  pub const fn new(year: i16, month: u8, day: u8) -> Self {
    assert!(month >= 1 && month <= 12, "Month out-of-bounds");
    assert!(day >= 1 && day <= utils::days_in_month(year, month), "Day out-of-bounds");
    Self { year, month, day, msec: 0 }
  }

  /// This date at the provided time of day.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::DateTime;
  /// let dt = DateTime::new(2012, 4, 21).at(16, 30, 0);
  /// assert_eq!(dt.hour(), 16);
  /// assert_eq!(dt.minute(), 30);
  /// ```
  ///
  /// ## Panic
  ///
  /// This function panics if the hour, minute, or second is out-of-bounds.
  pub const fn at(self, hour: u8, minute: u8, second: u8) -> Self {
    assert!(hour < 24, "Hour out-of-bounds");
    assert!(minute < 60, "Minute out-of-bounds");
    assert!(second < 60, "Second out-of-bounds");
    let msec = (hour as u32 * 3_600 + minute as u32 * 60 + second as u32) * 1_000;
    Self { year: self.year, month: self.month, day: self.day, msec }
  }

  /// Construct a new `DateTime` from the provided epoch-millisecond instant.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::DateTime;
  ///
  /// assert_eq!(DateTime::from_instant(0), DateTime::new(1970, 1, 1));
  /// assert_eq!(DateTime::from_instant(1334966400000), DateTime::new(2012, 4, 21));
  /// ```
  ///
  /// Negative instants are also supported:
  ///
  /// ```
  /// # use timestep::DateTime;
  /// assert_eq!(DateTime::from_instant(-3_600_000), DateTime::new(1969, 12, 31).at(23, 0, 0));
  /// ```
  pub const fn from_instant(instant: Instant) -> Self {
    let day_count = instant.div_euclid(MILLIS_PER_DAY) as i32;
    let msec = instant.rem_euclid(MILLIS_PER_DAY) as u32;
    let (year, month, day) = civil_from_days(day_count);
    Self { year, month, day, msec }
  }

  /// Parse a date from a string, according to the provided format string,
  /// yielding the corresponding `DateTime` at midnight.
  pub fn parse(date_str: impl AsRef<str>, date_fmt: &'static str) -> ParseResult<DateTime> {
    let parser = Parser::new(date_fmt);
    let raw_date = parser.parse(date_str)?.date()?;
    Ok(raw_date.into())
  }
}

impl DateTime {
  /// Returns the year number in the calendar date.
  #[inline]
  pub const fn year(&self) -> i16 {
    self.year
  }

  /// Returns the month number, starting from 1.
  #[inline]
  pub const fn month(&self) -> u8 {
    self.month
  }

  /// Returns the day of the month, starting from 1.
  #[inline]
  pub const fn day(&self) -> u8 {
    self.day
  }

  /// The hour of the day. Range: `[0, 24)`
  #[inline]
  pub const fn hour(&self) -> u8 {
    (self.msec / 3_600_000) as u8
  }

  /// The minute of the hour. Range: `[0, 60)`
  #[inline]
  pub const fn minute(&self) -> u8 {
    (self.msec / 60_000 % 60) as u8
  }

  /// The second of the minute. Range: `[0, 60)`
  #[inline]
  pub const fn second(&self) -> u8 {
    (self.msec / 1_000 % 60) as u8
  }
}

impl DateTime {
  /// The epoch-millisecond instant for this date and time, in UTC.
  ///
  /// ## Examples
  ///
  /// ```
  /// # use timestep::DateTime;
  /// assert_eq!(DateTime::new(1970, 1, 1).instant(), 0);
  /// assert_eq!(DateTime::new(1969, 12, 31).instant(), -86_400_000);
  /// assert_eq!(DateTime::new(2012, 4, 21).instant(), 1334966400000);
  /// ```
  pub const fn instant(&self) -> Instant {
    days_from_civil(self.year, self.month, self.day) as i64 * MILLIS_PER_DAY + self.msec as i64
  }

  /// Return a new `DateTime` with `amount` units of the given calendar field
  /// added.
  ///
  /// Month and year addition overflows into larger fields and clamps the
  /// day-of-month to the length of the target month; smaller units span a
  /// fixed number of milliseconds.
  ///
  /// ## Examples
  ///
  /// ```
  /// use timestep::DateTime;
  /// use timestep::Unit;
  ///
  /// assert_eq!(DateTime::new(2024, 12, 15).add(Unit::Month, 1), DateTime::new(2025, 1, 15));
  /// assert_eq!(DateTime::new(2024, 2, 29).add(Unit::Year, 1), DateTime::new(2025, 2, 28));
  /// assert_eq!(DateTime::new(2024, 2, 28).add(Unit::Day, 1), DateTime::new(2024, 2, 29));
  /// assert_eq!(DateTime::new(2024, 3, 15).add(Unit::Month, -1), DateTime::new(2024, 2, 15));
  /// ```
  pub fn add(&self, unit: Unit, amount: i32) -> Self {
    match unit {
      Unit::Year => {
        let year = (self.year as i32 + amount) as i16;
        Self { year, month: self.month, day: clamp_day(year, self.month, self.day), msec: self.msec }
      },
      Unit::Month => {
        let months = self.year as i32 * 12 + self.month as i32 - 1 + amount;
        let year = months.div_euclid(12) as i16;
        let month = (months.rem_euclid(12) + 1) as u8;
        Self { year, month, day: clamp_day(year, month, self.day), msec: self.msec }
      },
      Unit::Week => self.add_millis(amount as i64 * 7 * MILLIS_PER_DAY),
      Unit::Day => self.add_millis(amount as i64 * MILLIS_PER_DAY),
      Unit::Hour => self.add_millis(amount as i64 * 3_600_000),
      Unit::Minute => self.add_millis(amount as i64 * 60_000),
      Unit::Second => self.add_millis(amount as i64 * 1_000),
    }
  }

  fn add_millis(&self, millis: i64) -> Self {
    Self::from_instant(self.instant().saturating_add(millis))
  }
}

/// The day-of-month, clamped to the length of the given month.
const fn clamp_day(year: i16, month: u8, day: u8) -> u8 {
  let bound = utils::days_in_month(year, month);
  if day > bound { bound } else { day }
}

/// The number of days elapsed since 1970-01-01 for the given civil date.
///
/// The algorithm to convert from a civil year/month/day to the number of days
/// that have elapsed since the epoch is taken from here:
/// https://howardhinnant.github.io/date_algorithms.html#days_from_civil
const fn days_from_civil(year: i16, month: u8, day: u8) -> i32 {
  let year = year as i32 - if month <= 2 { 1 } else { 0 };
  let month = month as i32;
  let day = day as i32;
  let era: i32 = if year >= 0 { year } else { year - 399 } / 400;
  let year_of_era = year - era * 400;
  let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day - 1;
  let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
  era * 146097 + day_of_era - 719468
}

/// The civil year/month/day for the given count of days since 1970-01-01.
///
/// The algorithm to convert from the day count back to a civil date is taken
/// from here: https://howardhinnant.github.io/date_algorithms.html#civil_from_days
const fn civil_from_days(day_count: i32) -> (i16, u8, u8) {
  let shifted = day_count + 719468; // Days from March 1, 0 A.D.
  let era = if shifted >= 0 { shifted } else { shifted - 146_096 } / 146_097;
  let doe = shifted - era * 146_097; // day of era: [0, 146_097)
  let year_of_era = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
  let year = year_of_era + era * 400;
  let day_of_year = doe - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
  let mp = (5 * day_of_year + 2) / 153;
  let day = day_of_year - (153 * mp + 2) / 5 + 1;
  let month = if mp < 10 { mp + 3 } else { mp - 9 };
  (year as i16 + if month <= 2 { 1 } else { 0 }, month as u8, day as u8)
}

impl fmt::Debug for DateTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

impl fmt::Display for DateTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
      self.year,
      self.month,
      self.day,
      self.hour(),
      self.minute(),
      self.second()
    )
  }
}

impl FromStr for DateTime {
  type Err = ParseError;

  fn from_str(s: &str) -> ParseResult<Self> {
    Self::parse(s, "%Y-%m-%d")
  }
}

impl From<strptime::RawDate> for DateTime {
  fn from(value: strptime::RawDate) -> Self {
    Self::new(value.year(), value.month(), value.day())
  }
}
