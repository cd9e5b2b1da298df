/// Milliseconds in one civil day.
pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

/// Return true if this is a leap year, false otherwise.
pub(crate) const fn is_leap_year(year: i16) -> bool {
  year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month of the given year.
pub(crate) const fn days_in_month(year: i16, month: u8) -> u8 {
  match month {
    1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
    4 | 6 | 9 | 11 => 30,
    _ => match is_leap_year(year) {
      true => 29,
      false => 28,
    },
  }
}
