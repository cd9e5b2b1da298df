use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// A named calendar granularity whose arithmetic may be irregular.
///
/// Smaller units (seconds through weeks) span a fixed number of milliseconds;
/// months and years vary in length and require calendar-field arithmetic.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Unit {
  Second = 0,
  Minute = 1,
  Hour = 2,
  Day = 3,
  Week = 4,
  Month = 5,
  Year = 6,
}

impl Display for Unit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    macro_rules! display {
      ($($e:ident),*) => {
        f.write_str(match self {
          $(Self::$e => stringify!($e)),*
        })
      };
    }
    display!(Second, Minute, Hour, Day, Week, Month, Year)
  }
}

impl FromStr for Unit {
  type Err = ParseUnitError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "second" => Ok(Self::Second),
      "minute" => Ok(Self::Minute),
      "hour" => Ok(Self::Hour),
      "day" => Ok(Self::Day),
      "week" => Ok(Self::Week),
      "month" => Ok(Self::Month),
      "year" => Ok(Self::Year),
      _ => Err(ParseUnitError { src: s.into() }),
    }
  }
}

/// Error when parsing a [`Unit`] from a string.
#[derive(Debug)]
pub struct ParseUnitError {
  src: String,
}

impl std::error::Error for ParseUnitError {}

impl Display for ParseUnitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Unrecognized calendar unit: {}", self.src)
  }
}
