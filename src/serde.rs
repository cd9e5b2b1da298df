use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error;
use serde::de::IgnoredAny;
use serde::de::MapAccess;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::ser::SerializeStruct;

use crate::Interval;
use crate::Unit;

impl Serialize for Interval {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Interval", 2)?;
    state.serialize_field("start", &self.start)?;
    state.serialize_field("end", &self.end)?;
    state.end()
  }
}

struct IntervalVisitor;

impl<'de> Visitor<'de> for IntervalVisitor {
  type Value = Interval;

  #[cfg(not(tarpaulin_include))]
  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("an interval with `start` and `end` instants")
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
    let start = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(0, &self))?;
    let end = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(1, &self))?;
    Ok(Interval::new(start, end))
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
    let mut start = None;
    let mut end = None;
    while let Some(key) = map.next_key::<String>()? {
      match key.as_str() {
        "start" => start = Some(map.next_value()?),
        "end" => end = Some(map.next_value()?),
        _ => {
          map.next_value::<IgnoredAny>()?;
        },
      }
    }
    let start = start.ok_or_else(|| A::Error::missing_field("start"))?;
    let end = end.ok_or_else(|| A::Error::missing_field("end"))?;
    Ok(Interval::new(start, end))
  }
}

impl<'de> Deserialize<'de> for Interval {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_struct("Interval", &["start", "end"], IntervalVisitor)
  }
}

impl Serialize for Unit {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(match self {
      Self::Second => "second",
      Self::Minute => "minute",
      Self::Hour => "hour",
      Self::Day => "day",
      Self::Week => "week",
      Self::Month => "month",
      Self::Year => "year",
    })
  }
}

struct UnitVisitor;

impl Visitor<'_> for UnitVisitor {
  type Value = Unit;

  #[cfg(not(tarpaulin_include))]
  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a calendar unit name")
  }

  fn visit_str<E: Error>(self, s: &str) -> Result<Self::Value, E> {
    s.parse().map_err(E::custom)
  }
}

impl<'de> Deserialize<'de> for Unit {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_str(UnitVisitor)
  }
}
