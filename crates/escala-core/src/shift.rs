//! Shift types. A shift is a single duty assignment of one person to one day.
//!
//! Dates and times are opaque calendar tokens: a [`DutyDate`] is only checked
//! for its `YYYY-MM-DD` shape and a [`ClockTime`] is a minute of the day. No
//! timezone or calendar arithmetic is performed.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{ValidationError, person::Person};

// ─── DutyDate ────────────────────────────────────────────────────────────────

/// A calendar day in `YYYY-MM-DD` form.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DutyDate(String);

impl DutyDate {
  /// Accept `s` only if it is exactly four digits, `-`, two digits, `-`, two
  /// digits.
  pub fn parse(s: &str) -> Result<Self, ValidationError> {
    if is_day_shaped(s) {
      Ok(Self(s.to_owned()))
    } else {
      Err(ValidationError::field("date", "date must be in YYYY-MM-DD format"))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

/// `true` when `s` has the exact `YYYY-MM-DD` shape.
pub fn is_day_shaped(s: &str) -> bool {
  let b = s.as_bytes();
  b.len() == 10
    && b.iter().enumerate().all(|(i, c)| match i {
      4 | 7 => *c == b'-',
      _ => c.is_ascii_digit(),
    })
}

impl fmt::Display for DutyDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(&self.0) }
}

impl TryFrom<String> for DutyDate {
  type Error = ValidationError;

  fn try_from(s: String) -> Result<Self, Self::Error> { Self::parse(&s) }
}

impl From<DutyDate> for String {
  fn from(d: DutyDate) -> Self { d.0 }
}

// ─── ClockTime ───────────────────────────────────────────────────────────────

/// A 24-hour `HH:MM` time of day.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
  /// Parse a two-digit hour (00–23), `:`, and two-digit minute (00–59).
  pub fn parse(field: &str, s: &str) -> Result<Self, ValidationError> {
    let invalid =
      || ValidationError::field(field, format!("{field} must be in HH:MM format"));

    let b = s.as_bytes();
    let shaped = b.len() == 5
      && b[2] == b':'
      && [0, 1, 3, 4].iter().all(|&i| b[i].is_ascii_digit());
    if !shaped {
      return Err(invalid());
    }

    NaiveTime::parse_from_str(s, "%H:%M")
      .map(Self)
      .map_err(|_| invalid())
  }

  /// Minutes since midnight.
  pub fn minutes(self) -> u32 { self.0.hour() * 60 + self.0.minute() }
}

impl fmt::Display for ClockTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(&self.0.format("%H:%M").to_string())
  }
}

impl TryFrom<String> for ClockTime {
  type Error = ValidationError;

  fn try_from(s: String) -> Result<Self, Self::Error> { Self::parse("time", &s) }
}

impl From<ClockTime> for String {
  fn from(t: ClockTime) -> Self { t.to_string() }
}

// ─── Shift ───────────────────────────────────────────────────────────────────

/// A persisted shift. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
  pub id:        i64,
  pub person_id: i64,
  pub date:      DutyDate,
  pub start:     ClockTime,
  pub end:       ClockTime,
}

/// A shift with its assigned person joined in, as returned by both the day
/// view and the paged view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftView {
  #[serde(flatten)]
  pub shift:  Shift,
  pub person: Person,
}

// ─── NewShift ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::RosterStore::insert_shift_if_absent`].
///
/// Construction guarantees a well-shaped date and `start < end`. Whether the
/// person exists is checked later, against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
  person_id: i64,
  date:      DutyDate,
  start:     ClockTime,
  end:       ClockTime,
}

impl NewShift {
  /// Validate in order: the date shape, then both time shapes, then
  /// `start < end`. The first failing stage is reported.
  pub fn new(
    person_id: i64,
    date: &str,
    start: &str,
    end: &str,
  ) -> Result<Self, ValidationError> {
    let date = DutyDate::parse(date)?;

    let start = ClockTime::parse("start", start);
    let end = ClockTime::parse("end", end);
    let (start, end) = match (start, end) {
      (Ok(s), Ok(e)) => (s, e),
      (Err(mut a), Err(b)) => {
        a.merge(b);
        return Err(a);
      }
      (Err(e), _) | (_, Err(e)) => return Err(e),
    };

    if start >= end {
      let mut err = ValidationError::new("invalid time range");
      err.push("end", "start must be earlier than end");
      return Err(err);
    }

    Ok(Self { person_id, date, start, end })
  }

  pub fn person_id(&self) -> i64 { self.person_id }

  pub fn date(&self) -> &DutyDate { &self.date }

  pub fn start(&self) -> ClockTime { self.start }

  pub fn end(&self) -> ClockTime { self.end }

  /// Attach the store-assigned id.
  pub fn into_shift(self, id: i64) -> Shift {
    Shift {
      id,
      person_id: self.person_id,
      date: self.date,
      start: self.start,
      end: self.end,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn day_shape_is_exact() {
    assert!(is_day_shaped("2024-05-01"));
    assert!(!is_day_shaped("2024-5-01"));
    assert!(!is_day_shaped("2024/05/01"));
    assert!(!is_day_shaped(" 2024-05-01"));
    assert!(!is_day_shaped("2024-05-01T00:00"));
    assert!(!is_day_shaped(""));
  }

  #[test]
  fn clock_time_bounds() {
    assert_eq!(ClockTime::parse("start", "00:00").unwrap().minutes(), 0);
    assert_eq!(ClockTime::parse("start", "23:59").unwrap().minutes(), 1439);
    assert!(ClockTime::parse("start", "24:00").is_err());
    assert!(ClockTime::parse("start", "12:60").is_err());
    assert!(ClockTime::parse("start", "8:00").is_err());
    assert!(ClockTime::parse("start", "08-00").is_err());
  }

  #[test]
  fn clock_time_displays_zero_padded() {
    let t = ClockTime::parse("start", "07:05").unwrap();
    assert_eq!(t.to_string(), "07:05");
  }

  #[test]
  fn new_shift_accepts_valid_input() {
    let s = NewShift::new(1, "2024-05-01", "08:00", "12:00").unwrap();
    assert_eq!(s.person_id(), 1);
    assert_eq!(s.date().as_str(), "2024-05-01");
    assert_eq!(s.start().minutes(), 480);
    assert_eq!(s.end().minutes(), 720);
  }

  #[test]
  fn equal_or_inverted_times_are_rejected() {
    let err = NewShift::new(1, "2024-05-01", "08:00", "08:00").unwrap_err();
    assert!(err.fields.contains_key("end"));
    assert!(NewShift::new(1, "2024-05-01", "13:00", "12:59").is_err());
  }

  #[test]
  fn date_is_checked_before_times() {
    let err = NewShift::new(1, "01/05/2024", "12:00", "08:00").unwrap_err();
    assert_eq!(err.fields.keys().collect::<Vec<_>>(), ["date"]);
  }

  #[test]
  fn both_bad_times_are_reported() {
    let err = NewShift::new(1, "2024-05-01", "8h", "noon").unwrap_err();
    assert!(err.fields.contains_key("start"));
    assert!(err.fields.contains_key("end"));
  }

  #[test]
  fn shift_view_serialises_flat_with_person() {
    let view = ShiftView {
      shift:  NewShift::new(3, "2024-05-01", "08:00", "12:00")
        .unwrap()
        .into_shift(9),
      person: Person {
        id:   3,
        code: "A1".into(),
        name: "Ana".into(),
        rank: "Cabo".into(),
      },
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], 9);
    assert_eq!(json["person_id"], 3);
    assert_eq!(json["date"], "2024-05-01");
    assert_eq!(json["start"], "08:00");
    assert_eq!(json["person"]["code"], "A1");

    let back: ShiftView = serde_json::from_value(json).unwrap();
    assert_eq!(back, view);
  }
}
