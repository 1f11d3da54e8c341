//! Decoding helpers from the plain-text SQLite columns back into domain types.
//!
//! Dates are stored as `YYYY-MM-DD` and times as zero-padded `HH:MM` text, so
//! SQL `ORDER BY` on the raw columns matches the domain ordering.

use escala_core::{
  person::Person,
  shift::{ClockTime, DutyDate, Shift, ShiftView},
};

use crate::{Error, Result};

/// Column list matching [`RawShiftView::from_row`].
pub const SHIFT_VIEW_COLUMNS: &str = "
  s.shift_id, s.person_id, s.duty_date, s.start_time, s.end_time,
  p.code, p.name, p.rank";

pub fn decode_date(s: String) -> Result<DutyDate> {
  DutyDate::parse(&s).map_err(|source| Error::Corrupt {
    column: "duty_date",
    value: s,
    source,
  })
}

pub fn decode_time(column: &'static str, s: String) -> Result<ClockTime> {
  ClockTime::parse(column, &s).map_err(|source| Error::Corrupt {
    column,
    value: s,
    source,
  })
}

pub fn decode_count(what: &'static str, n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::NegativeCount(what))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `persons` row.
pub struct RawPerson {
  pub person_id: i64,
  pub code:      String,
  pub name:      String,
  pub rank:      String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id: row.get(0)?,
      code:      row.get(1)?,
      name:      row.get(2)?,
      rank:      row.get(3)?,
    })
  }

  pub fn into_person(self) -> Person {
    Person {
      id:   self.person_id,
      code: self.code,
      name: self.name,
      rank: self.rank,
    }
  }
}

/// Raw values read from a `shifts` row joined with its `persons` row.
pub struct RawShiftView {
  pub shift_id:   i64,
  pub person_id:  i64,
  pub duty_date:  String,
  pub start_time: String,
  pub end_time:   String,
  pub code:       String,
  pub name:       String,
  pub rank:       String,
}

impl RawShiftView {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      shift_id:   row.get(0)?,
      person_id:  row.get(1)?,
      duty_date:  row.get(2)?,
      start_time: row.get(3)?,
      end_time:   row.get(4)?,
      code:       row.get(5)?,
      name:       row.get(6)?,
      rank:       row.get(7)?,
    })
  }

  pub fn into_view(self) -> Result<ShiftView> {
    let shift = Shift {
      id:        self.shift_id,
      person_id: self.person_id,
      date:      decode_date(self.duty_date)?,
      start:     decode_time("start_time", self.start_time)?,
      end:       decode_time("end_time", self.end_time)?,
    };
    let person = Person {
      id:   self.person_id,
      code: self.code,
      name: self.name,
      rank: self.rank,
    };
    Ok(ShiftView { shift, person })
  }
}
