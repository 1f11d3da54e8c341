//! [`SqliteStore`] is the SQLite implementation of [`RosterStore`].

use std::path::Path;

use escala_core::{
  person::{NewPerson, Person},
  shift::{DutyDate, NewShift, Shift, ShiftView},
  store::{Inserted, RosterStore},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{RawPerson, RawShiftView, SHIFT_VIEW_COLUMNS, decode_count},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every call
/// runs on the connection's own thread, one at a time.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteStore").finish_non_exhaustive()
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn count(&self, table: &'static str) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    decode_count(table, n)
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn insert_person_if_absent(
    &self,
    person: NewPerson,
  ) -> Result<Inserted<Person>> {
    let code = person.code().to_owned();
    let name = person.name().to_owned();
    let rank = person.rank().to_owned();

    // The UNIQUE(code) check and the insert happen in one statement.
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT INTO persons (code, name, rank) VALUES (?1, ?2, ?3)
           ON CONFLICT (code) DO NOTHING",
          rusqlite::params![code, name, rank],
        )?;
        Ok((changed == 1).then(|| conn.last_insert_rowid()))
      })
      .await?;

    Ok(match id {
      Some(id) => Inserted::Inserted(person.into_person(id)),
      None => Inserted::Duplicate,
    })
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT person_id, code, name, rank FROM persons WHERE person_id = ?1",
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawPerson::into_person))
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT person_id, code, name, rank FROM persons ORDER BY person_id",
        )?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawPerson::into_person).collect())
  }

  async fn count_persons(&self) -> Result<u64> { self.count("persons").await }

  // ── Shifts ────────────────────────────────────────────────────────────────

  async fn insert_shift_if_absent(
    &self,
    shift: NewShift,
  ) -> Result<Inserted<Shift>> {
    let person_id = shift.person_id();
    let date_str = shift.date().to_string();
    let start_str = shift.start().to_string();
    let end_str = shift.end().to_string();

    // UNIQUE(person_id, duty_date) decides the race between concurrent
    // assignments; the loser sees zero changed rows.
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT INTO shifts (person_id, duty_date, start_time, end_time)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (person_id, duty_date) DO NOTHING",
          rusqlite::params![person_id, date_str, start_str, end_str],
        )?;
        Ok((changed == 1).then(|| conn.last_insert_rowid()))
      })
      .await?;

    Ok(match id {
      Some(id) => Inserted::Inserted(shift.into_shift(id)),
      None => Inserted::Duplicate,
    })
  }

  async fn shifts_on(&self, date: &DutyDate) -> Result<Vec<ShiftView>> {
    let date_str = date.to_string();

    let raws: Vec<RawShiftView> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SHIFT_VIEW_COLUMNS}
           FROM shifts s
           JOIN persons p ON p.person_id = s.person_id
           WHERE s.duty_date = ?1
           ORDER BY s.start_time, s.shift_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], RawShiftView::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShiftView::into_view).collect()
  }

  async fn shifts_page(
    &self,
    offset: u64,
    limit: u32,
  ) -> Result<Vec<ShiftView>> {
    let offset_val = i64::try_from(offset).unwrap_or(i64::MAX);
    let limit_val = i64::from(limit);

    let raws: Vec<RawShiftView> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SHIFT_VIEW_COLUMNS}
           FROM shifts s
           JOIN persons p ON p.person_id = s.person_id
           ORDER BY s.duty_date, s.start_time, s.shift_id
           LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![limit_val, offset_val],
            RawShiftView::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShiftView::into_view).collect()
  }

  async fn count_shifts(&self) -> Result<u64> { self.count("shifts").await }
}
