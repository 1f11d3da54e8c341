//! The `RosterStore` trait: the repository contract behind the roster.
//!
//! The trait is implemented by storage backends (e.g. `escala-store-sqlite`).
//! Higher layers depend on this abstraction through [`crate::Roster`], not on
//! any concrete backend.

use std::future::Future;

use crate::{
  person::{NewPerson, Person},
  shift::{DutyDate, NewShift, Shift, ShiftView},
};

/// Outcome of an insert-if-absent write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted<T> {
  /// The row was written; carries the persisted value.
  Inserted(T),
  /// A row with the same unique key already exists. Nothing was written.
  Duplicate,
}

/// Abstraction over a roster persistence backend.
///
/// The `*_if_absent` methods must check their unique key and insert as one
/// atomic step: of any number of concurrent calls with the same key, exactly
/// one returns [`Inserted::Inserted`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Insert a person unless one with the same registration code exists.
  fn insert_person_if_absent(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Inserted<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All persons, ordered by id ascending.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn count_persons(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Shifts ────────────────────────────────────────────────────────────

  /// Insert a shift unless the person already has one on the same date.
  ///
  /// The referenced person must exist; callers check this first.
  fn insert_shift_if_absent(
    &self,
    shift: NewShift,
  ) -> impl Future<Output = Result<Inserted<Shift>, Self::Error>> + Send + '_;

  /// Shifts on exactly `date`, ordered by start time then id.
  fn shifts_on<'a>(
    &'a self,
    date: &'a DutyDate,
  ) -> impl Future<Output = Result<Vec<ShiftView>, Self::Error>> + Send + 'a;

  /// A window of all shifts ordered by `(date, start, id)`.
  fn shifts_page(
    &self,
    offset: u64,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<ShiftView>, Self::Error>> + Send + '_;

  fn count_shifts(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
