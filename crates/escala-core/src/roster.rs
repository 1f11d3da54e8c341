//! [`Roster`] enforces the assignment rules on top of a [`RosterStore`].
//!
//! Inputs arrive already shaped ([`NewPerson`], [`NewShift`], [`ShiftQuery`]),
//! so the remaining checks are the ones that need the store: the referenced
//! person must exist and the per-key uniqueness rules must hold. Backend
//! failures are boxed into [`Error::Storage`].

use tracing::{debug, info};

use crate::{
  Error, Result,
  person::{NewPerson, Person},
  query::{Page, PageRequest, ShiftListing, ShiftQuery},
  shift::{DutyDate, NewShift, Shift, ShiftView},
  store::{Inserted, RosterStore},
};

/// The roster service, generic over its storage backend.
#[derive(Debug, Clone)]
pub struct Roster<S> {
  store: S,
}

impl<S: RosterStore> Roster<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  // ── Personnel ─────────────────────────────────────────────────────────────

  /// Register a person. Fails with [`Error::Conflict`] when the registration
  /// code is taken.
  pub async fn register(&self, person: NewPerson) -> Result<Person> {
    let code = person.code().to_owned();
    match self
      .store
      .insert_person_if_absent(person)
      .await
      .map_err(Error::storage)?
    {
      Inserted::Inserted(p) => {
        info!(id = p.id, code = %p.code, "registered person");
        Ok(p)
      }
      Inserted::Duplicate => {
        debug!(%code, "registration code already taken");
        Err(Error::Conflict(format!("registration code already exists: {code}")))
      }
    }
  }

  pub async fn person(&self, id: i64) -> Result<Person> {
    self
      .store
      .get_person(id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| Error::NotFound(format!("person {id} not found")))
  }

  /// All persons, ordered by id.
  pub async fn persons(&self) -> Result<Vec<Person>> {
    self.store.list_persons().await.map_err(Error::storage)
  }

  pub async fn person_count(&self) -> Result<u64> {
    self.store.count_persons().await.map_err(Error::storage)
  }

  // ── Assignment ────────────────────────────────────────────────────────────

  /// Assign a shift.
  ///
  /// Fails with [`Error::NotFound`] for an unknown person and with
  /// [`Error::Conflict`] when the person already holds a shift that day,
  /// whatever its times.
  pub async fn assign(&self, shift: NewShift) -> Result<Shift> {
    let person = self.person(shift.person_id()).await?;
    let date = shift.date().clone();

    match self
      .store
      .insert_shift_if_absent(shift)
      .await
      .map_err(Error::storage)?
    {
      Inserted::Inserted(s) => {
        info!(
          id = s.id,
          person_id = s.person_id,
          date = %s.date,
          start = %s.start,
          end = %s.end,
          "assigned shift"
        );
        Ok(s)
      }
      Inserted::Duplicate => {
        debug!(person_id = person.id, %date, "duplicate shift rejected");
        Err(Error::Conflict(format!(
          "person {} ({}) already has a shift on {date}",
          person.id, person.code
        )))
      }
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Every shift on `date` with its person, ordered by start time. Empty when
  /// there are none.
  pub async fn shifts_on(&self, date: &DutyDate) -> Result<Vec<ShiftView>> {
    self.store.shifts_on(date).await.map_err(Error::storage)
  }

  /// One page of all shifts ordered by `(date, start)`. A page past the end
  /// has no items but still reports the totals.
  pub async fn shifts_page(&self, req: PageRequest) -> Result<Page<ShiftView>> {
    let total = self.store.count_shifts().await.map_err(Error::storage)?;
    let items = self
      .store
      .shifts_page(req.offset(), req.limit())
      .await
      .map_err(Error::storage)?;

    Ok(Page {
      page: req.page(),
      limit: req.limit(),
      total,
      total_pages: req.total_pages(total),
      items,
    })
  }

  /// Resolve a classified listing request.
  pub async fn list(&self, query: ShiftQuery) -> Result<ShiftListing> {
    match query {
      ShiftQuery::Day(date) => self.shifts_on(&date).await.map(ShiftListing::Day),
      ShiftQuery::Paged(req) => {
        self.shifts_page(req).await.map(ShiftListing::Paged)
      }
    }
  }
}
