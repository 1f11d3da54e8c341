//! A person is an individual registered as eligible for duty.
//!
//! Persons are identified by a store-assigned numeric id and, for humans, by a
//! registration code that is unique for the lifetime of the roster. Persons are
//! never mutated or deleted once registered.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A registered person, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  /// Store-assigned; monotonically increasing and never reused.
  pub id:   i64,
  /// Registration code (matrícula). Unique across all persons.
  pub code: String,
  pub name: String,
  /// Rank or role label (posto/graduação).
  pub rank: String,
}

/// Input to [`crate::store::RosterStore::insert_person_if_absent`].
///
/// Only constructible through [`NewPerson::new`], so every value is trimmed
/// and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  code: String,
  name: String,
  rank: String,
}

impl NewPerson {
  /// Trim every field and reject any that end up empty. All empty fields are
  /// reported together.
  pub fn new(
    code: &str,
    name: &str,
    rank: &str,
  ) -> Result<Self, ValidationError> {
    let mut err = ValidationError::new("invalid person");
    let code = required(&mut err, "code", code);
    let name = required(&mut err, "name", name);
    let rank = required(&mut err, "rank", rank);

    if !err.is_empty() {
      return Err(err);
    }
    Ok(Self { code, name, rank })
  }

  pub fn code(&self) -> &str { &self.code }

  pub fn name(&self) -> &str { &self.name }

  pub fn rank(&self) -> &str { &self.rank }

  /// Attach the store-assigned id.
  pub fn into_person(self, id: i64) -> Person {
    Person { id, code: self.code, name: self.name, rank: self.rank }
  }
}

fn required(err: &mut ValidationError, field: &str, value: &str) -> String {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    err.push(field, format!("{field} is required"));
  }
  trimmed.to_owned()
}
