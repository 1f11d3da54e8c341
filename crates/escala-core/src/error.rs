//! Error types for `escala-core`.
//!
//! [`Error`] is the external taxonomy every roster operation reports through.
//! Validation failures carry a field-level breakdown in [`ValidationError`].

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error as [`Error::Storage`].
  pub fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── ValidationError ─────────────────────────────────────────────────────────

/// Malformed or missing input, detected before storage is touched.
///
/// `fields` maps an input field name to every problem found with it. A
/// failure that is not tied to a single field leaves `fields` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
  pub message: String,
  pub fields:  BTreeMap<String, Vec<String>>,
}

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), fields: BTreeMap::new() }
  }

  /// A single-field failure whose message doubles as the field detail.
  pub fn field(field: &str, problem: impl Into<String>) -> Self {
    let mut err = Self::new("invalid input");
    err.push(field, problem);
    err
  }

  pub fn push(&mut self, field: &str, problem: impl Into<String>) {
    self
      .fields
      .entry(field.to_owned())
      .or_default()
      .push(problem.into());
  }

  pub fn is_empty(&self) -> bool { self.fields.is_empty() }

  /// Fold another error's field problems into this one.
  pub fn merge(&mut self, other: ValidationError) {
    for (field, problems) in other.fields {
      self.fields.entry(field).or_default().extend(problems);
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)?;
    let mut sep = ": ";
    for (field, problems) in &self.fields {
      for problem in problems {
        write!(f, "{sep}{field}: {problem}")?;
        sep = "; ";
      }
    }
    Ok(())
  }
}

impl std::error::Error for ValidationError {}
