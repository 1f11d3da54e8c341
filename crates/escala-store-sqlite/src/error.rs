//! Error type for `escala-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored value no longer satisfies the domain's shape rules.
  #[error("corrupt {column} value {value:?}: {source}")]
  Corrupt {
    column: &'static str,
    value:  String,
    #[source]
    source: escala_core::ValidationError,
  },

  #[error("negative count returned for {0}")]
  NegativeCount(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
