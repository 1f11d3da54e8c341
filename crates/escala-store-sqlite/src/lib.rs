//! SQLite backend for the Escala duty roster.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Uniqueness of registration codes and of
//! `(person, date)` shift pairs is enforced by the schema itself.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
