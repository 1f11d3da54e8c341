//! Core types and trait definitions for the Escala duty roster.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage backends implement
//! [`store::RosterStore`] and the [`roster::Roster`] orchestrator enforces the
//! assignment rules on top of any of them.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod person;
pub mod query;
pub mod roster;
pub mod shift;
pub mod store;

pub use error::{Error, Result, ValidationError};
pub use roster::Roster;
