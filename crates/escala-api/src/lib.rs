//! JSON REST API for the Escala duty roster.
//!
//! Exposes an axum [`Router`] backed by a [`Roster`] over any
//! [`RosterStore`]. Handlers normalise raw request values (trimming, numeric
//! coercion) into typed inputs and map failures onto HTTP statuses; all
//! roster rules live in `escala-core`. Transport concerns such as tracing
//! layers and binding are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = escala_api::api_router(Arc::new(Roster::new(store)));
//! ```

pub mod error;
pub mod health;
pub mod persons;
pub mod shifts;

use std::sync::Arc;

use axum::{Router, routing::get};
use escala_core::{Roster, store::RosterStore};

pub use error::ApiError;

/// Build the API router for `roster`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(roster: Arc<Roster<S>>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Probes
    .route("/health", get(health::health))
    .route("/db/health", get(health::db_health::<S>))
    // Persons
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route("/persons/{id}", get(persons::get_one::<S>))
    // Shifts
    .route("/shifts", get(shifts::list::<S>).post(shifts::create::<S>))
    .with_state(roster)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
