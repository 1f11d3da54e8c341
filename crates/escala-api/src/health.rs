//! Liveness probes: `GET /health` and `GET /db/health`.

use std::sync::Arc;

use axum::{Json, extract::State};
use escala_core::{Roster, store::RosterStore};
use serde_json::{Value, json};

use crate::error::ApiError;

/// `GET /health`: process liveness only.
pub async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

/// `GET /db/health`: confirms storage answers by counting persons.
pub async fn db_health<S>(
  State(roster): State<Arc<Roster<S>>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore + 'static,
{
  let count = roster.person_count().await?;
  Ok(Json(json!({ "db": "ok", "person_count": count })))
}
