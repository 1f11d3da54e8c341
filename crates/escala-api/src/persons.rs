//! Handlers for `/persons` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/persons` | Ordered by id |
//! | `POST` | `/persons` | Body: [`RegisterBody`]; returns 201 + stored person |
//! | `GET`  | `/persons/:id` | 400 if `id` is not a positive integer, 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use escala_core::{
  Roster, ValidationError,
  person::{NewPerson, Person},
  store::RosterStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons`
pub async fn list<S>(
  State(roster): State<Arc<Roster<S>>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: RosterStore + 'static,
{
  Ok(Json(roster.persons().await?))
}

// ─── Register ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /persons`. Absent fields are reported as
/// validation failures alongside blank ones.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  #[serde(alias = "matricula")]
  pub code: Option<String>,
  #[serde(alias = "nome")]
  pub name: Option<String>,
  #[serde(alias = "posto_grad")]
  pub rank: Option<String>,
}

/// `POST /persons`: returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(roster): State<Arc<Roster<S>>>,
  body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore + 'static,
{
  let Json(body) = body?;
  let input = NewPerson::new(
    body.code.as_deref().unwrap_or_default(),
    body.name.as_deref().unwrap_or_default(),
    body.rank.as_deref().unwrap_or_default(),
  )?;
  let person = roster.register(input).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S>(
  State(roster): State<Arc<Roster<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Person>, ApiError>
where
  S: RosterStore + 'static,
{
  let id = parse_id(&id)?;
  Ok(Json(roster.person(id).await?))
}

/// Coerce a path segment into a positive integer id.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ValidationError> {
  raw
    .trim()
    .parse::<i64>()
    .ok()
    .filter(|id| *id > 0)
    .ok_or_else(|| ValidationError::field("id", "id must be a positive integer"))
}
