//! Handlers for `/shifts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/shifts` | Body: [`AssignBody`]; returns 201 + stored shift |
//! | `GET`  | `/shifts` | `?date=YYYY-MM-DD` for a day view, else `?page=&limit=` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use escala_core::{
  Roster, ValidationError,
  query::{ShiftListing, ShiftQuery},
  shift::NewShift,
  store::RosterStore,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

// ─── Assign ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /shifts`.
///
/// `person_id` may be a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct AssignBody {
  #[serde(alias = "militar_id")]
  pub person_id: Option<Value>,
  #[serde(alias = "data")]
  pub date:      Option<String>,
  #[serde(alias = "horario_inicio")]
  pub start:     Option<String>,
  #[serde(alias = "horario_fim")]
  pub end:       Option<String>,
}

impl AssignBody {
  /// Normalise into a typed [`NewShift`]. Every field-level problem is
  /// reported at once when `person_id` is also bad.
  pub fn into_new_shift(self) -> Result<NewShift, ValidationError> {
    let date = self.date.as_deref().unwrap_or_default().trim();
    let start = self.start.as_deref().unwrap_or_default().trim();
    let end = self.end.as_deref().unwrap_or_default().trim();

    match coerce_person_id(self.person_id.as_ref()) {
      Ok(id) => NewShift::new(id, date, start, end),
      Err(mut err) => {
        if let Err(rest) = NewShift::new(0, date, start, end) {
          err.merge(rest);
        }
        Err(err)
      }
    }
  }
}

fn coerce_person_id(raw: Option<&Value>) -> Result<i64, ValidationError> {
  let id = match raw {
    None | Some(Value::Null) => {
      return Err(ValidationError::field("person_id", "person_id is required"));
    }
    Some(Value::Number(n)) => n.as_i64(),
    Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
    Some(_) => None,
  };
  id.filter(|id| *id > 0).ok_or_else(|| {
    ValidationError::field("person_id", "person_id must be a positive integer")
  })
}

/// `POST /shifts`: returns 201 + the stored [`Shift`](escala_core::shift::Shift).
pub async fn create<S>(
  State(roster): State<Arc<Roster<S>>>,
  body: Result<Json<AssignBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore + 'static,
{
  let Json(body) = body?;
  let shift = roster.assign(body.into_new_shift()?).await?;
  Ok((StatusCode::CREATED, Json(shift)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query parameters; numeric coercion happens in [`ShiftQuery`].
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  #[serde(alias = "data")]
  pub date:  Option<String>,
  pub page:  Option<String>,
  pub limit: Option<String>,
}

/// `GET /shifts[?date=...]` or `GET /shifts[?page=...][&limit=...]`
pub async fn list<S>(
  State(roster): State<Arc<Roster<S>>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ShiftListing>, ApiError>
where
  S: RosterStore + 'static,
{
  let Query(params) = params?;
  let query = ShiftQuery::from_params(
    params.date.as_deref(),
    params.page.as_deref(),
    params.limit.as_deref(),
  )?;
  Ok(Json(roster.list(query).await?))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn body(v: Value) -> AssignBody { serde_json::from_value(v).unwrap() }

  #[test]
  fn numeric_string_person_id_is_coerced() {
    let s = body(json!({
      "person_id": " 4 ", "date": "2024-05-01", "start": "08:00", "end": "12:00"
    }))
    .into_new_shift()
    .unwrap();
    assert_eq!(s.person_id(), 4);
  }

  #[test]
  fn portuguese_field_names_are_accepted() {
    let s = body(json!({
      "militar_id": 2,
      "data": "2024-05-01",
      "horario_inicio": "08:00",
      "horario_fim": "12:00"
    }))
    .into_new_shift()
    .unwrap();
    assert_eq!(s.person_id(), 2);
    assert_eq!(s.date().as_str(), "2024-05-01");
  }

  #[test]
  fn bad_person_id_and_bad_date_are_reported_together() {
    let err = body(json!({ "person_id": 1.5, "date": "tomorrow" }))
      .into_new_shift()
      .unwrap_err();
    assert!(err.fields.contains_key("person_id"));
    assert!(err.fields.contains_key("date"));
  }

  #[test]
  fn missing_person_id_is_required() {
    let err = body(json!({
      "date": "2024-05-01", "start": "08:00", "end": "12:00"
    }))
    .into_new_shift()
    .unwrap_err();
    assert_eq!(err.fields["person_id"], ["person_id is required"]);
  }
}
