//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Response bodies have the shape
//! `{"error": "<KIND>", "message": "...", "details": {...}}`, where `details`
//! is only present for validation failures.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use escala_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Stable machine-readable kind.
  pub fn kind(&self) -> &'static str {
    match self {
      ApiError::Validation(_) => "VALIDATION_ERROR",
      ApiError::NotFound(_) => "NOT_FOUND",
      ApiError::Conflict(_) => "CONFLICT",
      ApiError::Store(_) => "STORAGE_ERROR",
    }
  }
}

impl From<escala_core::Error> for ApiError {
  fn from(e: escala_core::Error) -> Self {
    match e {
      escala_core::Error::Validation(v) => ApiError::Validation(v),
      escala_core::Error::NotFound(m) => ApiError::NotFound(m),
      escala_core::Error::Conflict(m) => ApiError::Conflict(m),
      escala_core::Error::Storage(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self {
    ApiError::Validation(ValidationError::new(format!(
      "invalid JSON body: {}",
      r.body_text()
    )))
  }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self {
    ApiError::Validation(ValidationError::new(format!(
      "invalid query string: {}",
      r.body_text()
    )))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let kind = self.kind();
    let body = match &self {
      ApiError::Validation(v) => json!({
        "error": kind,
        "message": v.message,
        "details": { "fields": v.fields },
      }),
      ApiError::NotFound(m) | ApiError::Conflict(m) => {
        json!({ "error": kind, "message": m })
      }
      ApiError::Store(e) => {
        // Internal detail stays in the log.
        tracing::error!(error = %e, "storage failure");
        json!({ "error": kind, "message": "internal storage error" })
      }
    };
    (status, Json(body)).into_response()
  }
}
