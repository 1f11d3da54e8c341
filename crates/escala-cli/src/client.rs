//! Async HTTP client wrapping the Escala JSON API.

use anyhow::{Context, Result, anyhow};
use escala_core::{
  person::Person,
  query::{Page, ShiftListing},
  shift::{Shift, ShiftView},
};
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::time::Duration;

/// Connection settings for the Escala API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Error body returned by the server on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  error:   String,
  message: String,
  #[serde(default)]
  details: Option<Value>,
}

/// Async HTTP client for the Escala JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Decode a success body, or turn the server's error body into a message.
  async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
      return resp
        .json()
        .await
        .with_context(|| format!("deserialising {what} response"));
    }

    let text = resp.text().await.unwrap_or_default();
    tracing::debug!(%status, body = %text, "{what} failed");
    match serde_json::from_str::<ErrorBody>(&text) {
      Ok(body) => {
        let mut msg = format!("{what} → {status} {}: {}", body.error, body.message);
        if let Some(fields) = body.details.as_ref().and_then(|d| d.get("fields")) {
          msg.push_str(&format!(" {fields}"));
        }
        Err(anyhow!(msg))
      }
      Err(_) => Err(anyhow!("{what} → {status}")),
    }
  }

  // ── Probes ────────────────────────────────────────────────────────────────

  /// `GET /health` then `GET /db/health`.
  pub async fn health(&self) -> Result<(Value, Value)> {
    let live = self
      .client
      .get(self.url("/health"))
      .send()
      .await
      .context("GET /health failed")?;
    let live = Self::decode(live, "GET /health").await?;

    let db = self
      .client
      .get(self.url("/db/health"))
      .send()
      .await
      .context("GET /db/health failed")?;
    let db = Self::decode(db, "GET /db/health").await?;
    Ok((live, db))
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  /// `POST /persons`
  pub async fn register_person(
    &self,
    code: &str,
    name: &str,
    rank: &str,
  ) -> Result<Person> {
    let resp = self
      .client
      .post(self.url("/persons"))
      .json(&json!({ "code": code, "name": name, "rank": rank }))
      .send()
      .await
      .context("POST /persons failed")?;
    Self::decode(resp, "POST /persons").await
  }

  /// `GET /persons`
  pub async fn list_persons(&self) -> Result<Vec<Person>> {
    let resp = self
      .client
      .get(self.url("/persons"))
      .send()
      .await
      .context("GET /persons failed")?;
    Self::decode(resp, "GET /persons").await
  }

  /// `GET /persons/:id`
  pub async fn get_person(&self, id: i64) -> Result<Person> {
    let resp = self
      .client
      .get(self.url(&format!("/persons/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /persons/{id} failed"))?;
    Self::decode(resp, "GET /persons/:id").await
  }

  // ── Shifts ────────────────────────────────────────────────────────────────

  /// `POST /shifts`
  pub async fn assign_shift(
    &self,
    person_id: i64,
    date: &str,
    start: &str,
    end: &str,
  ) -> Result<Shift> {
    let resp = self
      .client
      .post(self.url("/shifts"))
      .json(&json!({
        "person_id": person_id,
        "date": date,
        "start": start,
        "end": end,
      }))
      .send()
      .await
      .context("POST /shifts failed")?;
    Self::decode(resp, "POST /shifts").await
  }

  /// `GET /shifts?date=<date>`
  ///
  /// The server answers a malformed date with the paged listing, so either
  /// shape may come back.
  pub async fn shifts_on(&self, date: &str) -> Result<ShiftListing> {
    let resp = self
      .client
      .get(self.url("/shifts"))
      .query(&[("date", date)])
      .send()
      .await
      .context("GET /shifts?date failed")?;
    Self::decode(resp, "GET /shifts?date").await
  }

  /// `GET /shifts?page=<page>&limit=<limit>`
  pub async fn shifts_page(&self, page: u64, limit: u32) -> Result<Page<ShiftView>> {
    let resp = self
      .client
      .get(self.url("/shifts"))
      .query(&[("page", page), ("limit", u64::from(limit))])
      .send()
      .await
      .context("GET /shifts failed")?;
    Self::decode(resp, "GET /shifts").await
  }
}
