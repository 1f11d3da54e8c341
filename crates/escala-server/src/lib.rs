//! Process wiring for the Escala roster server: configuration loading and the
//! top-level router with request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use escala_core::{Roster, store::RosterStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, then an optional TOML file, then
/// `ESCALA_*` environment variables (e.g. `ESCALA_PORT=8080`).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub const DEFAULT_HOST: &'static str = "127.0.0.1";
  pub const DEFAULT_PORT: u16 = 3001;
  pub const DEFAULT_STORE_PATH: &'static str = "escala.db";

  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", Self::DEFAULT_HOST)?
      .set_default("port", i64::from(Self::DEFAULT_PORT))?
      .set_default("store_path", Self::DEFAULT_STORE_PATH)?
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("ESCALA"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in an HTTP trace layer.
pub fn app<S>(roster: Arc<Roster<S>>) -> Router
where
  S: RosterStore + 'static,
{
  escala_api::api_router(roster).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use escala_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg =
      ServerConfig::load(Path::new("/nonexistent/escala-config.toml")).unwrap();
    assert_eq!(cfg.host, ServerConfig::DEFAULT_HOST);
    assert_eq!(cfg.store_path, PathBuf::from(ServerConfig::DEFAULT_STORE_PATH));
  }

  #[test]
  fn file_values_override_defaults() {
    let dir = std::env::temp_dir()
      .join(format!("escala-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("config.toml");
    std::fs::write(&file, "host = \"0.0.0.0\"\nstore_path = \"/var/lib/escala.db\"\n")
      .unwrap();

    let cfg = ServerConfig::load(&file).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/escala.db"));

    std::fs::remove_dir_all(&dir).ok();
  }

  #[test]
  fn tilde_is_expanded_only_at_the_front() {
    let plain = Path::new("data/escala.db");
    assert_eq!(expand_tilde(plain), plain);

    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/escala.db")),
        PathBuf::from(home).join("escala.db")
      );
    }
  }

  #[tokio::test]
  async fn traced_app_serves_health() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = app(Arc::new(Roster::new(store)));

    let req = Request::builder()
      .uri("/db/health")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["person_count"], 0);
  }
}
