//! HTTP front for the Campus Fest Hub gateway.
//!
//! Nests the [`fest_api`] router under `/api`, serves the catalog as a static
//! style `/events.json` document, and applies CORS and request tracing.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, Method, header},
  routing::get,
};
use fest_api::{ApiState, Notifier};
use fest_core::store::EventStore;
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `FEST_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Value of `Access-Control-Allow-Origin`; `*` allows any origin.
  #[serde(default = "default_origin")]
  pub allowed_origin:     String,
  /// Announce new events to subscribers through the log notifier.
  #[serde(default = "default_notify")]
  pub notify_subscribers: bool,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("fest.db") }
fn default_origin() -> String { "*".to_owned() }
fn default_notify() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               default_host(),
      port:               default_port(),
      store_path:         default_store_path(),
      allowed_origin:     default_origin(),
      notify_subscribers: default_notify(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Parse `allowed_origin` into a CORS origin rule.
  pub fn allow_origin(&self) -> Result<AllowOrigin, header::InvalidHeaderValue> {
    match self.allowed_origin.trim() {
      "*" => Ok(AllowOrigin::from(Any)),
      origin => Ok(AllowOrigin::exact(HeaderValue::from_str(origin)?)),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the server needs to build its router.
pub struct AppState<S> {
  pub store:    Arc<S>,
  pub config:   Arc<ServerConfig>,
  pub notifier: Option<Arc<dyn Notifier>>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// Fails only when `allowed_origin` is not a valid header value.
pub fn router<S>(state: AppState<S>) -> Result<Router, header::InvalidHeaderValue>
where
  S: EventStore + 'static,
{
  let AppState { store, config, notifier } = state;

  let cors = CorsLayer::new()
    .allow_origin(config.allow_origin()?)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE]);

  let catalog = Router::new()
    .route("/events.json", get(fest_api::events::list::<S>))
    .with_state(ApiState {
      store:    Arc::clone(&store),
      notifier: notifier.clone(),
    });

  Ok(
    Router::new()
      .nest("/api", fest_api::api_router(store, notifier))
      .merge(catalog)
      .layer(cors)
      .layer(TraceLayer::new_for_http()),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use fest_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_app(origin: &str) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let config = ServerConfig {
      allowed_origin: origin.to_owned(),
      ..ServerConfig::default()
    };
    router(AppState {
      store:    Arc::new(store),
      config:   Arc::new(config),
      notifier: None,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn events_json_mirrors_api_catalog() {
    let app = make_app("*").await;

    let create = Request::builder()
      .method("POST")
      .uri("/api/create-event")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(
        json!({
          "id": "e1",
          "name": "Open Mic",
          "date": "2025-04-04",
          "time": "8 PM",
          "venue": "Cafe",
          "description": "Bring a song."
        })
        .to_string(),
      ))
      .unwrap();
    let resp = app.clone().oneshot(create).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let get = Request::builder().uri("/events.json").body(Body::empty()).unwrap();
    let resp = app.oneshot(get).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let events: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(events[0]["id"], "e1");
  }

  #[tokio::test]
  async fn preflight_allows_json_posts() {
    let app = make_app("https://fest.example.edu").await;
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/api/subscribe")
      .header(header::ORIGIN, "https://fest.example.edu")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(
      resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
      "https://fest.example.edu"
    );
  }

  #[test]
  fn wildcard_and_exact_origins_parse() {
    assert!(ServerConfig::default().allow_origin().is_ok());
    let bad = ServerConfig {
      allowed_origin: "bad\norigin".to_owned(),
      ..ServerConfig::default()
    };
    assert!(bad.allow_origin().is_err());
  }
}
