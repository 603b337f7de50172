//! Async HTTP client for the Campus Fest Hub gateway.
//!
//! One client serves every view: the catalog loader and the three submission
//! endpoints differ only in the URI they resolve to.

use std::{fmt, path::PathBuf, time::Duration};

use fest_core::{
  ack::{ALREADY_SUBSCRIBED, AckStatus, Acknowledgement},
  event::{Event, NewEvent},
  registration::NewRegistration,
  subscriber::{NewSubscription, Subscriber},
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Message shown for a registration that failed while demo mode is on.
pub const DEMO_REGISTRATION: &str =
  "Registration successful! We look forward to seeing you at the event. (Demo Mode)";

// ─── Endpoints ────────────────────────────────────────────────────────────────

/// A gateway endpoint accepting a JSON submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
  CreateEvent,
  Subscribe,
  Register,
}

impl Endpoint {
  fn path(self) -> &'static str {
    match self {
      Self::CreateEvent => "/create-event",
      Self::Subscribe => "/subscribe",
      Self::Register => "/register",
    }
  }
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.path().trim_start_matches('/'))
  }
}

/// Per-endpoint URI overrides. Unset entries derive from the base URL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Endpoints {
  /// Catalog source: an `http(s)://` URI or a local JSON file.
  pub events:       Option<String>,
  pub create_event: Option<String>,
  pub subscribe:    Option<String>,
  pub register:     Option<String>,
  pub subscribers:  Option<String>,
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for the gateway.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:  String,
  pub endpoints: Endpoints,
  /// Per-request timeout; `None` waits indefinitely.
  pub timeout:   Option<Duration>,
  /// Report failed registrations as simulated successes.
  pub demo_mode: bool,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url:  DEFAULT_BASE_URL.to_owned(),
      endpoints: Endpoints::default(),
      timeout:   None,
      demo_mode: false,
    }
  }
}

impl ApiConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), ..Self::default() }
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  fn resolve(&self, over: &Option<String>, path: &str) -> String {
    over.clone().unwrap_or_else(|| self.url(path))
  }
}

// ─── Catalog source ───────────────────────────────────────────────────────────

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
  Http(String),
  File(PathBuf),
}

impl CatalogSource {
  /// `http://` and `https://` URIs are fetched; anything else, including
  /// `file://` URIs, is read from disk.
  pub fn parse(raw: &str) -> Self {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
      Self::Http(raw.to_owned())
    } else {
      Self::File(PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw)))
    }
  }
}

impl fmt::Display for CatalogSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Http(url) => f.write_str(url),
      Self::File(path) => write!(f, "{}", path.display()),
    }
  }
}

/// Decode a catalog document.
pub fn decode_catalog(uri: &str, body: &str) -> Result<Vec<Event>> {
  serde_json::from_str(body).map_err(|source| Error::Parse {
    uri: uri.to_owned(),
    source,
  })
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the gateway.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    Ok(Self { client: builder.build()?, config })
  }

  pub fn config(&self) -> &ApiConfig { &self.config }

  /// The configured catalog source.
  pub fn catalog_source(&self) -> CatalogSource {
    CatalogSource::parse(&self.config.resolve(&self.config.endpoints.events, "/events"))
  }

  /// The URI a submission to `endpoint` is posted to.
  pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
    let e = &self.config.endpoints;
    let over = match endpoint {
      Endpoint::CreateEvent => &e.create_event,
      Endpoint::Subscribe => &e.subscribe,
      Endpoint::Register => &e.register,
    };
    self.config.resolve(over, endpoint.path())
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  /// Fetch and decode the catalog. The result is in document order; callers
  /// sort before display.
  pub async fn load_catalog(&self, source: &CatalogSource) -> Result<Vec<Event>> {
    let uri = source.to_string();
    let body = match source {
      CatalogSource::Http(url) => self.get_text(url).await?,
      CatalogSource::File(path) => tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::fetch(&uri, e))?,
    };
    decode_catalog(&uri, &body)
  }

  /// `GET /api/subscribers`
  pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
    let url = self
      .config
      .resolve(&self.config.endpoints.subscribers, "/subscribers");
    self.get_json(&url).await
  }

  async fn get_text(&self, url: &str) -> Result<String> {
    let resp = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| Error::fetch(url, e))?;

    if !resp.status().is_success() {
      return Err(Error::fetch(url, format!("HTTP {}", resp.status())));
    }
    resp.text().await.map_err(|e| Error::fetch(url, e))
  }

  async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
    let body = self.get_text(url).await?;
    serde_json::from_str(&body).map_err(|source| Error::Parse {
      uri: url.to_owned(),
      source,
    })
  }

  // ── Submissions ───────────────────────────────────────────────────────────

  /// POST `payload` as JSON to `endpoint` and interpret the answer.
  ///
  /// - 2xx: [`AckStatus::Created`]; the body must be JSON.
  /// - 409 on [`Endpoint::Subscribe`]: [`AckStatus::Conflict`].
  /// - anything else: [`Error::Submission`] carrying the server's `error`.
  ///
  /// Nothing is retried.
  pub async fn submit<P>(&self, endpoint: Endpoint, payload: &P) -> Result<Acknowledgement>
  where
    P: Serialize + ?Sized,
  {
    let url = self.endpoint_url(endpoint);
    let resp = self
      .client
      .post(&url)
      .json(payload)
      .send()
      .await
      .map_err(|e| Error::submission(endpoint, None, e))?;

    let status = resp.status();
    let text = resp
      .text()
      .await
      .map_err(|e| Error::submission(endpoint, Some(status.as_u16()), e))?;
    let body = serde_json::from_str::<Value>(&text);

    if status.is_success() {
      let body = body.map_err(|e| {
        Error::submission(endpoint, Some(status.as_u16()), format!("malformed response: {e}"))
      })?;
      tracing::debug!(%endpoint, %status, "submission accepted");
      return Ok(Acknowledgement::from_body(AckStatus::Created, body));
    }

    if status == StatusCode::CONFLICT && endpoint == Endpoint::Subscribe {
      let mut ack =
        Acknowledgement::from_body(AckStatus::Conflict, body.unwrap_or(Value::Null));
      if ack.message.is_none() {
        ack.message = Some(ALREADY_SUBSCRIBED.to_owned());
      }
      return Ok(ack);
    }

    let reason = body
      .ok()
      .and_then(|v| {
        v.get("error")
          .or_else(|| v.get("message"))
          .and_then(Value::as_str)
          .map(str::to_owned)
      })
      .unwrap_or_else(|| format!("HTTP {status}"));
    Err(Error::submission(endpoint, Some(status.as_u16()), reason))
  }

  /// `POST /create-event`
  pub async fn create_event(&self, event: &NewEvent) -> Result<Acknowledgement> {
    self.submit(Endpoint::CreateEvent, event).await
  }

  /// `POST /subscribe`
  pub async fn subscribe(&self, email: &str) -> Result<Acknowledgement> {
    let body = NewSubscription { email: email.trim().to_owned() };
    self.submit(Endpoint::Subscribe, &body).await
  }

  /// `POST /register`
  ///
  /// With `demo_mode` set, a failure is logged and reported as
  /// [`AckStatus::Simulated`] instead of an error.
  pub async fn register(&self, registration: &NewRegistration) -> Result<Acknowledgement> {
    match self.submit(Endpoint::Register, registration).await {
      Err(e) if self.config.demo_mode => {
        tracing::warn!(error = %e, "registration failed; demo mode reports success");
        Ok(Acknowledgement {
          status:  AckStatus::Simulated,
          message: Some(DEMO_REGISTRATION.to_owned()),
          body:    Value::Null,
        })
      }
      other => other,
    }
  }
}
