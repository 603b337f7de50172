//! Application state and the user-facing actions.
//!
//! Every action reports its outcome as a [`Notice`]; the underlying error, if
//! any, goes to the log.

use std::{path::PathBuf, sync::Arc};

use chrono::{Duration, Utc};
use fest_core::{
  ack::{ALREADY_SUBSCRIBED, AckStatus},
  catalog,
  event::{Event, NewEvent},
  registration::NewRegistration,
  subscriber::{self, Subscriber},
  validate,
};

use crate::{
  Error,
  catalog::{CatalogState, CatalogView},
  client::ApiClient,
  image,
  notice::Notice,
  session::{AdminSession, DEFAULT_TTL},
};

pub const EVENT_ADDED: &str = "Event added successfully!";
pub const EVENT_FAILED: &str = "Failed to add event. Please try again.";
pub const SUBSCRIBED: &str = "Successfully subscribed to our newsletter!";
pub const SUBSCRIBE_FAILED: &str = "Failed to subscribe. Please try again later.";
pub const REGISTERED: &str =
  "Registration successful! We look forward to seeing you at the event.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again later.";
pub const SIGNED_IN: &str = "Login successful! Redirecting to dashboard...";
pub const SIGNED_OUT: &str = "Logged out.";
pub const ADMIN_ONLY: &str = "Please log in as an administrator first.";
pub const EVENT_NOT_FOUND: &str = "Event not found.";

// ─── Image input ──────────────────────────────────────────────────────────────

/// Where a new event's image comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageInput {
  /// Fall back to the category's bundled image.
  #[default]
  None,
  Url(String),
  /// Inlined as a data URL before submission.
  File(PathBuf),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Shared HTTP client.
  pub client: Arc<ApiClient>,

  /// The displayed catalog.
  pub catalog: CatalogView,

  /// Present while an administrator is signed in.
  pub session: Option<AdminSession>,

  /// Lifetime given to new admin sessions.
  pub session_ttl: Duration,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      client:      Arc::new(client),
      catalog:     CatalogView::new(),
      session:     None,
      session_ttl: DEFAULT_TTL,
    }
  }

  pub fn is_admin(&self) -> bool {
    self
      .session
      .as_ref()
      .is_some_and(|s| s.is_active(Utc::now()))
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  /// Fetch the catalog and show the result.
  pub async fn reload(&self) -> Notice {
    let ticket = self.catalog.begin();
    let source = self.client.catalog_source();
    tracing::debug!(%source, "loading catalog");
    let result = self.client.load_catalog(&source).await;
    self.catalog.apply(ticket, result);

    match self.catalog.state() {
      CatalogState::Ready(events) => Notice::info(format!("{} upcoming events", events.len())),
      CatalogState::Empty => Notice::info(crate::catalog::EMPTY_MESSAGE),
      CatalogState::Failed(message) => Notice::error(message),
    }
  }

  /// Reload and look up one event.
  pub async fn event(&self, id: &str) -> Result<Event, Notice> {
    let notice = self.reload().await;
    if notice.is_error() {
      return Err(notice);
    }
    catalog::find(&self.catalog.events(), id)
      .cloned()
      .ok_or_else(|| Notice::error(EVENT_NOT_FOUND))
  }

  // ── Visitor actions ───────────────────────────────────────────────────────

  pub async fn subscribe(&self, email: &str) -> Notice {
    if let Err(e) = validate::email(email) {
      return Notice::error(e.to_string());
    }
    match self.client.subscribe(email).await {
      Ok(ack) if ack.status == AckStatus::Conflict => {
        Notice::info(ack.message_or(ALREADY_SUBSCRIBED))
      }
      Ok(ack) => Notice::success(ack.message_or(SUBSCRIBED)),
      Err(e) => failure(&e, SUBSCRIBE_FAILED),
    }
  }

  /// Register for `event_id`. The event name is taken from the displayed
  /// catalog when the event is there.
  pub async fn register(&self, event_id: &str, name: &str, email: &str) -> Notice {
    let registration = NewRegistration {
      name:       name.trim().to_owned(),
      email:      email.trim().to_owned(),
      event_name: catalog::find(&self.catalog.events(), event_id).map(|e| e.name.clone()),
      event_id:   Some(event_id.to_owned()),
    };
    if let Err(e) = validate::registration(&registration) {
      return Notice::error(e.to_string());
    }
    match self.client.register(&registration).await {
      Ok(ack) if ack.status == AckStatus::Simulated => {
        Notice::success(ack.message_or(crate::client::DEMO_REGISTRATION))
      }
      Ok(_) => Notice::success(REGISTERED),
      Err(e) => failure(&e, REGISTER_FAILED),
    }
  }

  // ── Admin actions ─────────────────────────────────────────────────────────

  pub fn sign_in(&mut self, email: &str, password: &str) -> Notice {
    match AdminSession::sign_in(email, password, self.session_ttl) {
      Ok(session) => {
        tracing::info!(email = %session.email, expires_at = %session.expires_at, "admin signed in");
        self.session = Some(session);
        Notice::success(SIGNED_IN)
      }
      Err(e) => Notice::error(e.to_string()),
    }
  }

  pub fn sign_out(&mut self) -> Notice {
    self.session = None;
    Notice::info(SIGNED_OUT)
  }

  /// Submit a new event. On success the catalog is reloaded exactly once.
  pub async fn create_event(&self, mut event: NewEvent, source: ImageInput) -> Notice {
    if !self.is_admin() {
      return Notice::error(ADMIN_ONLY);
    }
    event.image = match source {
      ImageInput::None => String::new(),
      ImageInput::Url(url) => url,
      ImageInput::File(path) => match image::data_url_from_file(&path).await {
        Ok(url) => url,
        Err(e) => {
          tracing::error!(error = %e, "image could not be read");
          return Notice::error(e.to_string());
        }
      },
    };

    match self.client.create_event(&event).await {
      Ok(ack) => {
        if let Some(id) = ack.field("eventId") {
          tracing::info!(event_id = id, "event created");
        }
        let text = ack.message_or(EVENT_ADDED).to_owned();
        let reloaded = self.reload().await;
        if reloaded.is_error() {
          tracing::warn!(reason = %reloaded, "catalog reload after create failed");
        }
        Notice::success(text)
      }
      Err(e) => failure(&e, EVENT_FAILED),
    }
  }

  /// Newest subscription first.
  pub async fn subscribers(&self) -> Result<Vec<Subscriber>, Notice> {
    if !self.is_admin() {
      return Err(Notice::error(ADMIN_ONLY));
    }
    let mut subscribers = self.client.list_subscribers().await.map_err(|e| {
      tracing::error!(error = %e, "listing subscribers failed");
      Notice::error("Failed to load subscribers. Please try again later.")
    })?;
    subscriber::newest_first(&mut subscribers);
    Ok(subscribers)
  }
}

/// Turn a submission error into a notice. Client errors (400, 409) carry the
/// gateway's own reason; anything else shows `fallback`.
fn failure(e: &Error, fallback: &str) -> Notice {
  tracing::error!(error = %e, "submission failed");
  match e {
    Error::Submission { status: Some(400 | 409), reason, .. } => Notice::error(reason.clone()),
    _ => Notice::error(fallback),
  }
}
