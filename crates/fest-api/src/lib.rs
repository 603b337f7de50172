//! JSON gateway endpoints for Campus Fest Hub.
//!
//! Exposes an axum [`Router`] backed by any [`fest_core::store::EventStore`].
//! CORS, TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fest_api::api_router(store.clone(), Some(notifier)))
//! ```

pub mod error;
pub mod events;
pub mod notify;
pub mod registrations;
pub mod subscribers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use fest_core::store::EventStore;

pub use error::ApiError;
pub use notify::{LogNotifier, Notifier};

/// State shared by every gateway handler.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  /// Receives new-event announcements; `None` disables them.
  pub notifier: Option<Arc<dyn Notifier>>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      notifier: self.notifier.clone(),
    }
  }
}

/// Build a fully-materialised gateway router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(
  store: Arc<S>,
  notifier: Option<Arc<dyn Notifier>>,
) -> Router<()>
where
  S: EventStore + 'static,
{
  Router::new()
    // Catalog
    .route("/events", get(events::list::<S>))
    .route("/events/{id}", get(events::get_one::<S>))
    // Submissions
    .route("/create-event", post(events::create::<S>))
    .route("/subscribe", post(subscribers::subscribe::<S>))
    .route("/register", post(registrations::register::<S>))
    // Admin listings
    .route("/subscribers", get(subscribers::list::<S>))
    .route("/registrations", get(registrations::list::<S>))
    .with_state(ApiState { store, notifier })
}

// ─── Integration tests ────────────────────────────────────────────────────────
