//! The `EventStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `fest-store-sqlite`).
//! The gateway (`fest-api`) depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  event::Event,
  registration::{NewRegistration, Registration},
  subscriber::Subscriber,
};

/// Result of an insert that is subject to a uniqueness rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
  Created(T),
  /// A record with the same identity already exists; nothing was written.
  AlreadyExists,
}

impl<T> InsertOutcome<T> {
  pub fn created(self) -> Option<T> {
    match self {
      Self::Created(t) => Some(t),
      Self::AlreadyExists => None,
    }
  }
}

/// Abstraction over a Campus Fest Hub storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Events ────────────────────────────────────────────────────────────

  /// Persist a new event. `AlreadyExists` if the id is taken.
  fn add_event(
    &self,
    event: Event,
  ) -> impl Future<Output = Result<InsertOutcome<Event>, Self::Error>> + Send + '_;

  /// Retrieve an event by id. Returns `None` if not found.
  fn get_event<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + 'a;

  /// All events, ascending by date; ties in insertion order.
  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  // ── Subscribers ───────────────────────────────────────────────────────

  /// Persist a subscriber. `AlreadyExists` if the email is already present.
  fn add_subscriber(
    &self,
    subscriber: Subscriber,
  ) -> impl Future<Output = Result<InsertOutcome<Subscriber>, Self::Error>>
  + Send
  + '_;

  /// All subscribers in subscription order.
  fn list_subscribers(
    &self,
  ) -> impl Future<Output = Result<Vec<Subscriber>, Self::Error>> + Send + '_;

  // ── Registrations ─────────────────────────────────────────────────────

  /// Persist a registration. `AlreadyExists` if the same email is already
  /// registered for the same event id or event name.
  fn add_registration(
    &self,
    input: NewRegistration,
  ) -> impl Future<Output = Result<InsertOutcome<Registration>, Self::Error>>
  + Send
  + '_;

  /// Registrations in submission order, optionally for one event id.
  fn list_registrations<'a>(
    &'a self,
    event_id: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<Registration>, Self::Error>> + Send + 'a;
}
