//! The displayed catalog and its reload bookkeeping.
//!
//! Every reload takes a [`Ticket`] before it starts fetching. When results
//! arrive out of order, only the newest ticket's result is kept.

use std::sync::{
  Mutex, MutexGuard, PoisonError,
  atomic::{AtomicU64, Ordering},
};

use fest_core::{catalog, event::Event};

use crate::{Result, card::Card};

pub const EMPTY_MESSAGE: &str = "No upcoming events at the moment.";
pub const FAILED_MESSAGE: &str = "Failed to load events. Please try again later.";

/// What the catalog view currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogState {
  /// Nothing loaded yet, or the catalog has no events.
  #[default]
  Empty,
  /// Events in ascending date order.
  Ready(Vec<Event>),
  /// The last applied load failed.
  Failed(String),
}

impl CatalogState {
  /// The inline message for states without cards.
  pub fn message(&self) -> Option<&str> {
    match self {
      Self::Empty => Some(EMPTY_MESSAGE),
      Self::Ready(_) => None,
      Self::Failed(message) => Some(message),
    }
  }
}

/// Issued by [`CatalogView::begin`]; identifies one reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Default)]
struct Shown {
  applied: u64,
  state:   CatalogState,
}

/// Holds the displayed catalog state.
#[derive(Default)]
pub struct CatalogView {
  issued: AtomicU64,
  shown:  Mutex<Shown>,
}

impl CatalogView {
  pub fn new() -> Self { Self::default() }

  /// Start a reload.
  pub fn begin(&self) -> Ticket {
    Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
  }

  /// Record the outcome of the reload identified by `ticket`.
  ///
  /// Returns `false`, leaving the view untouched, when a newer reload has
  /// already been applied.
  pub fn apply(&self, ticket: Ticket, result: Result<Vec<Event>>) -> bool {
    let mut shown = self.lock();
    if ticket.0 <= shown.applied {
      tracing::debug!(ticket = ticket.0, applied = shown.applied, "stale catalog load discarded");
      return false;
    }
    shown.applied = ticket.0;
    shown.state = match result {
      Ok(events) if events.is_empty() => CatalogState::Empty,
      Ok(mut events) => {
        catalog::sort_by_date(&mut events);
        CatalogState::Ready(events)
      }
      Err(e) => {
        tracing::error!(error = %e, "catalog load failed");
        CatalogState::Failed(FAILED_MESSAGE.to_owned())
      }
    };
    true
  }

  pub fn state(&self) -> CatalogState { self.lock().state.clone() }

  /// The displayed events; empty unless the view is [`CatalogState::Ready`].
  pub fn events(&self) -> Vec<Event> {
    match &self.lock().state {
      CatalogState::Ready(events) => events.clone(),
      _ => Vec::new(),
    }
  }

  /// One card per displayed event, in display order.
  pub fn cards(&self) -> Vec<Card> {
    match &self.lock().state {
      CatalogState::Ready(events) => events.iter().map(Card::from_event).collect(),
      _ => Vec::new(),
    }
  }

  /// Number of reloads started so far.
  pub fn generation(&self) -> u64 { self.issued.load(Ordering::SeqCst) }

  fn lock(&self) -> MutexGuard<'_, Shown> {
    self.shown.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn catalog(json: &str) -> Vec<Event> { serde_json::from_str(json).unwrap() }

  #[test]
  fn ready_state_is_sorted_by_date() {
    let view = CatalogView::new();
    let ticket = view.begin();
    view.apply(
      ticket,
      Ok(catalog(
        r#"[{"id":"1","name":"A","date":"2025-05-10"},
            {"id":"2","name":"B","date":"2025-03-01"}]"#,
      )),
    );
    let ids: Vec<_> = view.events().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(view.cards().len(), 2);
  }

  #[test]
  fn failure_shows_message_and_no_cards() {
    let view = CatalogView::new();
    let ticket = view.begin();
    view.apply(ticket, Err(Error::fetch("mem", "HTTP 500")));
    assert_eq!(view.state(), CatalogState::Failed(FAILED_MESSAGE.into()));
    assert!(view.cards().is_empty());
  }

  #[test]
  fn empty_catalog_is_empty_state() {
    let view = CatalogView::new();
    let ticket = view.begin();
    view.apply(ticket, Ok(Vec::new()));
    assert_eq!(view.state().message(), Some(EMPTY_MESSAGE));
  }

  #[test]
  fn stale_result_is_discarded() {
    let view = CatalogView::new();
    let older = view.begin();
    let newer = view.begin();
    assert!(view.apply(newer, Ok(catalog(r#"[{"id":"new","name":"N","date":"2025-01-01"}]"#))));
    assert!(!view.apply(older, Err(Error::fetch("mem", "late"))));
    assert_eq!(view.events()[0].id, "new");
    assert_eq!(view.generation(), 2);
  }
}
