//! Handlers for the catalog and `/create-event`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | Catalog, ascending by date |
//! | `GET`  | `/events/{id}` | 404 if not found |
//! | `POST` | `/create-event` | Body: [`NewEvent`]; 201 + [`EventCreated`], 409 on a taken id |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use fest_core::{
  ack::EventCreated,
  event::{Event, NewEvent},
  store::{EventStore, InsertOutcome},
  validate,
};
use uuid::Uuid;

use crate::{
  ApiState,
  error::{ApiError, ApiJson},
  notify::Announcement,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /events`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Event>>, ApiError>
where
  S: EventStore,
{
  let events = state.store.list_events().await.map_err(ApiError::store)?;
  Ok(Json(events))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /events/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Event>, ApiError>
where
  S: EventStore,
{
  let event = state
    .store
    .get_event(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(event))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /create-event`: validates, stores, then announces to subscribers.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<NewEvent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventStore,
{
  let date = validate::event(&body)?;
  let id = body
    .id
    .clone()
    .filter(|id| !id.trim().is_empty())
    .unwrap_or_else(|| Uuid::new_v4().to_string());

  let event = body.into_event(id.clone(), date, Utc::now());
  let event = match state.store.add_event(event).await.map_err(ApiError::store)? {
    InsertOutcome::Created(event) => event,
    InsertOutcome::AlreadyExists => {
      return Err(ApiError::Conflict(format!(
        "An event with id {id} already exists"
      )));
    }
  };
  tracing::info!(event_id = %event.id, name = %event.name, "event created");

  let message = if announce(&state, &event).await {
    "Event added successfully! Subscribers have been notified."
  } else {
    "Event added successfully!"
  };

  Ok((
    StatusCode::CREATED,
    Json(EventCreated {
      message:  message.to_owned(),
      event_id: event.id,
    }),
  ))
}

/// Hand the announcement to the configured notifier. Failures are logged and
/// reported as "not notified"; they never fail the request.
async fn announce<S: EventStore>(state: &ApiState<S>, event: &Event) -> bool {
  let Some(notifier) = &state.notifier else {
    return false;
  };

  let recipients: Vec<_> = match state.store.list_subscribers().await {
    Ok(all) => all.into_iter().filter(|s| s.is_confirmed()).collect(),
    Err(e) => {
      tracing::warn!(error = %e, "could not load subscribers for announcement");
      return false;
    }
  };

  match notifier.announce(&Announcement::for_event(event), &recipients) {
    Ok(reached) => {
      tracing::info!(event_id = %event.id, reached, "subscribers notified");
      true
    }
    Err(e) => {
      tracing::warn!(error = %e, "could not notify subscribers");
      false
    }
  }
}
