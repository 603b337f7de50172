//! Handlers for `/register` and `/registrations`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: [`NewRegistration`]; 201, or 409 if already registered |
//! | `GET`  | `/registrations` | Optional `?event_id=` |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use fest_core::{
  ack::Registered,
  registration::{NewRegistration, Registration},
  store::{EventStore, InsertOutcome},
  validate,
};
use serde::Deserialize;

use crate::{ApiState, error::{ApiError, ApiJson}};

// ─── Register ─────────────────────────────────────────────────────────────────

/// `POST /register`
///
/// When only `eventId` is given, `eventName` is filled in from the catalog.
pub async fn register<S>(
  State(state): State<ApiState<S>>,
  ApiJson(mut body): ApiJson<NewRegistration>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventStore,
{
  validate::registration(&body)?;
  body.email = body.email.trim().to_owned();

  if body.event_name.as_deref().is_none_or(|n| n.trim().is_empty())
    && let Some(event_id) = body.event_id.clone()
  {
    match state.store.get_event(&event_id).await {
      Ok(Some(event)) => body.event_name = Some(event.name),
      Ok(None) => {}
      Err(e) => {
        tracing::warn!(error = %e, %event_id, "could not resolve event name");
      }
    }
  }

  let registration = match state
    .store
    .add_registration(body)
    .await
    .map_err(ApiError::store)?
  {
    InsertOutcome::Created(r) => r,
    InsertOutcome::AlreadyExists => {
      return Err(ApiError::Conflict(
        "You are already registered for this event".to_owned(),
      ));
    }
  };
  tracing::info!(registration_id = %registration.id, "registration stored");

  Ok((
    StatusCode::CREATED,
    Json(Registered {
      message:         "Registration successful".to_owned(),
      registration_id: registration.id.to_string(),
    }),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub event_id: Option<String>,
}

/// `GET /registrations[?event_id=<id>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Registration>>, ApiError>
where
  S: EventStore,
{
  let registrations = state
    .store
    .list_registrations(params.event_id.as_deref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(registrations))
}
