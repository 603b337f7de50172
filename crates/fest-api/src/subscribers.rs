//! Handlers for `/subscribe` and `/subscribers`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/subscribe` | Body: `{"email":"..."}`; 201, or 409 `{"message":...}` if already subscribed |
//! | `GET`  | `/subscribers` | All subscribers |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use fest_core::{
  ack::{ALREADY_SUBSCRIBED, MessageBody, Subscribed},
  store::{EventStore, InsertOutcome},
  subscriber::{NewSubscription, Subscriber},
  validate,
};

use crate::{ApiState, error::{ApiError, ApiJson}};

// ─── Subscribe ────────────────────────────────────────────────────────────────

/// `POST /subscribe`
///
/// A repeated email is answered with 409 and an informational `message`, not
/// an `error`.
pub async fn subscribe<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<NewSubscription>,
) -> Result<Response, ApiError>
where
  S: EventStore,
{
  let email = validate::email(&body.email)?;

  let outcome = state
    .store
    .add_subscriber(Subscriber::new(email))
    .await
    .map_err(ApiError::store)?;

  let response = match outcome {
    InsertOutcome::Created(sub) => {
      tracing::info!(subscriber_id = %sub.id, "new subscriber");
      (
        StatusCode::CREATED,
        Json(Subscribed {
          message:       "Successfully subscribed to our newsletter!".to_owned(),
          subscriber_id: sub.id,
        }),
      )
        .into_response()
    }
    InsertOutcome::AlreadyExists => (
      StatusCode::CONFLICT,
      Json(MessageBody { message: ALREADY_SUBSCRIBED.to_owned() }),
    )
      .into_response(),
  };
  Ok(response)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subscribers`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Subscriber>>, ApiError>
where
  S: EventStore,
{
  let subscribers = state
    .store
    .list_subscribers()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(subscribers))
}
