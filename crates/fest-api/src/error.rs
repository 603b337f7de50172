//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::{FromRequest, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use fest_core::ack::ErrorBody;
use thiserror::Error;

/// An error returned by an API handler. Rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The request body could not be decoded; keeps the extractor's status.
  #[error("rejected body: {1}")]
  Rejected(StatusCode, String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

impl From<fest_core::Error> for ApiError {
  fn from(e: fest_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Rejected(rejection.status(), rejection.body_text())
  }
}

/// JSON request body whose decoding failures answer as `{"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
      ApiError::Rejected(status, m) => (status, m),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "An unexpected error occurred".to_owned(),
        )
      }
    };
    (status, Json(ErrorBody { error })).into_response()
  }
}
