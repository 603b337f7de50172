//! Response bodies exchanged with the gateway endpoints, and the
//! acknowledgement a client derives from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Gateway replies ─────────────────────────────────────────────────────────

/// Message of the 409 reply to a repeated subscription.
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed to our newsletter";

/// `POST /create-event` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreated {
  pub message:  String,
  pub event_id: String,
}

/// `POST /subscribe` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscribed {
  pub message:       String,
  pub subscriber_id: String,
}

/// `POST /register` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
  pub message:         String,
  pub registration_id: String,
}

/// Informational body, e.g. the 409 reply to a repeated subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
  pub message: String,
}

/// Failure body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}

// ─── Client-side acknowledgement ─────────────────────────────────────────────

/// How a submission was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
  /// The gateway accepted the submission (HTTP 2xx).
  Created,
  /// The subscription already existed (HTTP 409 on subscribe).
  Conflict,
  /// Demo mode replaced a failed submission with a fabricated success.
  Simulated,
}

/// What the submitter gets back from a gateway endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
  pub status:  AckStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  /// The full decoded response, for callers that need ids.
  #[serde(default, skip_serializing)]
  pub body:    Value,
}

impl Acknowledgement {
  /// Build an acknowledgement, lifting `message` out of the JSON body.
  pub fn from_body(status: AckStatus, body: Value) -> Self {
    let message = body
      .get("message")
      .and_then(Value::as_str)
      .map(str::to_owned);
    Self { status, message, body }
  }

  /// A string field of the response body, e.g. `"eventId"`.
  pub fn field(&self, key: &str) -> Option<&str> {
    self.body.get(key).and_then(Value::as_str)
  }

  /// The server's message, or `fallback` when it sent none.
  pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
    self.message.as_deref().unwrap_or(fallback)
  }
}
