//! Error taxonomy for the client side.
//!
//! A 409 answer to a subscription is not an error; it is reported as
//! [`AckStatus::Conflict`](fest_core::ack::AckStatus::Conflict).

use std::path::PathBuf;

use thiserror::Error;

use crate::client::Endpoint;

#[derive(Debug, Error)]
pub enum Error {
  /// The catalog could not be retrieved: transport failure, non-2xx status or
  /// unreadable file.
  #[error("failed to fetch catalog from {uri}: {reason}")]
  Fetch { uri: String, reason: String },

  /// The catalog was retrieved but is not a JSON array of events.
  #[error("catalog from {uri} is malformed: {source}")]
  Parse {
    uri:    String,
    #[source]
    source: serde_json::Error,
  },

  /// A gateway endpoint rejected or failed a submission.
  #[error("{endpoint} submission failed: {reason}")]
  Submission {
    endpoint: Endpoint,
    /// HTTP status, when a response was received at all.
    status:   Option<u16>,
    reason:   String,
  },

  #[error("Please enter both email and password.")]
  MissingCredentials,

  #[error("admin session required")]
  NotSignedIn,

  #[error("cannot read image {}: {source}", path.display())]
  Image {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to build HTTP client: {0}")]
  Http(#[from] reqwest::Error),
}

impl Error {
  pub(crate) fn fetch(uri: impl Into<String>, reason: impl ToString) -> Self {
    Error::Fetch { uri: uri.into(), reason: reason.to_string() }
  }

  pub(crate) fn submission(
    endpoint: Endpoint,
    status: Option<u16>,
    reason: impl ToString,
  ) -> Self {
    Error::Submission { endpoint, status, reason: reason.to_string() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
