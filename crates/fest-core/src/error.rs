//! Error types for `fest-core`.

use thiserror::Error;

/// Rejections produced while validating a submission.
///
/// The `Display` text of each variant is what the gateway returns to the
/// submitter, so it reads as a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("Invalid date format. Use YYYY-MM-DD.")]
  InvalidDate(String),

  #[error("{0} is required")]
  Required(&'static str),

  #[error("Invalid email format")]
  InvalidEmail(String),

  #[error("Event information is required")]
  MissingEventReference,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
