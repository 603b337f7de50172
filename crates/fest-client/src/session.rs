//! The admin gate.
//!
//! Any non-empty email/password pair opens a session. Nothing is checked
//! against a server; the session only decides which actions the client offers.

use chrono::{DateTime, Duration, Utc};

use crate::{Error, Result};

/// Session lifetime when none is configured.
pub const DEFAULT_TTL: Duration = Duration::hours(8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
  pub email:        String,
  pub signed_in_at: DateTime<Utc>,
  pub expires_at:   DateTime<Utc>,
}

impl AdminSession {
  pub fn sign_in(email: &str, password: &str, ttl: Duration) -> Result<Self> {
    Self::sign_in_at(email, password, ttl, Utc::now())
  }

  pub fn sign_in_at(
    email: &str,
    password: &str,
    ttl: Duration,
    now: DateTime<Utc>,
  ) -> Result<Self> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
      return Err(Error::MissingCredentials);
    }
    Ok(Self {
      email:        email.to_owned(),
      signed_in_at: now,
      expires_at:   now + ttl,
    })
  }

  pub fn is_active(&self, now: DateTime<Utc>) -> bool { now < self.expires_at }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_credentials_are_refused() {
    assert!(matches!(
      AdminSession::sign_in("", "pw", DEFAULT_TTL),
      Err(Error::MissingCredentials)
    ));
    assert!(matches!(
      AdminSession::sign_in("admin@x.com", "", DEFAULT_TTL),
      Err(Error::MissingCredentials)
    ));
  }

  #[test]
  fn session_expires_after_ttl() {
    let now = Utc::now();
    let session =
      AdminSession::sign_in_at("admin@x.com", "pw", Duration::minutes(10), now).unwrap();
    assert!(session.is_active(now));
    assert!(session.is_active(now + Duration::minutes(9)));
    assert!(!session.is_active(now + Duration::minutes(10)));
  }
}
