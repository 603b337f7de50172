//! Newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a subscriber should receive announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
  #[default]
  Confirmed,
  Unsubscribed,
}

/// A stored newsletter subscription. `email` is unique across subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
  pub id:        String,
  pub email:     String,
  pub timestamp: DateTime<Utc>,
  #[serde(default)]
  pub status:    SubscriptionStatus,
}

impl Subscriber {
  /// A freshly confirmed subscriber with a `sub-xxxxxxxx` identifier.
  pub fn new(email: impl Into<String>) -> Self {
    let simple = Uuid::new_v4().simple().to_string();
    Self {
      id:        format!("sub-{}", &simple[..8]),
      email:     email.into(),
      timestamp: Utc::now(),
      status:    SubscriptionStatus::Confirmed,
    }
  }

  pub fn is_confirmed(&self) -> bool {
    self.status == SubscriptionStatus::Confirmed
  }
}

/// Order a subscription-ordered list newest first. Equal timestamps put the
/// later subscription first.
pub fn newest_first(subscribers: &mut [Subscriber]) {
  subscribers.reverse();
  subscribers.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Body of a subscribe submission: `{"email": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
  #[serde(default)]
  pub email: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_subscriber_id_has_prefix_and_eight_chars() {
    let sub = Subscriber::new("a@x.com");
    assert!(sub.id.starts_with("sub-"));
    assert_eq!(sub.id.len(), 12);
    assert!(sub.is_confirmed());
  }

  #[test]
  fn newest_first_orders_by_timestamp_descending() {
    let at = |s: &str| s.parse::<DateTime<Utc>>().unwrap();
    let mut subs = vec![
      Subscriber { timestamp: at("2025-01-01T00:00:00Z"), ..Subscriber::new("old@x.com") },
      Subscriber { timestamp: at("2025-03-01T00:00:00Z"), ..Subscriber::new("new@x.com") },
      Subscriber { timestamp: at("2025-01-01T00:00:00Z"), ..Subscriber::new("tie@x.com") },
    ];
    newest_first(&mut subs);
    let emails: Vec<_> = subs.iter().map(|s| s.email.as_str()).collect();
    assert_eq!(emails, ["new@x.com", "tie@x.com", "old@x.com"]);
  }

  #[test]
  fn status_defaults_to_confirmed_when_absent() {
    let sub: Subscriber = serde_json::from_str(
      r#"{"id":"sub-1","email":"a@x.com","timestamp":"2025-01-01T00:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(sub.status, SubscriptionStatus::Confirmed);
  }
}
