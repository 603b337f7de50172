//! Attendee registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored registration of one attendee for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
  pub id:         Uuid,
  pub name:       String,
  pub email:      String,
  pub event_name: Option<String>,
  /// Back-reference to the catalog; absent for free-text registrations.
  pub event_id:   Option<String>,
  pub timestamp:  DateTime<Utc>,
}

impl Registration {
  /// Whether `other` registers the same email for the same event, matched by
  /// id or by name.
  pub fn duplicates(&self, other: &NewRegistration) -> bool {
    if self.email != other.email {
      return false;
    }
    let same_id = other.event_id.is_some() && self.event_id == other.event_id;
    let same_name =
      other.event_name.is_some() && self.event_name == other.event_name;
    same_id || same_name
  }
}

/// Body of a register submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
  #[serde(default)]
  pub name:       String,
  #[serde(default)]
  pub email:      String,
  #[serde(default)]
  pub event_name: Option<String>,
  #[serde(default)]
  pub event_id:   Option<String>,
}

impl NewRegistration {
  pub fn into_registration(self) -> Registration {
    Registration {
      id:         Uuid::new_v4(),
      name:       self.name,
      email:      self.email,
      event_name: self.event_name,
      event_id:   self.event_id,
      timestamp:  Utc::now(),
    }
  }
}
