//! Event records, the unit of the catalog.
//!
//! Events are authored through the create-event gateway and are read-only to
//! every other client. The JSON shape uses camelCase keys and names the
//! category field `type`.

use std::{borrow::Cow, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of description characters shown when no short description exists.
pub const BLURB_CHARS: usize = 100;

// ─── Category ────────────────────────────────────────────────────────────────

/// The category of an event.
///
/// The set is open: labels outside the known five are kept verbatim in
/// [`EventType::Other`]. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
  Cultural,
  Technical,
  Sports,
  Workshop,
  Seminar,
  Other(String),
}

impl EventType {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Cultural => "cultural",
      Self::Technical => "technical",
      Self::Sports => "sports",
      Self::Workshop => "workshop",
      Self::Seminar => "seminar",
      Self::Other(label) => label,
    }
  }

  /// Font Awesome icon class shown next to the category label.
  pub fn icon(&self) -> &'static str {
    match self {
      Self::Cultural => "fa-microphone",
      Self::Technical => "fa-laptop-code",
      Self::Sports => "fa-futbol",
      Self::Workshop => "fa-tools",
      Self::Seminar => "fa-chalkboard-teacher",
      Self::Other(_) => DEFAULT_ICON,
    }
  }
}

/// Icon used for unknown or unspecified categories.
pub const DEFAULT_ICON: &str = "fa-calendar-day";

impl From<String> for EventType {
  fn from(raw: String) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "cultural" => Self::Cultural,
      "technical" => Self::Technical,
      "sports" => Self::Sports,
      "workshop" => Self::Workshop,
      "seminar" => Self::Seminar,
      _ => Self::Other(raw),
    }
  }
}

impl From<&str> for EventType {
  fn from(raw: &str) -> Self { Self::from(raw.to_owned()) }
}

impl From<EventType> for String {
  fn from(kind: EventType) -> Self { kind.as_str().to_owned() }
}

impl fmt::Display for EventType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Accept a missing, null or blank `type` as "unspecified".
fn non_blank_type<'de, D>(d: D) -> Result<Option<EventType>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<String>::deserialize(d)?;
  Ok(raw.filter(|s| !s.trim().is_empty()).map(EventType::from))
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A published event as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  pub id:                String,
  pub name:              String,
  pub date:              NaiveDate,
  #[serde(default)]
  pub time:              String,
  #[serde(default)]
  pub venue:             String,
  #[serde(
    rename = "type",
    default,
    deserialize_with = "non_blank_type",
    skip_serializing_if = "Option::is_none"
  )]
  pub kind:              Option<EventType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub short_description: Option<String>,
  #[serde(default)]
  pub description:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image:             Option<String>,
  /// Set by the gateway when the event is stored.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at:        Option<DateTime<Utc>>,
}

impl Event {
  /// Category label, or `Event` when unspecified.
  pub fn label(&self) -> &str {
    self.kind.as_ref().map_or("Event", EventType::as_str)
  }

  pub fn icon(&self) -> &'static str {
    self.kind.as_ref().map_or(DEFAULT_ICON, EventType::icon)
  }

  /// The event image, falling back to the category's bundled asset.
  pub fn image_or_default(&self) -> Cow<'_, str> {
    match self.image.as_deref().map(str::trim) {
      Some(url) if !url.is_empty() => Cow::Borrowed(url),
      _ => Cow::Owned(default_image(self.kind.as_ref())),
    }
  }

  /// The short description, or the first [`BLURB_CHARS`] characters of the
  /// full description followed by `...`.
  pub fn blurb(&self) -> String {
    match self.short_description.as_deref().map(str::trim) {
      Some(short) if !short.is_empty() => short.to_owned(),
      _ => {
        let head: String = self.description.chars().take(BLURB_CHARS).collect();
        format!("{head}...")
      }
    }
  }
}

/// Bundled image path for a category: `assets/<type>.jpg`, or
/// `assets/event.jpg` when unspecified.
pub fn default_image(kind: Option<&EventType>) -> String {
  format!("assets/{}.jpg", kind.map_or("event", EventType::as_str))
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// Body of a create-event submission.
///
/// Every field is a plain string so that the gateway, not the decoder, decides
/// what is missing or malformed. Blank optional fields are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:                Option<String>,
  #[serde(default)]
  pub name:              String,
  #[serde(default)]
  pub date:              String,
  #[serde(default)]
  pub time:              String,
  #[serde(default)]
  pub venue:             String,
  #[serde(rename = "type", default)]
  pub kind:              String,
  #[serde(default)]
  pub short_description: String,
  #[serde(default)]
  pub description:       String,
  #[serde(default)]
  pub image:             String,
}

impl NewEvent {
  /// Build the stored [`Event`] once the submission has been validated.
  pub fn into_event(
    self,
    id: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
  ) -> Event {
    let blank_to_none = |s: String| (!s.trim().is_empty()).then_some(s);
    Event {
      id,
      name: self.name,
      date,
      time: self.time,
      venue: self.venue,
      kind: blank_to_none(self.kind).map(EventType::from),
      short_description: blank_to_none(self.short_description),
      description: self.description,
      image: blank_to_none(self.image),
      created_at: Some(created_at),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn sample() -> Event {
    serde_json::from_value(json!({
      "id": "42",
      "name": "Robotics Expo",
      "date": "2025-05-10",
      "time": "10:00 AM",
      "venue": "Main Hall",
      "type": "Technical",
      "description": "Robots everywhere."
    }))
    .unwrap()
  }

  #[test]
  fn category_matching_ignores_case() {
    let event = sample();
    assert_eq!(event.kind, Some(EventType::Technical));
    assert_eq!(event.icon(), "fa-laptop-code");
    assert_eq!(event.label(), "technical");
  }

  #[test]
  fn unknown_category_is_kept_verbatim() {
    let kind = EventType::from("Hackathon");
    assert_eq!(kind, EventType::Other("Hackathon".into()));
    assert_eq!(kind.icon(), DEFAULT_ICON);
    assert_eq!(String::from(kind), "Hackathon");
  }

  #[test]
  fn blank_type_is_unspecified() {
    let event: Event = serde_json::from_value(json!({
      "id": "1", "name": "x", "date": "2025-01-01", "type": "  "
    }))
    .unwrap();
    assert!(event.kind.is_none());
    assert_eq!(event.label(), "Event");
    assert_eq!(event.icon(), DEFAULT_ICON);
  }

  #[test]
  fn missing_image_falls_back_to_category_asset() {
    let mut event = sample();
    assert_eq!(event.image_or_default(), "assets/technical.jpg");

    event.kind = None;
    event.image = Some(String::new());
    assert_eq!(event.image_or_default(), "assets/event.jpg");

    event.image = Some("https://cdn.example/expo.png".into());
    assert_eq!(event.image_or_default(), "https://cdn.example/expo.png");
  }

  #[test]
  fn blurb_prefers_short_description() {
    let mut event = sample();
    assert_eq!(event.blurb(), "Robots everywhere....");

    event.short_description = Some("Robots!".into());
    assert_eq!(event.blurb(), "Robots!");
  }

  #[test]
  fn blurb_truncates_on_char_boundaries() {
    let mut event = sample();
    event.description = "é".repeat(150);
    let blurb = event.blurb();
    assert_eq!(blurb.chars().count(), BLURB_CHARS + 3);
    assert!(blurb.ends_with("..."));
  }

  #[test]
  fn serialises_with_wire_names() {
    let mut event = sample();
    event.short_description = Some("s".into());
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "technical");
    assert_eq!(value["shortDescription"], "s");
    assert!(value.get("image").is_none());
  }

  #[test]
  fn new_event_blank_fields_become_none() {
    let new = NewEvent {
      name: "Quiz".into(),
      kind: " ".into(),
      image: String::new(),
      ..Default::default()
    };
    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let event = new.into_event("q1".into(), date, Utc::now());
    assert!(event.kind.is_none());
    assert!(event.image.is_none());
    assert!(event.short_description.is_none());
    assert!(event.created_at.is_some());
  }
}
