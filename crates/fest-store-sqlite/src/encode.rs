//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`
//! and UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use fest_core::{
  event::{Event, EventType},
  registration::Registration,
  subscriber::{Subscriber, SubscriptionStatus},
  validate::DATE_FORMAT,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> / NaiveDate ────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── SubscriptionStatus ───────────────────────────────────────────────────────

pub fn encode_status(s: SubscriptionStatus) -> &'static str {
  match s {
    SubscriptionStatus::Confirmed => "confirmed",
    SubscriptionStatus::Unsubscribed => "unsubscribed",
  }
}

pub fn decode_status(s: &str) -> Result<SubscriptionStatus> {
  match s {
    "confirmed" => Ok(SubscriptionStatus::Confirmed),
    "unsubscribed" => Ok(SubscriptionStatus::Unsubscribed),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

pub const EVENT_COLUMNS: &str = "id, name, date, time, venue, kind, \
                                 short_description, description, image, created_at";

/// An `events` row as read from SQLite, before decoding.
pub struct RawEvent {
  pub id:                String,
  pub name:              String,
  pub date:              String,
  pub time:              String,
  pub venue:             String,
  pub kind:              Option<String>,
  pub short_description: Option<String>,
  pub description:       String,
  pub image:             Option<String>,
  pub created_at:        Option<String>,
}

impl RawEvent {
  /// Read a row selected with [`EVENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      date:              row.get(2)?,
      time:              row.get(3)?,
      venue:             row.get(4)?,
      kind:              row.get(5)?,
      short_description: row.get(6)?,
      description:       row.get(7)?,
      image:             row.get(8)?,
      created_at:        row.get(9)?,
    })
  }

  pub fn from_event(e: &Event) -> Self {
    Self {
      id:                e.id.clone(),
      name:              e.name.clone(),
      date:              encode_date(e.date),
      time:              e.time.clone(),
      venue:             e.venue.clone(),
      kind:              e.kind.as_ref().map(|k| k.as_str().to_owned()),
      short_description: e.short_description.clone(),
      description:       e.description.clone(),
      image:             e.image.clone(),
      created_at:        e.created_at.map(encode_dt),
    }
  }

  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:                self.id,
      name:              self.name,
      date:              decode_date(&self.date)?,
      time:              self.time,
      venue:             self.venue,
      kind:              self.kind.map(EventType::from),
      short_description: self.short_description,
      description:       self.description,
      image:             self.image,
      created_at:        self.created_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// A `subscribers` row as read from SQLite.
pub struct RawSubscriber {
  pub id:        String,
  pub email:     String,
  pub timestamp: String,
  pub status:    String,
}

impl RawSubscriber {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      email:     row.get(1)?,
      timestamp: row.get(2)?,
      status:    row.get(3)?,
    })
  }

  pub fn into_subscriber(self) -> Result<Subscriber> {
    Ok(Subscriber {
      id:        self.id,
      email:     self.email,
      timestamp: decode_dt(&self.timestamp)?,
      status:    decode_status(&self.status)?,
    })
  }
}

/// A `registrations` row as read from SQLite.
pub struct RawRegistration {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub event_name: Option<String>,
  pub event_id:   Option<String>,
  pub timestamp:  String,
}

impl RawRegistration {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      event_name: row.get(3)?,
      event_id:   row.get(4)?,
      timestamp:  row.get(5)?,
    })
  }

  pub fn into_registration(self) -> Result<Registration> {
    Ok(Registration {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      email:      self.email,
      event_name: self.event_name,
      event_id:   self.event_id,
      timestamp:  decode_dt(&self.timestamp)?,
    })
  }
}
