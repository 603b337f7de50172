//! [`SqliteStore`], the SQLite implementation of [`EventStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use fest_core::{
  event::Event,
  registration::{NewRegistration, Registration},
  store::{EventStore, InsertOutcome},
  subscriber::Subscriber,
};

use crate::{
  encode::{
    EVENT_COLUMNS, RawEvent, RawRegistration, RawSubscriber, encode_dt,
    encode_status, encode_uuid,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Campus Fest Hub store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  type Error = crate::Error;

  // ── Events ────────────────────────────────────────────────────────────────

  async fn add_event(&self, event: Event) -> Result<InsertOutcome<Event>> {
    let raw = RawEvent::from_event(&event);

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT OR IGNORE INTO events (
             id, name, date, time, venue, kind,
             short_description, description, image, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            raw.id,
            raw.name,
            raw.date,
            raw.time,
            raw.venue,
            raw.kind,
            raw.short_description,
            raw.description,
            raw.image,
            raw.created_at,
          ],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(if inserted {
      InsertOutcome::Created(event)
    } else {
      InsertOutcome::AlreadyExists
    })
  }

  async fn get_event(&self, id: &str) -> Result<Option<Event>> {
    let id = id.to_owned();

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
            rusqlite::params![id],
            RawEvent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EVENT_COLUMNS} FROM events ORDER BY date, seq"
        ))?;
        let rows = stmt
          .query_map([], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  // ── Subscribers ───────────────────────────────────────────────────────────

  async fn add_subscriber(
    &self,
    subscriber: Subscriber,
  ) -> Result<InsertOutcome<Subscriber>> {
    let id_str     = subscriber.id.clone();
    let email      = subscriber.email.clone();
    let at_str     = encode_dt(subscriber.timestamp);
    let status_str = encode_status(subscriber.status).to_owned();

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO subscribers (id, email, timestamp, status)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(email) DO NOTHING",
          rusqlite::params![id_str, email, at_str, status_str],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(if inserted {
      InsertOutcome::Created(subscriber)
    } else {
      InsertOutcome::AlreadyExists
    })
  }

  async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
    let raws: Vec<RawSubscriber> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, email, timestamp, status FROM subscribers ORDER BY seq",
        )?;
        let rows = stmt
          .query_map([], RawSubscriber::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubscriber::into_subscriber).collect()
  }

  // ── Registrations ─────────────────────────────────────────────────────────

  async fn add_registration(
    &self,
    input: NewRegistration,
  ) -> Result<InsertOutcome<Registration>> {
    let registration = input.into_registration();

    let id_str     = encode_uuid(registration.id);
    let name       = registration.name.clone();
    let email      = registration.email.clone();
    let event_name = registration.event_name.clone();
    let event_id   = registration.event_id.clone();
    let at_str     = encode_dt(registration.timestamp);

    // Check and insert inside one transaction so two identical submissions
    // cannot both pass the duplicate check.
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let duplicate = tx
          .query_row(
            "SELECT 1 FROM registrations
             WHERE email = ?1
               AND ((?2 IS NOT NULL AND event_id = ?2)
                 OR (?3 IS NOT NULL AND event_name = ?3))
             LIMIT 1",
            rusqlite::params![email, event_id, event_name],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if duplicate {
          return Ok(false);
        }

        tx.execute(
          "INSERT INTO registrations
             (id, name, email, event_name, event_id, timestamp)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, email, event_name, event_id, at_str],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    Ok(if inserted {
      InsertOutcome::Created(registration)
    } else {
      InsertOutcome::AlreadyExists
    })
  }

  async fn list_registrations(
    &self,
    event_id: Option<&str>,
  ) -> Result<Vec<Registration>> {
    let event_id = event_id.map(str::to_owned);

    let raws: Vec<RawRegistration> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, email, event_name, event_id, timestamp
           FROM registrations
           WHERE ?1 IS NULL OR event_id = ?1
           ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![event_id], RawRegistration::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawRegistration::into_registration)
      .collect()
  }
}
