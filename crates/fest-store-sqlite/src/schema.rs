//! SQL schema for the Campus Fest Hub SQLite store.
//!
//! Every table carries an `INTEGER PRIMARY KEY` sequence column so listings can
//! fall back to insertion order.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS events (
    seq               INTEGER PRIMARY KEY AUTOINCREMENT,
    id                TEXT NOT NULL UNIQUE,
    name              TEXT NOT NULL,
    date              TEXT NOT NULL,   -- YYYY-MM-DD, sorts chronologically
    time              TEXT NOT NULL DEFAULT '',
    venue             TEXT NOT NULL DEFAULT '',
    kind              TEXT,            -- category label or NULL
    short_description TEXT,
    description       TEXT NOT NULL DEFAULT '',
    image             TEXT,            -- URL or data URL
    created_at        TEXT             -- RFC 3339
);

CREATE TABLE IF NOT EXISTS subscribers (
    seq       INTEGER PRIMARY KEY AUTOINCREMENT,
    id        TEXT NOT NULL UNIQUE,
    email     TEXT NOT NULL UNIQUE,
    timestamp TEXT NOT NULL,
    status    TEXT NOT NULL DEFAULT 'confirmed'
);

CREATE TABLE IF NOT EXISTS registrations (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    id         TEXT NOT NULL UNIQUE,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL,
    event_name TEXT,
    event_id   TEXT,
    timestamp  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS events_date_idx          ON events(date, seq);
CREATE INDEX IF NOT EXISTS registrations_email_idx  ON registrations(email);

PRAGMA user_version = 1;
";
