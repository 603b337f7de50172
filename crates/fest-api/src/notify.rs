//! New-event announcements to newsletter subscribers.
//!
//! Delivery is pluggable through [`Notifier`]. The bundled [`LogNotifier`]
//! writes one log line per recipient; mail transports live outside this crate.

use fest_core::{event::Event, subscriber::Subscriber};
use thiserror::Error;

/// Characters of the event description included in an announcement.
pub const EXCERPT_CHARS: usize = 100;

#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// The message sent to subscribers when an event is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
  pub subject: String,
  pub text:    String,
}

impl Announcement {
  pub fn for_event(event: &Event) -> Self {
    let excerpt: String = event.description.chars().take(EXCERPT_CHARS).collect();
    let text = format!(
      "New Event Added: {name}\n\n\
       Date: {date}\n\
       Time: {time}\n\
       Venue: {venue}\n\n\
       Description: {excerpt}...\n\n\
       Visit our website for more details and to register!",
      name = event.name,
      date = event.date.format("%B %d, %Y"),
      time = event.time,
      venue = event.venue,
    );
    Self {
      subject: format!("New Campus Event: {}", event.name),
      text,
    }
  }
}

/// Delivers announcements.
pub trait Notifier: Send + Sync {
  /// Send `announcement` to `recipients`; returns how many were reached.
  fn announce(
    &self,
    announcement: &Announcement,
    recipients: &[Subscriber],
  ) -> Result<usize, NotifyError>;
}

/// Records each delivery in the log instead of sending mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn announce(
    &self,
    announcement: &Announcement,
    recipients: &[Subscriber],
  ) -> Result<usize, NotifyError> {
    for subscriber in recipients {
      tracing::info!(
        to = %subscriber.email,
        subject = %announcement.subject,
        "announcement queued"
      );
    }
    Ok(recipients.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[test]
  fn announcement_formats_date_and_excerpt() {
    let event = Event {
      id:                "e1".into(),
      name:              "Spring Gala".into(),
      date:              NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
      time:              "7 PM".into(),
      venue:             "Ballroom".into(),
      kind:              None,
      short_description: None,
      description:       "x".repeat(300),
      image:             None,
      created_at:        None,
    };
    let a = Announcement::for_event(&event);
    assert_eq!(a.subject, "New Campus Event: Spring Gala");
    assert!(a.text.contains("Date: May 10, 2025"));
    assert!(a.text.contains("Venue: Ballroom"));
    assert!(a.text.contains(&format!("Description: {}...", "x".repeat(100))));
    assert!(!a.text.contains(&"x".repeat(101)));
  }

  #[test]
  fn log_notifier_counts_recipients() {
    let recipients = vec![Subscriber::new("a@x.com"), Subscriber::new("b@x.com")];
    let a = Announcement { subject: "s".into(), text: "t".into() };
    assert_eq!(LogNotifier.announce(&a, &recipients).unwrap(), 2);
  }
}
