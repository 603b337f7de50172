//! Text cards for catalog events.

use std::fmt;

use fest_core::event::Event;

/// Long date format: `Saturday, May 10, 2025`.
pub const LONG_DATE: &str = "%A, %B %-d, %Y";

/// One rendered catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
  pub id:    String,
  pub title: String,
  pub label: String,
  pub icon:  &'static str,
  pub date:  String,
  pub time:  String,
  pub venue: String,
  pub blurb: String,
  pub link:  String,
  pub image: String,
}

impl Card {
  pub fn from_event(event: &Event) -> Self {
    Self {
      id:    event.id.clone(),
      title: event.name.clone(),
      label: event.label().to_owned(),
      icon:  event.icon(),
      date:  long_date(event),
      time:  event.time.clone(),
      venue: event.venue.clone(),
      blurb: event.blurb(),
      link:  detail_link(&event.id),
      image: event.image_or_default().into_owned(),
    }
  }
}

impl fmt::Display for Card {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}  [{}] ({})", self.title, self.label, self.icon)?;
    writeln!(f, "  {} · {} · {}", self.date, self.time, self.venue)?;
    writeln!(f, "  {}", self.blurb)?;
    writeln!(f, "  image: {}", self.image)?;
    write!(f, "  details: {}", self.link)
  }
}

pub fn long_date(event: &Event) -> String { event.date.format(LONG_DATE).to_string() }

/// `event.html?id=<id>`
pub fn detail_link(id: &str) -> String { format!("event.html?id={id}") }

/// Render cards for `events`, separated by blank lines.
pub fn render(events: &[Event]) -> String {
  events
    .iter()
    .map(|e| Card::from_event(e).to_string())
    .collect::<Vec<_>>()
    .join("\n\n")
}

/// The full detail view of one event.
pub fn detail(event: &Event) -> String {
  let mut out = format!(
    "{name}\n{label}\n\nDate:  {date}\nTime:  {time}\nVenue: {venue}\nImage: {image}\n\n{description}",
    name = event.name,
    label = event.label(),
    date = long_date(event),
    time = event.time,
    venue = event.venue,
    image = event.image_or_default(),
    description = event.description,
  );
  if let Some(created) = event.created_at {
    out.push_str(&format!("\n\nPublished {}", created.format("%Y-%m-%d %H:%M UTC")));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn event(json: &str) -> Event { serde_json::from_str(json).unwrap() }

  #[test]
  fn card_fields() {
    let card = Card::from_event(&event(
      r#"{"id":"g1","name":"Spring Gala","date":"2025-05-10","time":"7 PM",
          "venue":"Ballroom","type":"Cultural","description":"An evening of music."}"#,
    ));
    assert_eq!(card.date, "Saturday, May 10, 2025");
    assert_eq!(card.label, "cultural");
    assert_eq!(card.icon, "fa-microphone");
    assert_eq!(card.link, "event.html?id=g1");
    assert_eq!(card.image, "assets/cultural.jpg");
    assert_eq!(card.blurb, "An evening of music....");
  }

  #[test]
  fn untyped_event_uses_generic_label_and_image() {
    let card = Card::from_event(&event(
      r#"{"id":"x","name":"Meetup","date":"2025-03-01","shortDescription":"Say hi"}"#,
    ));
    assert_eq!(card.label, "Event");
    assert_eq!(card.icon, "fa-calendar-day");
    assert_eq!(card.image, "assets/event.jpg");
    assert_eq!(card.blurb, "Say hi");
  }

  #[test]
  fn render_joins_cards() {
    let events = vec![
      event(r#"{"id":"a","name":"A","date":"2025-01-01"}"#),
      event(r#"{"id":"b","name":"B","date":"2025-01-02"}"#),
    ];
    let out = render(&events);
    assert!(out.contains("event.html?id=a"));
    assert!(out.contains("\n\nB  [Event]"));
  }
}
