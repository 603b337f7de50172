//! Catalog ordering and lookup.

use crate::event::Event;

/// Sort events ascending by date.
///
/// The sort is stable: events sharing a date keep their input order.
pub fn sort_by_date(events: &mut [Event]) {
  events.sort_by_key(|e| e.date);
}

/// Find an event by its id.
pub fn find<'a>(events: &'a [Event], id: &str) -> Option<&'a Event> {
  events.iter().find(|e| e.id == id)
}
