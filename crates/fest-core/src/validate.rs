//! Submission validation shared by the gateway and its clients.

use chrono::NaiveDate;
use validator::Validate;

use crate::{
  Error, Result, event::NewEvent, registration::NewRegistration,
};

/// Wire format of `Event::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Validate)]
struct EmailValidator {
  #[validate(email)]
  email: String,
}

/// Check that `email` is present and well-formed. Returns the trimmed address.
pub fn email(email: &str) -> Result<&str> {
  let email = email.trim();
  if email.is_empty() {
    return Err(Error::Required("Email"));
  }
  EmailValidator { email: email.to_owned() }
    .validate()
    .map_err(|_| Error::InvalidEmail(email.to_owned()))?;
  Ok(email)
}

/// Check a create-event submission and parse its date.
pub fn event(new: &NewEvent) -> Result<NaiveDate> {
  let required = [
    ("name", &new.name),
    ("date", &new.date),
    ("time", &new.time),
    ("venue", &new.venue),
    ("description", &new.description),
  ];
  let missing: Vec<&'static str> = required
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| *field)
    .collect();
  if !missing.is_empty() {
    return Err(Error::MissingFields(missing));
  }

  NaiveDate::parse_from_str(new.date.trim(), DATE_FORMAT)
    .map_err(|_| Error::InvalidDate(new.date.clone()))
}

/// Check a register submission.
pub fn registration(new: &NewRegistration) -> Result<()> {
  if new.name.trim().is_empty() {
    return Err(Error::Required("Name"));
  }
  email(&new.email)?;

  let has = |field: &Option<String>| {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
  };
  if !has(&new.event_name) && !has(&new.event_id) {
    return Err(Error::MissingEventReference);
  }
  Ok(())
}
