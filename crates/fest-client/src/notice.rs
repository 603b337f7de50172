//! Inline user-visible messages.

use std::{fmt, time::Duration};

/// How long a success notice stays visible.
pub const SUCCESS_CLEAR_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Info,
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind: NoticeKind,
  pub text: String,
}

impl Notice {
  pub fn info(text: impl Into<String>) -> Self {
    Self { kind: NoticeKind::Info, text: text.into() }
  }

  pub fn success(text: impl Into<String>) -> Self {
    Self { kind: NoticeKind::Success, text: text.into() }
  }

  pub fn error(text: impl Into<String>) -> Self {
    Self { kind: NoticeKind::Error, text: text.into() }
  }

  pub fn is_error(&self) -> bool { self.kind == NoticeKind::Error }

  /// Success notices clear themselves; everything else persists until
  /// replaced.
  pub fn clears_after(&self) -> Option<Duration> {
    (self.kind == NoticeKind::Success).then_some(SUCCESS_CLEAR_AFTER)
  }
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_success_clears() {
    assert_eq!(Notice::success("ok").clears_after(), Some(SUCCESS_CLEAR_AFTER));
    assert_eq!(Notice::error("no").clears_after(), None);
    assert_eq!(Notice::info("hm").clears_after(), None);
  }
}
