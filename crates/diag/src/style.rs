use std::fmt;
use std::fmt::Display;

use owo_colors as colors;

/// A value rendered with an optional [`owo_colors::Style`].
///
/// When the style is absent the value is written as-is, so emitting with
/// color disabled produces plain text.
pub(crate) struct Painted<T> {
  inner: T,
  style: Option<colors::Style>,
}

pub(crate) fn painted<T: Display>(inner: T, style: colors::Style, enabled: bool) -> Painted<T> {
  Painted {
    inner,
    style: enabled.then_some(style),
  }
}

impl<T: Display> Display for Painted<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use colors::OwoColorize;

    match self.style {
      Some(style) => write!(f, "{}", self.inner.style(style)),
      None => self.inner.fmt(f),
    }
  }
}
