use std::borrow::Cow;

/// A source buffer, optionally carrying the name it was loaded from.
#[derive(Clone, Debug)]
pub struct Source<'a> {
  name: Option<Cow<'a, str>>,
  text: Cow<'a, str>,
}

impl<'a> Source<'a> {
  pub fn string(text: impl Into<Cow<'a, str>>) -> Self {
    Source {
      name: None,
      text: text.into(),
    }
  }

  pub fn file(name: impl Into<Cow<'a, str>>, text: impl Into<Cow<'a, str>>) -> Self {
    Source {
      name: Some(name.into()),
      text: text.into(),
    }
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn text(&self) -> &str {
    self.text.as_ref()
  }
}

impl<'a> From<&'a str> for Source<'a> {
  fn from(value: &'a str) -> Self {
    Source::string(value)
  }
}

impl<'a> From<String> for Source<'a> {
  fn from(value: String) -> Self {
    Source::string(value)
  }
}
