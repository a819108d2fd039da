//! Error reporting
//!
//! A [`Report`] renders a message together with the source lines it refers
//! to, for example:
//!
//! ```text
//! error: invalid token `@`
//! > test.sk:2
//! |
//! | x = @
//! |
//! ```

use std::fmt;
use std::fmt::{Display, Write};

use beef::lean::Cow;
use owo_colors as colors;
use span::Span;
use thiserror::Error;

use crate::snippet::Snippet;
use crate::source::Source;
use crate::style::painted;

#[derive(Clone, Copy, Debug)]
pub enum Level {
  Info,
  Warning,
  Error,
}

impl Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let level = match self {
      Level::Info => "info",
      Level::Warning => "warning",
      Level::Error => "error",
    };
    write!(f, "{level}")
  }
}

/// A single diagnostic that may be emitted to anything which implements
/// [`fmt::Write`].
#[derive(Clone)]
pub struct Report<'a> {
  pub level: Level,
  pub message: Cow<'a, str>,
  pub span: Span,
  pub label: Option<Cow<'a, str>>,
  pub color: bool,
}

impl<'a> Report<'a> {
  pub fn new(level: Level, message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Report {
      level,
      message: message.into(),
      span: span.into(),
      label: None,
      color: true,
    }
  }

  /// An `Info`-level report.
  pub fn info(message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Self::new(Level::Info, message, span)
  }

  /// A `Warning`-level report.
  pub fn warn(message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Self::new(Level::Warning, message, span)
  }

  /// An `Error`-level report.
  pub fn error(message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Self::new(Level::Error, message, span)
  }

  /// An extra line of context, rendered below the snippet.
  pub fn label(mut self, label: impl Into<Cow<'a, str>>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn color(mut self, enabled: bool) -> Self {
    self.color = enabled;
    self
  }

  /// Emit the report to `w`.
  pub fn emit<W: Write>(&self, source: &Source<'_>, w: &mut W) -> Result<(), EmitError> {
    if source.text().get(self.span.range()).is_none() {
      return Err(EmitError::OutOfBounds);
    }

    let level_style = match self.level {
      Level::Info => colors::style().blue(),
      Level::Warning => colors::style().yellow(),
      Level::Error => colors::style().red(),
    };
    let span_style = level_style.underline();
    let symbol_style = colors::style().blue();

    let snippet = Snippet::new(source.text(), self.span);
    let pipe = painted("|", symbol_style, self.color);

    // {level}: {message}
    writeln!(
      w,
      "{}: {}",
      painted(self.level, level_style, self.color),
      self.message
    )?;
    // > {name}:{line}
    writeln!(
      w,
      "{} {}:{}",
      painted(">", symbol_style, self.color),
      source.name().unwrap_or("code"),
      snippet.line
    )?;

    writeln!(w, "{pipe}")?;

    let lines: Vec<&str> = snippet.text.split('\n').collect();
    let mut offsets = Vec::with_capacity(lines.len());
    let mut offset = 0;
    for line in &lines {
      offsets.push(offset);
      offset += line.len() + 1;
    }

    if lines.len() <= 5 {
      for (line, offset) in lines.iter().zip(&offsets) {
        self.emit_line(w, &pipe, line, *offset, snippet.span, span_style)?;
      }
    } else {
      // Large snippets are unlikely to be useful in full, keep the edges
      // and elide the middle.
      for i in [0, 1] {
        self.emit_line(w, &pipe, lines[i], offsets[i], snippet.span, span_style)?;
      }
      writeln!(w, "{pipe} {}", painted("...", span_style, self.color))?;
      for i in [lines.len() - 2, lines.len() - 1] {
        self.emit_line(w, &pipe, lines[i], offsets[i], snippet.span, span_style)?;
      }
    }

    writeln!(w, "{pipe}")?;

    if let Some(label) = &self.label {
      // + {label}
      writeln!(w, "{} {}", painted("+", symbol_style, self.color), label)?;
    }

    Ok(())
  }

  /// Emit the report to a string.
  pub fn emit_to_string(&self, source: &Source<'_>) -> Result<String, EmitError> {
    let mut buf = String::new();
    self.emit(source, &mut buf)?;
    Ok(buf)
  }

  fn emit_line<W: Write>(
    &self,
    w: &mut W,
    pipe: &dyn Display,
    line: &str,
    offset: usize,
    highlight: Span,
    span_style: colors::Style,
  ) -> Result<(), EmitError> {
    let start = highlight.start.clamp(offset, offset + line.len()) - offset;
    let end = highlight.end.clamp(offset, offset + line.len()) - offset;

    if start == end {
      writeln!(w, "{pipe} {line}")?;
    } else {
      writeln!(
        w,
        "{pipe} {}{}{}",
        &line[..start],
        painted(&line[start..end], span_style, self.color),
        &line[end..]
      )?;
    }

    Ok(())
  }
}

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("failed to format")]
  Fmt(#[from] fmt::Error),
  #[error("span does not fit within source string")]
  OutOfBounds,
}
