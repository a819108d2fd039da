use span::Span;

/// The full source lines covered by a span, plus the position of the span
/// within them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snippet<'a> {
  /// The covered lines, without the trailing line break.
  pub text: &'a str,
  /// 1-based line number of the first covered line.
  pub line: usize,
  /// The highlighted range, relative to `text`.
  pub span: Span,
}

impl<'a> Snippet<'a> {
  /// Expects `span` to be in bounds of `src`.
  pub fn new(src: &'a str, span: impl Into<Span>) -> Self {
    let span: Span = span.into();

    let start = src[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = src[span.end..]
      .find('\n')
      .map(|i| i + span.end)
      .unwrap_or(src.len());

    let text = &src[start..end];
    let line = src[..start].matches('\n').count() + 1;

    // A span may touch the line break itself, clamp the highlight to the
    // trimmed text.
    let hl_start = (span.start - start).min(text.len());
    let hl_end = (span.end - start).min(text.len());

    Snippet {
      text,
      line,
      span: Span {
        start: hl_start,
        end: hl_end.max(hl_start),
      },
    }
  }

  #[cfg(test)]
  pub fn highlight(&self) -> &str {
    &self.text[self.span.range()]
  }
}
