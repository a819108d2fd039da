use std::io;

use diag::{Report, Source};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The source contained invalid tokens; compilation was aborted before
  /// parsing.
  #[error("invalid syntax")]
  Lex(Vec<syntax::Error>),
  /// The output writer failed.
  #[error(transparent)]
  Io(#[from] io::Error),
}

impl Error {
  /// Render the error for terminal display, pointing into `source`.
  pub fn report(&self, source: &str, color: bool) -> String {
    match self {
      Error::Lex(errors) => {
        let source = Source::string(source);
        let mut out = String::new();
        for e in errors {
          let report = Report::error(e.message.to_string(), e.span).color(color);
          match report.emit_to_string(&source) {
            Ok(text) => out.push_str(&text),
            // A span that no longer fits the source, fall back to the
            // bare message.
            Err(_) => {
              out.push_str("error: ");
              out.push_str(e.message.as_ref());
              out.push('\n');
            }
          }
        }
        out
      }
      Error::Io(e) => format!("error: {e}\n"),
    }
  }
}
