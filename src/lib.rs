//! A minimal interpreter for a small, indentation-based, dynamically-typed
//! scripting language.
//!
//! Source text is tokenized (including synthesized INDENT/DEDENT block
//! markers), parsed into a syntax tree by recursive descent, and evaluated
//! by walking the tree against a chain of nested scopes.
//!
//! ```
//! let mut vm = skink::Skink::with_output(Vec::new());
//! vm.eval("print(\"hello\")\n").unwrap();
//! assert_eq!(vm.output(), b"hello\n");
//! ```

mod error;
mod interp;
mod scope;
mod value;

use std::io::{self, Write};

use span::LineMap;

pub use crate::error::Error;
pub use crate::interp::Interp;
pub use crate::value::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An embeddable interpreter instance.
///
/// Print output, diagnostics and debug dumps all go to the configured
/// writer, in program order.
pub struct Skink<W> {
  out: W,
  debug: bool,
}

impl Skink<io::Stdout> {
  /// An interpreter writing to standard output.
  pub fn new() -> Self {
    Self::with_output(io::stdout())
  }
}

impl Default for Skink<io::Stdout> {
  fn default() -> Self {
    Self::new()
  }
}

impl<W: Write> Skink<W> {
  pub fn with_output(out: W) -> Self {
    Skink { out, debug: false }
  }

  /// Enable the token listing and syntax tree dump.
  pub fn debug(mut self, enabled: bool) -> Self {
    self.debug = enabled;
    self
  }

  /// Compile and run `src`.
  ///
  /// Invalid tokens abort compilation with [`Error::Lex`] before anything
  /// runs. Parse and runtime problems are reported to the output writer as
  /// diagnostics, and execution continues best-effort.
  pub fn eval(&mut self, src: &str) -> Result<()> {
    let tokens = syntax::lex(src).map_err(Error::Lex)?;

    if self.debug {
      for token in &tokens {
        writeln!(
          self.out,
          "Line {}: {} ({})",
          token.line, token.lexeme, token.kind as u8
        )?;
      }
    }

    let lines = LineMap::new(src);
    let (module, errors) = syntax::parse(&tokens);
    for e in &errors {
      writeln!(
        self.out,
        "Parse error: {} at line {}",
        e.message,
        lines.line(e.span.start)
      )?;
    }

    if self.debug {
      writeln!(self.out, "{module:#?}")?;
    }

    let mut interp = Interp::new(&mut self.out, &lines);
    interp.run(&module)?;
    Ok(())
  }

  /// The output writer, for reading captured output back.
  pub fn output(&self) -> &W {
    &self.out
  }

  pub fn into_output(self) -> W {
    self.out
  }
}

#[cfg(test)]
mod tests;
