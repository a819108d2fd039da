#![deny(unused_must_use)]

use beef::lean::Cow;
use span::{Span, Spanned};

use crate::ast;
use crate::lexer::TokenKind::*;
use crate::lexer::{Token, TokenKind};
use crate::{Error, Result};

/// Parse a token stream produced by [`lex`][crate::lexer::lex].
///
/// Parsing is best-effort: problems are collected as diagnostics, the
/// offending token is skipped, and parsing continues. The module root is
/// always returned, possibly with fewer statements than the input intended.
pub fn parse<'src>(tokens: &[Token<'src>]) -> (ast::Module<'src>, Vec<Error>) {
  Parser::new(tokens).module()
}

struct Parser<'t, 'src> {
  tokens: &'t [Token<'src>],
  pos: usize,
  eof: Token<'src>,
  errors: Vec<Error>,
}

impl<'t, 'src> Parser<'t, 'src> {
  fn new(tokens: &'t [Token<'src>]) -> Self {
    let end = tokens.last().map(|token| token.span.end).unwrap_or(0);
    let eof = Token {
      kind: Tok_Eof,
      lexeme: Cow::borrowed(Tok_Eof.name()),
      number: None,
      span: (end..end).into(),
      line: tokens.last().map(|token| token.line).unwrap_or(1),
      column: 1,
    };
    Parser {
      tokens,
      pos: 0,
      eof,
      errors: Vec::new(),
    }
  }

  fn module(mut self) -> (ast::Module<'src>, Vec<Error>) {
    let mut module = ast::Module::new();

    while !self.current().is(Tok_Eof) {
      self.skip_newlines();
      if self.current().is(Tok_Eof) {
        break;
      }
      match self.stmt() {
        Ok(stmt) => module.body.push(stmt),
        Err(e) => self.recover(e),
      }
      self.skip_newlines();
    }

    (module, self.errors)
  }

  /// Record the error and skip the offending token.
  fn recover(&mut self, e: Error) {
    self.errors.push(e);
    self.advance();
  }

  #[inline]
  fn current(&self) -> &Token<'src> {
    self.tokens.get(self.pos).unwrap_or(&self.eof)
  }

  #[inline]
  fn previous(&self) -> &Token<'src> {
    self.tokens.get(self.pos.saturating_sub(1)).unwrap_or(&self.eof)
  }

  /// The token one past the current one, used to tell an assignment apart
  /// from an expression statement.
  #[inline]
  fn peek(&self) -> &Token<'src> {
    self.tokens.get(self.pos + 1).unwrap_or(&self.eof)
  }

  /// Move forward by one token, returning the one that was current.
  #[inline]
  fn advance(&mut self) -> &Token<'src> {
    if self.pos < self.tokens.len() {
      self.pos += 1;
    }
    self.previous()
  }

  #[inline]
  fn bump_if(&mut self, kind: TokenKind) -> bool {
    if self.current().is(kind) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind) -> Result<()> {
    if self.bump_if(kind) {
      Ok(())
    } else {
      Err(Error::new(
        format!("expected `{}`", kind.name()),
        self.current().span,
      ))
    }
  }

  fn skip_newlines(&mut self) {
    while self.current().is(Tok_Newline) {
      self.advance();
    }
  }

  fn unexpected(&self) -> Error {
    Error::new(
      format!("unexpected token '{}'", self.current().lexeme),
      self.current().span,
    )
  }
}

mod common;
mod expr;
mod stmt;

// A single parse_XXX() method consumes up to a few hundred bytes of stack
// space, and deeply nested input drives the descent arbitrarily deep. Keep
// enough headroom to unwind with an error instead of overflowing.
#[cfg(all(feature = "check-recursion-limit", not(target_family = "wasm")))]
const MINIMUM_STACK_REQUIRED: usize = 64_000;

#[cfg(all(feature = "check-recursion-limit", not(target_family = "wasm")))]
fn check_recursion_limit(span: Span) -> Result<()> {
  if stacker::remaining_stack()
    .map(|available| available > MINIMUM_STACK_REQUIRED)
    .unwrap_or(true)
  {
    Ok(())
  } else {
    Err(Error::new("nesting limit reached", span))
  }
}

#[cfg(any(not(feature = "check-recursion-limit"), target_family = "wasm"))]
fn check_recursion_limit(_span: Span) -> Result<()> {
  Ok(())
}

#[cfg(test)]
mod tests;
