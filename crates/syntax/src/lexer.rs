#![allow(non_camel_case_types)]

use beef::lean::Cow;
use span::Span;

use crate::Error;

/// Tokenize an entire source buffer.
///
/// The returned stream always ends with a single `Tok_Eof`, preceded by one
/// `Tok_Dedent` for every indentation level still open at the end of input.
/// Any invalid byte in the input fails the whole scan.
pub fn lex(src: &str) -> Result<Vec<Token<'_>>, Vec<Error>> {
  let mut lexer = Lexer::new(src);
  let mut tokens = Vec::new();
  let mut errors = Vec::new();

  loop {
    let token = lexer.next_token();
    if token.is(TokenKind::Tok_Error) {
      errors.push(Error::new(
        format!("invalid token `{}`", token.lexeme),
        token.span,
      ));
    }
    let done = token.is(TokenKind::Tok_Eof);
    tokens.push(token);
    if done {
      break;
    }
  }

  if errors.is_empty() {
    Ok(tokens)
  } else {
    Err(errors)
  }
}

#[derive(Clone, Debug)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub lexeme: Cow<'src, str>,
  /// Parsed value of a `Lit_Number` token, `None` for every other kind.
  pub number: Option<f64>,
  pub span: Span,
  /// 1-based line the token starts on.
  pub line: u32,
  /// 1-based column the token starts on.
  pub column: u32,
}

impl<'src> Token<'src> {
  #[inline]
  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
  // Literals
  Lit_Number,
  Lit_String,
  Lit_Ident,

  // Operators
  Op_Plus,
  Op_Minus,
  Op_Star,
  Op_Slash,
  Op_Equal,
  Op_EqualEqual,
  Op_BangEqual,
  Op_Less,
  Op_More,
  Op_LessEqual,
  Op_MoreEqual,

  // Brackets
  Brk_ParenL,
  Brk_ParenR,
  Brk_SquareL,
  Brk_SquareR,

  // Misc characters
  Tok_Comma,
  Tok_Colon,

  // Keywords
  Kw_If,
  Kw_Else,
  Kw_While,
  Kw_Def,
  Kw_Return,
  Kw_Print,

  // Layout
  Tok_Newline,
  Tok_Indent,
  Tok_Dedent,

  Tok_Eof,
  Tok_Error,
}

impl TokenKind {
  pub fn name(&self) -> &'static str {
    use TokenKind::*;
    match self {
      Lit_Number => "number",
      Lit_String => "string",
      Lit_Ident => "identifier",
      Op_Plus => "+",
      Op_Minus => "-",
      Op_Star => "*",
      Op_Slash => "/",
      Op_Equal => "=",
      Op_EqualEqual => "==",
      Op_BangEqual => "!=",
      Op_Less => "<",
      Op_More => ">",
      Op_LessEqual => "<=",
      Op_MoreEqual => ">=",
      Brk_ParenL => "(",
      Brk_ParenR => ")",
      Brk_SquareL => "[",
      Brk_SquareR => "]",
      Tok_Comma => ",",
      Tok_Colon => ":",
      Kw_If => "if",
      Kw_Else => "else",
      Kw_While => "while",
      Kw_Def => "def",
      Kw_Return => "return",
      Kw_Print => "print",
      Tok_Newline => "newline",
      Tok_Indent => "indent",
      Tok_Dedent => "dedent",
      Tok_Eof => "eof",
      Tok_Error => "error",
    }
  }
}

/// How many columns a tab advances the indentation width.
const TAB_WIDTH: u32 = 4;

pub struct Lexer<'src> {
  src: &'src str,
  pos: usize,
  line: u32,
  column: u32,
  /// Stack of open indentation widths. The base entry 0 is never popped by
  /// line handling, only drained at end of input.
  indent: Vec<u32>,
  /// A single line may close several indentation levels; the extra DEDENTs
  /// are handed out one per call.
  pending_dedents: u32,
  at_line_start: bool,
}

impl<'src> Lexer<'src> {
  pub fn new(src: &'src str) -> Self {
    Lexer {
      src,
      pos: 0,
      line: 1,
      column: 1,
      indent: vec![0],
      pending_dedents: 0,
      at_line_start: true,
    }
  }

  pub fn next_token(&mut self) -> Token<'src> {
    if self.pending_dedents > 0 {
      self.pending_dedents -= 1;
      return self.synthetic(TokenKind::Tok_Dedent);
    }

    if self.at_line_start {
      if let Some(token) = self.handle_indent() {
        return token;
      }
    }

    self.skip_whitespace();

    let line = self.line;
    let column = self.column;
    let start = self.pos;

    let Some(byte) = self.peek() else {
      // End of input: unwind the indent stack one level per call, so the
      // parser sees every closing dedent before eof.
      if self.indent.len() > 1 {
        self.indent.pop();
        return self.synthetic(TokenKind::Tok_Dedent);
      }
      return self.synthetic(TokenKind::Tok_Eof);
    };

    match byte {
      b'0'..=b'9' => self.number(start, line, column),
      b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.ident(start, line, column),
      b'"' | b'\'' => self.string(start, line, column),
      _ => self.operator(start, line, column),
    }
  }

  /// Compare the leading whitespace of the line against the indent stack and
  /// emit an INDENT/DEDENT if the width changed. Returns `None` when the
  /// width is unchanged or the line is blank.
  fn handle_indent(&mut self) -> Option<Token<'src>> {
    let bytes = self.src.as_bytes();
    let mut i = self.pos;
    let mut width = 0u32;
    while let Some(&byte) = bytes.get(i) {
      match byte {
        b' ' => width += 1,
        b'\t' => width += TAB_WIDTH,
        _ => break,
      }
      i += 1;
    }

    // Blank lines do not affect indentation.
    if bytes.get(i).map_or(true, |&byte| byte == b'\n') {
      return None;
    }

    let current = self.indent.last().copied().unwrap_or(0);
    if width > current {
      self.consume_indent();
      self.indent.push(width);
      Some(self.synthetic(TokenKind::Tok_Indent))
    } else if width < current {
      self.consume_indent();
      let mut popped = 0u32;
      while self.indent.len() > 1 && self.indent.last().copied().unwrap_or(0) > width {
        self.indent.pop();
        popped += 1;
      }
      self.pending_dedents = popped.saturating_sub(1);
      Some(self.synthetic(TokenKind::Tok_Dedent))
    } else {
      self.consume_indent();
      None
    }
  }

  fn number(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
    let mut has_dot = false;
    while let Some(byte) = self.peek() {
      match byte {
        b'0'..=b'9' => {
          self.bump();
        }
        b'.' if !has_dot => {
          has_dot = true;
          self.bump();
        }
        _ => break,
      }
    }

    let lexeme = &self.src[start..self.pos];
    Token {
      kind: TokenKind::Lit_Number,
      lexeme: Cow::borrowed(lexeme),
      number: lexeme.parse().ok(),
      span: (start..self.pos).into(),
      line,
      column,
    }
  }

  fn ident(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
    while matches!(
      self.peek(),
      Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')
    ) {
      self.bump();
    }

    let lexeme = &self.src[start..self.pos];
    let kind = match lexeme {
      "if" => TokenKind::Kw_If,
      "else" => TokenKind::Kw_Else,
      "while" => TokenKind::Kw_While,
      "def" => TokenKind::Kw_Def,
      "return" => TokenKind::Kw_Return,
      "print" => TokenKind::Kw_Print,
      _ => TokenKind::Lit_Ident,
    };

    Token {
      kind,
      lexeme: Cow::borrowed(lexeme),
      number: None,
      span: (start..self.pos).into(),
      line,
      column,
    }
  }

  /// Read a string literal. The stored lexeme is the decoded content,
  /// without the quotes. A string missing its closing quote simply ends at
  /// end of input.
  fn string(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
    let Some(quote) = self.bump() else {
      return self.synthetic(TokenKind::Tok_Eof);
    };

    let content_start = self.pos;
    // Allocates only when an escape forces decoding.
    let mut decoded: Option<Vec<u8>> = None;

    loop {
      let Some(byte) = self.peek() else { break };
      if byte == quote {
        break;
      }
      if byte == b'\\' {
        if decoded.is_none() {
          decoded = Some(self.src.as_bytes()[content_start..self.pos].to_vec());
        }
        self.bump();
        let Some(escaped) = self.bump() else { break };
        let out = match escaped {
          b'n' => b'\n',
          b't' => b'\t',
          b'r' => b'\r',
          // `\\`, `\"`, `\'` and any unknown escape decode to the escaped
          // byte itself.
          other => other,
        };
        if let Some(decoded) = &mut decoded {
          decoded.push(out);
        }
      } else {
        self.bump();
        if let Some(decoded) = &mut decoded {
          decoded.push(byte);
        }
      }
    }

    let content_end = self.pos;
    if self.peek() == Some(quote) {
      self.bump();
    }

    let lexeme = match decoded {
      Some(bytes) => Cow::owned(String::from_utf8_lossy(&bytes).into_owned()),
      None => Cow::borrowed(&self.src[content_start..content_end]),
    };

    Token {
      kind: TokenKind::Lit_String,
      lexeme,
      number: None,
      span: (start..self.pos).into(),
      line,
      column,
    }
  }

  fn operator(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
    let Some(byte) = self.bump() else {
      return self.synthetic(TokenKind::Tok_Eof);
    };

    use TokenKind::*;
    let kind = match byte {
      b'+' => Op_Plus,
      b'-' => Op_Minus,
      b'*' => Op_Star,
      b'/' => Op_Slash,
      b'(' => Brk_ParenL,
      b')' => Brk_ParenR,
      b'[' => Brk_SquareL,
      b']' => Brk_SquareR,
      b',' => Tok_Comma,
      b':' => Tok_Colon,
      b'\n' => Tok_Newline,
      b'=' => {
        if self.eat(b'=') {
          Op_EqualEqual
        } else {
          Op_Equal
        }
      }
      b'!' => {
        if self.eat(b'=') {
          Op_BangEqual
        } else {
          Tok_Error
        }
      }
      b'<' => {
        if self.eat(b'=') {
          Op_LessEqual
        } else {
          Op_Less
        }
      }
      b'>' => {
        if self.eat(b'=') {
          Op_MoreEqual
        } else {
          Op_More
        }
      }
      _ => Tok_Error,
    };

    let lexeme = match kind {
      Tok_Newline => Cow::borrowed("\\n"),
      // `get` fails when the error byte is in the middle of a multi-byte
      // character; fall back to a lossy copy for the diagnostic.
      _ => match self.src.get(start..self.pos) {
        Some(lexeme) => Cow::borrowed(lexeme),
        None => Cow::owned(
          String::from_utf8_lossy(&self.src.as_bytes()[start..self.pos]).into_owned(),
        ),
      },
    };

    Token {
      kind,
      lexeme,
      number: None,
      span: (start..self.pos).into(),
      line,
      column,
    }
  }

  fn synthetic(&self, kind: TokenKind) -> Token<'src> {
    Token {
      kind,
      lexeme: Cow::borrowed(kind.name()),
      number: None,
      span: (self.pos..self.pos).into(),
      line: self.line,
      column: 1,
    }
  }

  #[inline]
  fn peek(&self) -> Option<u8> {
    self.src.as_bytes().get(self.pos).copied()
  }

  fn bump(&mut self) -> Option<u8> {
    let byte = self.peek()?;
    self.pos += 1;
    if byte == b'\n' {
      self.line += 1;
      self.column = 1;
      self.at_line_start = true;
    } else {
      self.column += 1;
      if byte != b' ' && byte != b'\t' {
        self.at_line_start = false;
      }
    }
    Some(byte)
  }

  #[inline]
  fn eat(&mut self, byte: u8) -> bool {
    if self.peek() == Some(byte) {
      self.bump();
      true
    } else {
      false
    }
  }

  /// Consume the leading whitespace of a line once its width has been
  /// measured.
  fn consume_indent(&mut self) {
    while matches!(self.peek(), Some(b' ' | b'\t')) {
      self.bump();
    }
    self.at_line_start = false;
  }

  fn skip_whitespace(&mut self) {
    while matches!(self.peek(), Some(b' ' | b'\t')) {
      self.bump();
    }
  }
}
