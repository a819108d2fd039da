use super::*;

impl<'t, 'src> Parser<'t, 'src> {
  pub(super) fn stmt(&mut self) -> Result<ast::Stmt<'src>> {
    check_recursion_limit(self.current().span)?;
    match self.current().kind {
      Kw_If => self.if_stmt(),
      Kw_While => self.while_stmt(),
      Kw_Def => self.func_stmt(),
      Kw_Return => self.return_stmt(),
      Kw_Print => self.print_stmt(),
      // One token of lookahead decides between `x = ...` and an expression
      // statement starting with an identifier.
      Lit_Ident if self.peek().is(Op_Equal) => self.assign_stmt(),
      // Block structure leaking into statement position.
      Kw_Else | Tok_Colon | Tok_Dedent => Err(self.unexpected()),
      _ => self.expr_stmt(),
    }
  }

  fn if_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_If)?;
    let start = self.previous().span.start;

    let cond = self.expr()?;
    self.bump_if(Tok_Colon);
    self.skip_newlines();
    let then_body = self.block();

    self.skip_newlines();
    let else_body = if self.bump_if(Kw_Else) {
      self.bump_if(Tok_Colon);
      self.skip_newlines();
      Some(self.block())
    } else {
      None
    };

    let end = self.previous().span.end;
    Ok(ast::if_stmt(start..end, cond, then_body, else_body))
  }

  fn while_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_While)?;
    let start = self.previous().span.start;

    let cond = self.expr()?;
    self.bump_if(Tok_Colon);
    self.skip_newlines();
    let body = self.block();

    let end = self.previous().span.end;
    Ok(ast::while_stmt(start..end, cond, body))
  }

  fn func_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_Def)?;
    let start = self.previous().span.start;

    if !self.current().is(Lit_Ident) {
      return Err(Error::new("expected function name", self.current().span));
    }
    let name = self.ident()?;

    self.bump_if(Brk_ParenL);
    let mut params = Vec::new();
    if !self.current().is(Brk_ParenR) {
      loop {
        if self.current().is(Lit_Ident) {
          params.push(self.ident()?);
        }
        if !self.bump_if(Tok_Comma) {
          break;
        }
      }
    }
    self.bump_if(Brk_ParenR);

    self.bump_if(Tok_Colon);
    self.skip_newlines();
    let body = self.block();

    let end = self.previous().span.end;
    Ok(ast::func_stmt(start..end, name, params, body))
  }

  fn return_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_Return)?;
    let start = self.previous().span.start;

    let value = if !self.current().is(Tok_Newline) && !self.current().is(Tok_Eof) {
      Some(self.expr()?)
    } else {
      None
    };

    let end = self.previous().span.end;
    Ok(ast::return_stmt(start..end, value))
  }

  fn print_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_Print)?;
    let start = self.previous().span.start;

    self.bump_if(Brk_ParenL);
    let value = self.expr()?;
    self.bump_if(Brk_ParenR);

    let end = self.previous().span.end;
    Ok(ast::print_stmt(start..end, value))
  }

  fn assign_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    let name = self.ident()?;
    self.bump_if(Op_Equal);
    let value = self.expr()?;
    Ok(ast::assign_stmt(name, value))
  }

  fn expr_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    let expr = self.expr()?;
    Ok(ast::expr_stmt(expr))
  }

  /// An indented block. A header without an INDENT after it produces an
  /// empty block rather than an error.
  pub(super) fn block(&mut self) -> Vec<ast::Stmt<'src>> {
    let mut body = Vec::new();

    if !self.bump_if(Tok_Indent) {
      return body;
    }

    while !self.current().is(Tok_Dedent) && !self.current().is(Tok_Eof) {
      self.skip_newlines();
      if self.current().is(Tok_Dedent) || self.current().is(Tok_Eof) {
        break;
      }
      match self.stmt() {
        Ok(stmt) => body.push(stmt),
        Err(e) => self.recover(e),
      }
    }
    self.bump_if(Tok_Dedent);

    body
  }
}
