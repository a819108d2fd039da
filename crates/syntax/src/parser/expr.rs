use super::*;

impl<'t, 'src> Parser<'t, 'src> {
  pub(super) fn expr(&mut self) -> Result<ast::Expr<'src>> {
    self.comparison()
  }

  fn comparison(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.arithmetic()?;
    loop {
      let op = match self.current().kind {
        Op_EqualEqual => ast::BinaryOp::Eq,
        Op_BangEqual => ast::BinaryOp::Neq,
        Op_Less => ast::BinaryOp::Less,
        Op_More => ast::BinaryOp::More,
        Op_LessEqual => ast::BinaryOp::LessEq,
        Op_MoreEqual => ast::BinaryOp::MoreEq,
        _ => break,
      };
      self.advance(); // bump operator
      let right = self.arithmetic()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn arithmetic(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.term()?;
    loop {
      let op = match self.current().kind {
        Op_Plus => ast::BinaryOp::Add,
        Op_Minus => ast::BinaryOp::Sub,
        _ => break,
      };
      self.advance(); // bump operator
      let right = self.term()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn term(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.unary()?;
    loop {
      let op = match self.current().kind {
        Op_Star => ast::BinaryOp::Mul,
        Op_Slash => ast::BinaryOp::Div,
        _ => break,
      };
      self.advance(); // bump operator
      let right = self.unary()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn unary(&mut self) -> Result<ast::Expr<'src>> {
    let op = match self.current().kind {
      Op_Minus => ast::UnaryOp::Minus,
      Op_Plus => ast::UnaryOp::Plus,
      _ => return self.primary(),
    };
    self.advance(); // bump operator
    let start = self.previous().span.start;
    let operand = self.unary()?;
    Ok(ast::expr_unary(start..operand.span.end, op, operand))
  }

  fn primary(&mut self) -> Result<ast::Expr<'src>> {
    check_recursion_limit(self.current().span)?;

    match self.current().kind {
      // Block structure has no business inside an expression.
      Kw_Else | Tok_Colon | Tok_Dedent | Tok_Eof => Err(self.unexpected()),
      Lit_Number => {
        let token = self.advance();
        Ok(ast::lit::num(token.span, token.number.unwrap_or_default()))
      }
      Lit_String => {
        let token = self.advance();
        Ok(ast::lit::str(token.span, token.lexeme.clone()))
      }
      Lit_Ident => self.call_or_ident(),
      Brk_ParenL => {
        self.advance(); // bump `(`
        let expr = self.expr()?;
        self.bump_if(Brk_ParenR);
        Ok(expr)
      }
      _ => Err(self.unexpected()),
    }
  }

  fn call_or_ident(&mut self) -> Result<ast::Expr<'src>> {
    let name = self.ident()?;

    if !self.current().is(Brk_ParenL) {
      return Ok(ast::expr_get_var(name));
    }
    self.advance(); // bump `(`

    let mut args = Vec::new();
    if !self.current().is(Brk_ParenR) {
      loop {
        args.push(self.expr()?);
        if !self.bump_if(Tok_Comma) {
          break;
        }
      }
    }
    self.bump_if(Brk_ParenR);

    let end = self.previous().span.end;
    Ok(ast::expr_call(name.span.start..end, name, args))
  }
}
