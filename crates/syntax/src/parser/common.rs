use super::*;

impl<'t, 'src> Parser<'t, 'src> {
  pub(super) fn ident(&mut self) -> Result<ast::Ident<'src>> {
    self.expect(Lit_Ident)?;
    let token = self.previous();
    Ok(Spanned::new(token.span, token.lexeme.clone()))
  }
}
