use beef::lean::Cow;
use span::{Span, Spanned};

pub type Ident<'src> = Spanned<Cow<'src, str>>;

#[derive(Debug)]
pub struct Module<'src> {
  pub body: Vec<Stmt<'src>>,
}

impl<'src> Module<'src> {
  pub fn new() -> Self {
    Self { body: vec![] }
  }
}

impl<'src> Default for Module<'src> {
  fn default() -> Self {
    Self::new()
  }
}

pub type Stmt<'src> = Spanned<StmtKind<'src>>;

#[derive(Debug)]
pub enum StmtKind<'src> {
  Assign(Box<Assign<'src>>),
  If(Box<If<'src>>),
  While(Box<While<'src>>),
  Func(Box<Func<'src>>),
  Return(Box<Return<'src>>),
  Print(Box<Print<'src>>),
  Expr(Box<Expr<'src>>),
}

#[derive(Debug)]
pub struct Assign<'src> {
  pub name: Ident<'src>,
  pub value: Expr<'src>,
}

#[derive(Debug)]
pub struct If<'src> {
  pub cond: Expr<'src>,
  pub then_body: Vec<Stmt<'src>>,
  pub else_body: Option<Vec<Stmt<'src>>>,
}

#[derive(Debug)]
pub struct While<'src> {
  pub cond: Expr<'src>,
  pub body: Vec<Stmt<'src>>,
}

#[derive(Debug)]
pub struct Func<'src> {
  pub name: Ident<'src>,
  pub params: Vec<Ident<'src>>,
  pub body: Vec<Stmt<'src>>,
}

#[derive(Debug)]
pub struct Return<'src> {
  pub value: Option<Expr<'src>>,
}

#[derive(Debug)]
pub struct Print<'src> {
  pub value: Expr<'src>,
}

pub type Expr<'src> = Spanned<ExprKind<'src>>;

#[derive(Debug)]
pub enum ExprKind<'src> {
  Literal(Box<Literal<'src>>),
  Binary(Box<Binary<'src>>),
  Unary(Box<Unary<'src>>),
  GetVar(Box<GetVar<'src>>),
  Call(Box<Call<'src>>),
}

#[derive(Debug)]
pub enum Literal<'src> {
  Number(f64),
  Str(Cow<'src, str>),
}

#[derive(Debug)]
pub struct Binary<'src> {
  pub op: BinaryOp,
  pub left: Expr<'src>,
  pub right: Expr<'src>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Eq,
  Neq,
  Less,
  More,
  LessEq,
  MoreEq,
}

#[derive(Debug)]
pub struct Unary<'src> {
  pub op: UnaryOp,
  pub operand: Expr<'src>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
  Plus,
  Minus,
}

#[derive(Debug)]
pub struct GetVar<'src> {
  pub name: Ident<'src>,
}

#[derive(Debug)]
pub struct Call<'src> {
  pub callee: Ident<'src>,
  pub args: Vec<Expr<'src>>,
}

pub fn assign_stmt<'src>(name: Ident<'src>, value: Expr<'src>) -> Stmt<'src> {
  Stmt::new(
    name.span.start..value.span.end,
    StmtKind::Assign(Box::new(Assign { name, value })),
  )
}

pub fn if_stmt<'src>(
  s: impl Into<Span>,
  cond: Expr<'src>,
  then_body: Vec<Stmt<'src>>,
  else_body: Option<Vec<Stmt<'src>>>,
) -> Stmt<'src> {
  Stmt::new(
    s,
    StmtKind::If(Box::new(If {
      cond,
      then_body,
      else_body,
    })),
  )
}

pub fn while_stmt<'src>(s: impl Into<Span>, cond: Expr<'src>, body: Vec<Stmt<'src>>) -> Stmt<'src> {
  Stmt::new(s, StmtKind::While(Box::new(While { cond, body })))
}

pub fn func_stmt<'src>(
  s: impl Into<Span>,
  name: Ident<'src>,
  params: Vec<Ident<'src>>,
  body: Vec<Stmt<'src>>,
) -> Stmt<'src> {
  Stmt::new(s, StmtKind::Func(Box::new(Func { name, params, body })))
}

pub fn return_stmt<'src>(s: impl Into<Span>, value: Option<Expr<'src>>) -> Stmt<'src> {
  Stmt::new(s, StmtKind::Return(Box::new(Return { value })))
}

pub fn print_stmt<'src>(s: impl Into<Span>, value: Expr<'src>) -> Stmt<'src> {
  Stmt::new(s, StmtKind::Print(Box::new(Print { value })))
}

pub fn expr_stmt(expr: Expr) -> Stmt {
  Stmt::new(expr.span, StmtKind::Expr(Box::new(expr)))
}

pub fn expr_binary<'src>(
  s: impl Into<Span>,
  op: BinaryOp,
  left: Expr<'src>,
  right: Expr<'src>,
) -> Expr<'src> {
  Expr::new(s, ExprKind::Binary(Box::new(Binary { op, left, right })))
}

pub fn expr_unary(s: impl Into<Span>, op: UnaryOp, operand: Expr) -> Expr {
  Expr::new(s, ExprKind::Unary(Box::new(Unary { op, operand })))
}

pub fn expr_get_var(name: Ident) -> Expr {
  Expr::new(name.span, ExprKind::GetVar(Box::new(GetVar { name })))
}

pub fn expr_call<'src>(s: impl Into<Span>, callee: Ident<'src>, args: Vec<Expr<'src>>) -> Expr<'src> {
  Expr::new(s, ExprKind::Call(Box::new(Call { callee, args })))
}

pub mod lit {
  use super::*;

  pub fn num<'src>(s: impl Into<Span>, value: f64) -> Expr<'src> {
    Expr::new(s, ExprKind::Literal(Box::new(Literal::Number(value))))
  }

  pub fn str<'src>(s: impl Into<Span>, value: Cow<'src, str>) -> Expr<'src> {
    Expr::new(s, ExprKind::Literal(Box::new(Literal::Str(value))))
  }
}
