use std::io::{self, Write};

use span::{LineMap, Span};
use syntax::ast;

use crate::scope::ScopeStack;
use crate::value::Value;

/// The tree-walking evaluator.
///
/// Runtime problems never abort a run: they are written to the output
/// writer as `Runtime error:` diagnostics and evaluation continues with a
/// placeholder value. The only hard failure is the writer itself.
pub struct Interp<'a, W> {
  out: &'a mut W,
  lines: &'a LineMap,
  scopes: ScopeStack<'a>,
  /// Return slot of the innermost active call. `Some` doubles as the
  /// "has returned" flag that halts the enclosing blocks.
  ret: Option<Value<'a>>,
}

impl<'a, W: Write> Interp<'a, W> {
  pub fn new(out: &'a mut W, lines: &'a LineMap) -> Self {
    Interp {
      out,
      lines,
      scopes: ScopeStack::new(),
      ret: None,
    }
  }

  pub fn run(&mut self, module: &'a ast::Module<'a>) -> io::Result<()> {
    for stmt in &module.body {
      if self.ret.is_some() {
        break;
      }
      self.stmt(stmt)?;
    }
    Ok(())
  }

  fn stmt(&mut self, stmt: &'a ast::Stmt<'a>) -> io::Result<()> {
    match &**stmt {
      ast::StmtKind::Assign(assign) => {
        let value = self.expr(&assign.value)?;
        self.scopes.define(&assign.name, value);
      }
      ast::StmtKind::If(stmt) => {
        let cond = self.expr(&stmt.cond)?;
        if cond.truthy() {
          self.block(&stmt.then_body)?;
        } else if let Some(else_body) = &stmt.else_body {
          self.block(else_body)?;
        }
      }
      ast::StmtKind::While(stmt) => loop {
        let cond = self.expr(&stmt.cond)?;
        if !cond.truthy() || self.ret.is_some() {
          break;
        }
        self.block(&stmt.body)?;
      },
      ast::StmtKind::Func(func) => {
        self.scopes.define(&func.name, Value::Func(&**func));
      }
      ast::StmtKind::Return(ret) => {
        let value = match &ret.value {
          Some(expr) => self.expr(expr)?,
          None => Value::None,
        };
        self.ret = Some(value);
      }
      ast::StmtKind::Print(print) => {
        let value = self.expr(&print.value)?;
        writeln!(self.out, "{value}")?;
      }
      ast::StmtKind::Expr(expr) => {
        self.expr(expr)?;
      }
    }
    Ok(())
  }

  fn block(&mut self, body: &'a [ast::Stmt<'a>]) -> io::Result<()> {
    for stmt in body {
      if self.ret.is_some() {
        break;
      }
      self.stmt(stmt)?;
    }
    Ok(())
  }

  fn expr(&mut self, expr: &'a ast::Expr<'a>) -> io::Result<Value<'a>> {
    match &**expr {
      ast::ExprKind::Literal(lit) => Ok(match &**lit {
        ast::Literal::Number(value) => Value::Number(*value),
        ast::Literal::Str(value) => Value::Str(value.clone()),
      }),
      ast::ExprKind::GetVar(var) => match self.scopes.lookup(&var.name) {
        Some(value) => Ok(value.clone()),
        None => {
          self.report(
            &format!("Undefined variable '{}'", var.name),
            expr.span,
          )?;
          Ok(Value::None)
        }
      },
      ast::ExprKind::Binary(binary) => self.binary(expr.span, binary),
      ast::ExprKind::Unary(unary) => self.unary(expr.span, unary),
      ast::ExprKind::Call(call) => self.call(expr.span, call),
    }
  }

  fn binary(&mut self, span: Span, binary: &'a ast::Binary<'a>) -> io::Result<Value<'a>> {
    use ast::BinaryOp::*;

    let left = self.expr(&binary.left)?;
    let right = self.expr(&binary.right)?;

    match (left, right) {
      (Value::Number(l), Value::Number(r)) => {
        let result = match binary.op {
          Add => l + r,
          Sub => l - r,
          Mul => l * r,
          Div => {
            if r == 0.0 {
              self.report("Division by zero", span)?;
              0.0
            } else {
              l / r
            }
          }
          Eq => flag(l == r),
          Neq => flag(l != r),
          Less => flag(l < r),
          More => flag(l > r),
          LessEq => flag(l <= r),
          MoreEq => flag(l >= r),
        };
        Ok(Value::Number(result))
      }
      (Value::Str(l), Value::Str(r)) if binary.op == Add => {
        let mut value = l.to_string();
        value.push_str(r.as_ref());
        Ok(Value::Str(beef::lean::Cow::owned(value)))
      }
      _ => {
        self.report("Type mismatch in binary operation", span)?;
        Ok(Value::None)
      }
    }
  }

  fn unary(&mut self, span: Span, unary: &'a ast::Unary<'a>) -> io::Result<Value<'a>> {
    let operand = self.expr(&unary.operand)?;
    match operand {
      Value::Number(n) => Ok(Value::Number(match unary.op {
        ast::UnaryOp::Minus => -n,
        ast::UnaryOp::Plus => n,
      })),
      _ => {
        self.report("Cannot apply unary operator to non-number", span)?;
        Ok(Value::None)
      }
    }
  }

  fn call(&mut self, span: Span, call: &'a ast::Call<'a>) -> io::Result<Value<'a>> {
    let func = match self.scopes.lookup(&call.callee) {
      Some(Value::Func(func)) => *func,
      _ => {
        self.report(&format!("Undefined function '{}'", call.callee), span)?;
        return Ok(Value::None);
      }
    };

    // The callee's scope chains to the scope the call was made from, and
    // arguments are evaluated one by one as parameters are bound, so an
    // already-bound parameter is visible while later arguments evaluate.
    self.scopes.push();
    for (i, param) in func.params.iter().enumerate() {
      if let Some(arg) = call.args.get(i) {
        let value = self.expr(arg)?;
        self.scopes.define(param, value);
      }
    }

    let saved = self.ret.take();
    self.block(&func.body)?;
    let result = self.ret.take().unwrap_or(Value::None);
    self.ret = saved;

    self.scopes.pop();
    Ok(result)
  }

  fn report(&mut self, message: &str, span: Span) -> io::Result<()> {
    writeln!(
      self.out,
      "Runtime error: {} at line {}",
      message,
      self.lines.line(span.start)
    )
  }
}

fn flag(condition: bool) -> f64 {
  if condition {
    1.0
  } else {
    0.0
  }
}
