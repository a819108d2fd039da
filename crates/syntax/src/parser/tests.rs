use indoc::indoc;
use span::LineMap;

use super::*;
use crate::ast::{Binary, BinaryOp, ExprKind, Literal, StmtKind, UnaryOp};
use crate::lexer::lex;

fn parse_ok(src: &str) -> ast::Module<'_> {
  let tokens = lex(src).expect("lexing failed");
  let (module, errors) = parse(&tokens);
  if !errors.is_empty() {
    let source = diag::Source::string(src);
    let mut out = String::new();
    for e in &errors {
      let report = diag::Report::error(e.message.to_string(), e.span).color(false);
      out.push_str(&report.emit_to_string(&source).unwrap());
    }
    panic!("failed to parse source, see errors below:\n{out}");
  }
  module
}

fn parse_err(src: &str) -> (ast::Module<'_>, Vec<Error>) {
  let tokens = lex(src).expect("lexing failed");
  let (module, errors) = parse(&tokens);
  assert!(!errors.is_empty(), "expected parse errors, got none");
  (module, errors)
}

fn as_binary<'a, 'src>(expr: &'a ast::Expr<'src>) -> &'a Binary<'src> {
  match &**expr {
    ExprKind::Binary(binary) => binary,
    kind => panic!("expected a binary expression, got {kind:?}"),
  }
}

fn as_number(expr: &ast::Expr<'_>) -> f64 {
  match &**expr {
    ExprKind::Literal(lit) => match &**lit {
      Literal::Number(value) => *value,
      lit => panic!("expected a number literal, got {lit:?}"),
    },
    kind => panic!("expected a literal, got {kind:?}"),
  }
}

fn as_var<'a>(expr: &'a ast::Expr<'_>) -> &'a str {
  match &**expr {
    ExprKind::GetVar(var) => var.name.as_ref(),
    kind => panic!("expected a variable, got {kind:?}"),
  }
}

#[test]
fn assignment() {
  let module = parse_ok("x = 1\n");
  assert_eq!(module.body.len(), 1);
  match &*module.body[0] {
    StmtKind::Assign(assign) => {
      assert_eq!(assign.name.as_ref(), "x");
      assert_eq!(as_number(&assign.value), 1.0);
    }
    stmt => panic!("expected an assignment, got {stmt:?}"),
  }
}

#[test]
fn bare_identifier_is_an_expression_statement() {
  let module = parse_ok("x\n");
  match &*module.body[0] {
    StmtKind::Expr(expr) => assert_eq!(as_var(expr), "x"),
    stmt => panic!("expected an expression statement, got {stmt:?}"),
  }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
  let module = parse_ok("result = x + y * 2\n");
  let StmtKind::Assign(assign) = &*module.body[0] else {
    panic!("expected an assignment")
  };
  let sum = as_binary(&assign.value);
  assert_eq!(sum.op, BinaryOp::Add);
  assert_eq!(as_var(&sum.left), "x");
  let product = as_binary(&sum.right);
  assert_eq!(product.op, BinaryOp::Mul);
  assert_eq!(as_var(&product.left), "y");
  assert_eq!(as_number(&product.right), 2.0);
}

#[test]
fn binary_operators_are_left_associative() {
  let module = parse_ok("a - b - c\n");
  let StmtKind::Expr(expr) = &*module.body[0] else {
    panic!("expected an expression statement")
  };
  let outer = as_binary(expr);
  assert_eq!(outer.op, BinaryOp::Sub);
  assert_eq!(as_var(&outer.right), "c");
  let inner = as_binary(&outer.left);
  assert_eq!(inner.op, BinaryOp::Sub);
  assert_eq!(as_var(&inner.left), "a");
  assert_eq!(as_var(&inner.right), "b");
}

#[test]
fn comparison_operators_chain_left() {
  let module = parse_ok("a < b <= c\n");
  let StmtKind::Expr(expr) = &*module.body[0] else {
    panic!("expected an expression statement")
  };
  let outer = as_binary(expr);
  assert_eq!(outer.op, BinaryOp::LessEq);
  let inner = as_binary(&outer.left);
  assert_eq!(inner.op, BinaryOp::Less);
}

#[test]
fn parentheses_group() {
  let module = parse_ok("(a + b) * c\n");
  let StmtKind::Expr(expr) = &*module.body[0] else {
    panic!("expected an expression statement")
  };
  let product = as_binary(expr);
  assert_eq!(product.op, BinaryOp::Mul);
  assert_eq!(as_binary(&product.left).op, BinaryOp::Add);
  assert_eq!(as_var(&product.right), "c");
}

#[test]
fn unary_is_right_associative() {
  let module = parse_ok("x = - - 1\n");
  let StmtKind::Assign(assign) = &*module.body[0] else {
    panic!("expected an assignment")
  };
  let ExprKind::Unary(outer) = &*assign.value else {
    panic!("expected a unary expression")
  };
  assert_eq!(outer.op, UnaryOp::Minus);
  let ExprKind::Unary(inner) = &*outer.operand else {
    panic!("expected a nested unary expression")
  };
  assert_eq!(inner.op, UnaryOp::Minus);
  assert_eq!(as_number(&inner.operand), 1.0);
}

#[test]
fn if_with_else() {
  let src = indoc! {"
    if x > 0:
        print(x)
    else:
        print(0)
  "};
  let module = parse_ok(src);
  assert_eq!(module.body.len(), 1);
  let StmtKind::If(stmt) = &*module.body[0] else {
    panic!("expected an if statement")
  };
  assert_eq!(stmt.then_body.len(), 1);
  assert_eq!(stmt.else_body.as_ref().map(Vec::len), Some(1));
}

#[test]
fn if_without_indented_body_is_empty() {
  let src = indoc! {"
    if x:
    y
  "};
  let module = parse_ok(src);
  assert_eq!(module.body.len(), 2);
  let StmtKind::If(stmt) = &*module.body[0] else {
    panic!("expected an if statement")
  };
  assert!(stmt.then_body.is_empty());
  assert!(stmt.else_body.is_none());
}

#[test]
fn while_loop() {
  let src = indoc! {"
    while count < 3:
        print(count)
        count = count + 1
  "};
  let module = parse_ok(src);
  let StmtKind::While(stmt) = &*module.body[0] else {
    panic!("expected a while statement")
  };
  assert_eq!(as_binary(&stmt.cond).op, BinaryOp::Less);
  assert_eq!(stmt.body.len(), 2);
}

#[test]
fn function_definition() {
  let src = indoc! {"
    def add(a, b):
        return a + b
  "};
  let module = parse_ok(src);
  let StmtKind::Func(func) = &*module.body[0] else {
    panic!("expected a function definition")
  };
  assert_eq!(func.name.as_ref(), "add");
  let params: Vec<&str> = func.params.iter().map(|p| p.as_ref()).collect();
  assert_eq!(params, ["a", "b"]);
  assert_eq!(func.body.len(), 1);
  let StmtKind::Return(ret) = &*func.body[0] else {
    panic!("expected a return statement")
  };
  assert!(ret.value.is_some());
}

#[test]
fn bare_return_has_no_value() {
  let src = indoc! {"
    def f():
        return
  "};
  let module = parse_ok(src);
  let StmtKind::Func(func) = &*module.body[0] else {
    panic!("expected a function definition")
  };
  let StmtKind::Return(ret) = &*func.body[0] else {
    panic!("expected a return statement")
  };
  assert!(ret.value.is_none());
}

#[test]
fn call_arguments() {
  let module = parse_ok("f(1, g(2), \"s\")\n");
  let StmtKind::Expr(expr) = &*module.body[0] else {
    panic!("expected an expression statement")
  };
  let ExprKind::Call(call) = &***expr else {
    panic!("expected a call")
  };
  assert_eq!(call.callee.as_ref(), "f");
  assert_eq!(call.args.len(), 3);
  let ExprKind::Call(inner) = &*call.args[1] else {
    panic!("expected a nested call")
  };
  assert_eq!(inner.callee.as_ref(), "g");
  assert_eq!(inner.args.len(), 1);
}

#[test]
fn print_without_parentheses_is_tolerated() {
  let module = parse_ok("print x\n");
  assert!(matches!(&*module.body[0], StmtKind::Print(_)));
}

#[test]
fn missing_closing_paren_is_tolerated() {
  let module = parse_ok("print(x\n");
  assert!(matches!(&*module.body[0], StmtKind::Print(_)));
}

#[test]
fn node_lines_match_their_first_token() {
  let src = indoc! {"
    x = 1
    if y:
        z = 2
  "};
  let module = parse_ok(src);
  let lines = LineMap::new(src);
  assert_eq!(lines.line(module.body[0].span.start), 1);
  assert_eq!(lines.line(module.body[1].span.start), 2);
  let StmtKind::If(stmt) = &*module.body[1] else {
    panic!("expected an if statement")
  };
  assert_eq!(lines.line(stmt.then_body[0].span.start), 3);
}

#[test]
fn dangling_operator_is_reported() {
  let (module, errors) = parse_err("1 +\n");
  assert!(module.body.is_empty());
  assert_eq!(errors.len(), 1);
}

#[test]
fn stray_else_is_reported() {
  let (module, errors) = parse_err("else:\n");
  assert!(module.body.is_empty());
  assert_eq!(errors.len(), 2); // `else`, then the orphaned `:`
  assert_eq!(errors[0].message.as_ref(), "unexpected token 'else'");
}

#[test]
fn module_root_survives_errors() {
  let src = indoc! {"
    x = 1
    )
    y = 2
  "};
  let (module, errors) = parse_err(src);
  assert_eq!(errors.len(), 1);
  assert_eq!(module.body.len(), 2);
}

#[test]
fn recursive_function_parses() {
  let src = indoc! {"
    def factorial(n):
        if n <= 1:
            return 1
        else:
            return n * factorial(n - 1)

    print(factorial(5))
  "};
  let module = parse_ok(src);
  assert_eq!(module.body.len(), 2);
}
