use skink::{Error, Skink};

fn run(src: &str) -> String {
  let mut vm = Skink::with_output(Vec::new());
  vm.eval(src).expect("failed to evaluate input");
  String::from_utf8(vm.into_output()).expect("output was not utf-8")
}

#[test]
fn arithmetic_with_precedence() {
  let output = run("x = 10\ny = 20\nresult = x + y * 2\nprint(result)\n");
  assert_eq!(output, "50\n");
}

#[test]
fn conditional() {
  let output = run("age = 18\nif age >= 18:\n    print(\"Adult\")\n");
  assert_eq!(output, "Adult\n");
}

#[test]
fn while_loop() {
  let output = run("count = 0\nwhile count < 3:\n    print(count)\n    count = count + 1\n");
  assert_eq!(output, "0\n1\n2\n");
}

#[test]
fn function_call() {
  let output = run("def square(x):\n    return x * x\n\nresult = square(5)\nprint(result)\n");
  assert_eq!(output, "25\n");
}

#[test]
fn recursive_function() {
  let output = run(
    "def factorial(n):\n    if n <= 1:\n        return 1\n    else:\n        return n * factorial(n - 1)\n\nprint(factorial(5))\n",
  );
  assert_eq!(output, "120\n");
}

#[test]
fn diagnostics_interleave_with_program_output() {
  let output = run("print(\"a\" + \"b\")\nprint(1 / 0)\n");
  assert_eq!(output, "ab\nRuntime error: Division by zero at line 2\n0\n");
}

#[test]
fn invalid_tokens_abort_compilation() {
  let src = "x = 1\nprint(x) @\n";
  let mut vm = Skink::with_output(Vec::new());
  let err = vm.eval(src).expect_err("expected a lex error");

  let Error::Lex(errors) = &err else {
    panic!("expected Error::Lex, got {err:?}")
  };
  assert_eq!(errors.len(), 1);

  // Nothing runs when the scan fails.
  assert!(vm.output().is_empty());

  let report = err.report(src, false);
  assert!(report.contains("invalid token `@`"), "report was: {report}");
  assert!(report.contains("print(x) @"), "report was: {report}");
}

#[test]
fn debug_dump_lists_tokens_and_tree() {
  let mut vm = Skink::with_output(Vec::new()).debug(true);
  vm.eval("x = 1\nprint(x)\n").expect("failed to evaluate input");
  let output = String::from_utf8(vm.into_output()).expect("output was not utf-8");

  // One `Line N: <lexeme> (<kind index>)` entry per token.
  assert!(output.contains("Line 1: x (2)"), "output was: {output}");
  assert!(output.contains("Line 2: print (25)"), "output was: {output}");
  // Followed by the tree dump.
  assert!(output.contains("Assign"), "output was: {output}");
  assert!(output.contains("Print"), "output was: {output}");
}

#[test]
fn pure_expressions_are_referentially_transparent() {
  let first = run("x = 2\nprint(x * x + 1)\nprint(x * x + 1)\n");
  assert_eq!(first, "5\n5\n");
}
