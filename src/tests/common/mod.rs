/// Run a program and compare everything written to the output writer,
/// diagnostics included, against the expected text.
#[macro_export]
macro_rules! check {
  ($name:ident, $input:literal, $expected:literal) => {
    #[test]
    fn $name() {
      let input = indoc::indoc!($input);
      let expected = indoc::indoc!($expected);
      let mut vm = $crate::Skink::with_output(Vec::new());
      vm.eval(input).expect("failed to evaluate input");
      let output = String::from_utf8(vm.into_output()).expect("output was not utf-8");
      assert_eq!(output, expected);
    }
  };
}
