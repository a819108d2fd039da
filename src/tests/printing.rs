check! {
  integral_numbers_print_without_a_fraction,
  r#"
    print(3)
    print(100.0)
    print(0 - 4)
  "#,
  r#"
    3
    100
    -4
  "#
}

check! {
  fractional_numbers_keep_their_fraction,
  r#"
    print(2.5)
    print(0 - 0.25)
  "#,
  r#"
    2.5
    -0.25
  "#
}

check! {
  strings_print_verbatim,
  r#"
    print("hello")
    print('single quotes')
  "#,
  r#"
    hello
    single quotes
  "#
}

check! {
  escapes_decode_inside_strings,
  "print(\"a\\tb\")\n",
  "a\tb\n"
}

check! {
  empty_string_prints_an_empty_line,
  r#"
    print("")
    print("end")
  "#,
  r#"

    end
  "#
}

check! {
  print_accepts_any_expression,
  r#"
    x = 4
    print(x * x + 1)
  "#,
  "17\n"
}
