use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use indoc::indoc;
use skink::Skink;

/// A small indentation-based scripting language.
#[derive(Debug, Parser)]
#[clap(name = "skink", version)]
struct App {
  /// Run FILE with a token listing and syntax tree dump.
  #[arg(short = 'd', value_name = "FILE", conflicts_with = "file")]
  debug: Option<PathBuf>,

  /// The script to run. The built-in samples run when omitted.
  file: Option<PathBuf>,
}

fn main() -> ExitCode {
  let app = match App::try_parse() {
    Ok(app) => app,
    Err(e) => {
      // --help and --version print to stdout and succeed, anything else is
      // a usage error.
      let code = match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
      };
      let _ = e.print();
      return code;
    }
  };

  match run(app) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{e:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(app: App) -> anyhow::Result<()> {
  match (app.debug, app.file) {
    (Some(path), _) => run_file(&path, true),
    (None, Some(path)) => run_file(&path, false),
    (None, None) => run_samples(),
  }
}

fn run_file(path: &Path, debug: bool) -> anyhow::Result<()> {
  let source =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

  let mut vm = Skink::new().debug(debug);
  if let Err(e) = vm.eval(&source) {
    let color = supports_color::on(supports_color::Stream::Stderr)
      .map(|c| c.has_basic)
      .unwrap_or(false);
    eprint!("{}", e.report(&source, color));
    anyhow::bail!("failed to run {}", path.display());
  }

  Ok(())
}

fn run_samples() -> anyhow::Result<()> {
  for (name, source) in SAMPLES {
    println!("== {name}");
    let mut vm = Skink::new();
    if let Err(e) = vm.eval(source) {
      eprint!("{}", e.report(source, false));
    }
  }
  Ok(())
}

const SAMPLES: &[(&str, &str)] = &[
  (
    "arithmetic",
    indoc! {r#"
      x = 10
      y = 20
      result = x + y * 2
      print(result)
    "#},
  ),
  (
    "conditional",
    indoc! {r#"
      age = 18
      if age >= 18:
          print("Adult")
    "#},
  ),
  (
    "while loop",
    indoc! {r#"
      count = 0
      while count < 3:
          print(count)
          count = count + 1
    "#},
  ),
  (
    "functions",
    indoc! {r#"
      def square(x):
          return x * x

      result = square(5)
      print(result)
    "#},
  ),
  (
    "recursion",
    indoc! {r#"
      def factorial(n):
          if n <= 1:
              return 1
          else:
              return n * factorial(n - 1)

      print(factorial(5))
    "#},
  ),
  (
    "diagnostics",
    indoc! {r#"
      print("a" + "b")
      print(1 / 0)
    "#},
  ),
];
