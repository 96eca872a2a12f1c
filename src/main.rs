use bares::eval::evaluate;
use bares::parsing::expr_tokenizer::ExprTokenizer;
use bares::parsing::shunting_yard::to_postfix;
use bares::report;

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

/// Evaluates integer arithmetic expressions, one per line. Results
/// and diagnostics are written to standard output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Read expressions from this file instead of standard input.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Print the token list of every expression that parses.
  #[arg(short, long)]
  tokens: bool,

  /// Print the postfix form of every expression that parses.
  #[arg(short, long)]
  postfix: bool,
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let args = Args::parse();

  let mut reader: Box<dyn BufRead> = match &args.input {
    Some(path) => {
      let file = File::open(path)
        .with_context(|| format!("Failed to open input file '{}'", path.display()))?;
      Box::new(BufReader::new(file))
    }
    None => Box::new(io::stdin().lock()),
  };

  let stdout = io::stdout();
  let mut out = stdout.lock();
  let mut tokenizer = ExprTokenizer::new();
  let mut count = 0usize;
  let mut line = Vec::new();
  loop {
    line.clear();
    if reader.read_until(b'\n', &mut line).context("Failed to read expression")? == 0 {
      break;
    }
    count += 1;
    let expression = decode_line(&line);
    if matches!(expression, Cow::Owned(_)) {
      warn!("line {} is not valid UTF-8", count);
    }
    run_expression(&mut tokenizer, &expression, &args, &mut out)?;
  }
  info!("evaluated {} expression(s)", count);
  Ok(())
}

/// The text of one input line, without its line terminator. Invalid
/// UTF-8 is replaced rather than rejected, so that the line still
/// gets a diagnostic and later lines are still read.
fn decode_line(line: &[u8]) -> Cow<'_, str> {
  let line = line.strip_suffix(b"\n").unwrap_or(line);
  let line = line.strip_suffix(b"\r").unwrap_or(line);
  String::from_utf8_lossy(line)
}

fn run_expression(
  tokenizer: &mut ExprTokenizer,
  expression: &str,
  args: &Args,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  debug!("parsing {:?}", expression);
  if let Err(err) = tokenizer.parse(expression) {
    writeln!(out, "{}", report::render_syntax_error(expression, &err))?;
    return Ok(());
  }

  let tokens = tokenizer.tokens();
  if args.tokens {
    writeln!(out, ">>> Tokens: {}", report::render_tokens(tokens))?;
  }
  if args.postfix {
    match to_postfix(tokens) {
      Ok(postfix) => writeln!(out, ">>> Postfix: {}", report::render_postfix(&postfix))?,
      Err(err) => writeln!(out, "{}", report::render_evaluation_error(&err))?,
    }
  }
  match evaluate(tokens) {
    Ok(value) => writeln!(out, "{}", value)?,
    Err(err) => writeln!(out, "{}", report::render_evaluation_error(&err))?,
  }
  Ok(())
}
