//! A basic arithmetic expression solver for 16-bit integers.
//!
//! Expressions are validated and tokenized by
//! [`ExprTokenizer`](parsing::expr_tokenizer::ExprTokenizer), then
//! evaluated with [`evaluate`](eval::evaluate).

pub mod error;
pub mod eval;
pub mod number;
pub mod parsing;
pub mod report;

pub use error::Error;
pub use number::Number;

use parsing::expr_tokenizer::tokenize;

/// Parses and evaluates `expression`.
pub fn calculate(expression: &str) -> Result<Number, Error> {
  let tokens = tokenize(expression)?;
  Ok(eval::evaluate(&tokens)?)
}
