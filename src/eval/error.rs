use crate::parsing::token::Token;

use thiserror::Error;

/// An error that stops evaluation of an expression. Evaluation
/// stops at the first error; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EvaluationError {
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Numeric overflow")]
  NumericOverflow,
  /// The token sequence did not come from a successful parse and
  /// contains a token that cannot appear where it does.
  #[error("Unexpected token {0}")]
  UnexpectedToken(Token),
  /// The token sequence did not come from a successful parse and
  /// ends before the expression is complete.
  #[error("Unexpected end of token sequence")]
  UnexpectedEndOfTokens,
}
