use crate::eval::EvaluationError;
use crate::parsing::error::SyntaxError;

use thiserror::Error;

/// Any error produced while turning an expression string into a
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Syntax(#[from] SyntaxError),
  #[error("{0}")]
  Evaluation(#[from] EvaluationError),
}
