use super::source::SourceOffset;

use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// The first violation of the grammar found in an expression, and
/// where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at column {column}")]
pub struct SyntaxError {
  pub kind: SyntaxErrorKind,
  /// The 0-based offset of the character at which the error was
  /// detected. Errors detected at the end of the input report the
  /// length of the input.
  pub column: SourceOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
  /// The expression ended (or was blank) where a term was required
  /// to begin.
  UnexpectedEndOfExpression,
  /// A numeral does not start with a nonzero digit.
  IllFormedInteger,
  /// An operator is not followed by a term.
  MissingTerm,
  /// A complete expression is followed by more input.
  ExtraneousSymbol,
  /// A parenthesized expression is not closed.
  MissingClosingParenthesis,
  /// A numeral does not fit in the required integer range.
  IntegerOutOfRange,
}

impl SyntaxError {
  pub fn new(kind: SyntaxErrorKind, column: SourceOffset) -> Self {
    Self { kind, column }
  }

  pub fn with_kind(self, kind: SyntaxErrorKind) -> Self {
    Self { kind, ..self }
  }
}

impl Display for SyntaxErrorKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let message = match self {
      SyntaxErrorKind::UnexpectedEndOfExpression => "Unexpected end of expression",
      SyntaxErrorKind::IllFormedInteger => "Ill-formed integer",
      SyntaxErrorKind::MissingTerm => "Missing term",
      SyntaxErrorKind::ExtraneousSymbol => "Extraneous symbol",
      SyntaxErrorKind::MissingClosingParenthesis => "Missing closing parenthesis",
      SyntaxErrorKind::IntegerOutOfRange => "Integer out of range",
    };
    f.write_str(message)
  }
}
