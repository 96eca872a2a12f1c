use super::operator::Operator;

use std::fmt::{self, Display, Formatter};

/// A single lexical unit of an expression. Tokens are immutable once
/// constructed, and two tokens are equal exactly when their text and
/// kind agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
  value: String,
  kind: TokenKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  /// A signed integer literal.
  Operand,
  /// One of the binary operators.
  Operator,
  /// `(`
  OpeningScope,
  /// `)`
  ClosingScope,
}

impl Token {
  pub fn new(value: impl Into<String>, kind: TokenKind) -> Self {
    Self { value: value.into(), kind }
  }

  pub fn operand(literal: impl Into<String>) -> Self {
    Self::new(literal, TokenKind::Operand)
  }

  pub fn operator(op: Operator) -> Self {
    Self::new(op.symbol(), TokenKind::Operator)
  }

  pub fn opening_scope() -> Self {
    Self::new("(", TokenKind::OpeningScope)
  }

  pub fn closing_scope() -> Self {
    Self::new(")", TokenKind::ClosingScope)
  }

  /// The literal text of the token.
  pub fn as_str(&self) -> &str {
    &self.value
  }

  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  /// The operator this token stands for, if it is a well-formed
  /// operator token.
  pub fn as_operator(&self) -> Option<Operator> {
    if self.kind != TokenKind::Operator {
      return None;
    }
    let mut chars = self.value.chars();
    match (chars.next(), chars.next()) {
      (Some(ch), None) => Operator::from_symbol(ch),
      _ => None,
    }
  }
}

impl Display for TokenKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let name = match self {
      TokenKind::Operand => "OPERAND",
      TokenKind::Operator => "OPERATOR",
      TokenKind::OpeningScope => "OPENING_SCOPE",
      TokenKind::ClosingScope => "CLOSING_SCOPE",
    };
    f.write_str(name)
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "<{},{}>", self.value, self.kind)
  }
}
