mod associativity;
mod precedence;

pub use associativity::Associativity;
pub use precedence::Precedence;

use std::fmt::{self, Display, Formatter};

/// One of the six binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
  Power,
  Times,
  Divide,
  Modulo,
  Plus,
  Minus,
}

impl Operator {
  pub const ALL: [Operator; 6] = [
    Operator::Power,
    Operator::Times,
    Operator::Divide,
    Operator::Modulo,
    Operator::Plus,
    Operator::Minus,
  ];

  /// The operator's symbol, as written in an expression.
  pub const fn symbol(self) -> char {
    match self {
      Operator::Power => '^',
      Operator::Times => '*',
      Operator::Divide => '/',
      Operator::Modulo => '%',
      Operator::Plus => '+',
      Operator::Minus => '-',
    }
  }

  pub fn from_symbol(symbol: char) -> Option<Operator> {
    Operator::ALL.into_iter().find(|op| op.symbol() == symbol)
  }

  pub const fn precedence(self) -> Precedence {
    match self {
      Operator::Power => Precedence::EXPONENTIAL,
      Operator::Times | Operator::Divide | Operator::Modulo => Precedence::MULTIPLICATIVE,
      Operator::Plus | Operator::Minus => Precedence::ADDITIVE,
    }
  }

  pub const fn associativity(self) -> Associativity {
    match self {
      Operator::Power => Associativity::Right,
      _ => Associativity::Left,
    }
  }
}

impl Display for Operator {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.symbol())
  }
}
