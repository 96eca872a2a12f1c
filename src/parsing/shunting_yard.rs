//! Infix to postfix conversion with the shunting yard algorithm.

use super::operator::{Operator, Precedence};
use super::token::{Token, TokenKind};
use crate::eval::EvaluationError;

/// An entry on the operator stack. Opening parentheses sit on the
/// stack alongside operators and act as a barrier for popping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
  Scope,
  Operator(Operator),
}

impl StackEntry {
  fn precedence(self) -> Precedence {
    match self {
      StackEntry::Scope => Precedence::SCOPE,
      StackEntry::Operator(op) => op.precedence(),
    }
  }

  fn is_right_assoc(self) -> bool {
    match self {
      StackEntry::Scope => false,
      StackEntry::Operator(op) => op.associativity().is_right_assoc(),
    }
  }
}

/// Converts a sequence of infix tokens into postfix order. Operands
/// keep their relative order; scope tokens never appear in the
/// output.
///
/// Token sequences produced by a successful parse always convert.
/// Unbalanced parentheses or unknown operator tokens are reported as
/// errors.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, EvaluationError> {
  let mut operator_stack: Vec<StackEntry> = Vec::new();
  let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
  for token in tokens {
    match token.kind() {
      TokenKind::Operand => {
        output.push(token.clone());
      }
      TokenKind::Operator => {
        let op = token.as_operator().ok_or_else(|| EvaluationError::UnexpectedToken(token.clone()))?;
        // Pop operators until we hit one that binds less tightly.
        while let Some(&top) = operator_stack.last() {
          if !has_higher_precedence(top, op) {
            break;
          }
          operator_stack.pop();
          if let StackEntry::Operator(top) = top {
            output.push(Token::operator(top));
          }
        }
        operator_stack.push(StackEntry::Operator(op));
      }
      TokenKind::OpeningScope => {
        operator_stack.push(StackEntry::Scope);
      }
      TokenKind::ClosingScope => {
        loop {
          match operator_stack.pop() {
            Some(StackEntry::Operator(op)) => output.push(Token::operator(op)),
            Some(StackEntry::Scope) => break,
            None => return Err(EvaluationError::UnexpectedToken(token.clone())),
          }
        }
      }
    }
  }

  // Pop remaining operators.
  while let Some(entry) = operator_stack.pop() {
    match entry {
      StackEntry::Operator(op) => output.push(Token::operator(op)),
      StackEntry::Scope => return Err(EvaluationError::UnexpectedEndOfTokens),
    }
  }
  Ok(output)
}

/// Whether the entry on top of the operator stack must be applied
/// before `incoming` is pushed.
fn has_higher_precedence(top: StackEntry, incoming: Operator) -> bool {
  let top_prec = top.precedence();
  let incoming_prec = incoming.precedence();
  top_prec > incoming_prec || (top_prec == incoming_prec && !top.is_right_assoc())
}
