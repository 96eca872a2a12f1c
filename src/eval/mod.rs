//! Evaluation of token sequences.
//!
//! Tokens are first rearranged into postfix order by
//! [`to_postfix`](crate::parsing::shunting_yard::to_postfix) and then
//! executed against a stack of values.

mod error;

pub use error::EvaluationError;

use crate::number::{Number, WorkingInt};
use crate::parsing::operator::Operator;
use crate::parsing::shunting_yard::to_postfix;
use crate::parsing::token::{Token, TokenKind};

use itertools::Itertools;
use log::{debug, trace};

/// A value on the evaluation stack, together with the first token
/// that contributed to it. The token is only used to report leftover
/// values.
#[derive(Debug, Clone)]
struct StackValue {
  value: Number,
  token: Token,
}

/// Evaluates an infix token sequence, as produced by
/// [`ExprTokenizer`](crate::parsing::expr_tokenizer::ExprTokenizer).
pub fn evaluate(tokens: &[Token]) -> Result<Number, EvaluationError> {
  let postfix = to_postfix(tokens)?;
  debug!("postfix: {}", postfix.iter().map(Token::as_str).join(" "));
  evaluate_postfix(&postfix)
}

/// Evaluates a token sequence which is already in postfix order.
pub fn evaluate_postfix(postfix: &[Token]) -> Result<Number, EvaluationError> {
  let mut value_stack: Vec<StackValue> = Vec::new();
  for token in postfix {
    match token.kind() {
      TokenKind::Operand => {
        let value = token.as_str().parse::<Number>()
          .map_err(|_| EvaluationError::UnexpectedToken(token.clone()))?;
        value_stack.push(StackValue { value, token: token.clone() });
      }
      TokenKind::Operator => {
        let op = token.as_operator().ok_or_else(|| EvaluationError::UnexpectedToken(token.clone()))?;
        // The top of the stack is the right-hand operand.
        let (left, right) = value_stack.pop()
          .and_then(|right| value_stack.pop().map(|left| (left, right)))
          .ok_or(EvaluationError::UnexpectedEndOfTokens)?;
        let value = execute(left.value, right.value, op)?;
        value_stack.push(StackValue { value, token: left.token });
      }
      TokenKind::OpeningScope | TokenKind::ClosingScope => {
        return Err(EvaluationError::UnexpectedToken(token.clone()));
      }
    }
  }

  let final_result = value_stack.pop().ok_or(EvaluationError::UnexpectedEndOfTokens)?;
  if let Some(remaining_value) = value_stack.pop() {
    return Err(EvaluationError::UnexpectedToken(remaining_value.token));
  }
  Ok(final_result.value)
}

/// Applies a single binary operator. The result must lie in the
/// range of [`Number`].
pub fn execute(left: Number, right: Number, operator: Operator) -> Result<Number, EvaluationError> {
  let (l, r) = (left.widen(), right.widen());
  let result = match operator {
    Operator::Power => power(l, r)?,
    Operator::Times => l * r,
    Operator::Divide => {
      if r == 0 {
        return Err(EvaluationError::DivisionByZero);
      }
      l / r
    }
    Operator::Modulo => {
      if r == 0 {
        return Err(EvaluationError::DivisionByZero);
      }
      l % r
    }
    Operator::Plus => l + r,
    Operator::Minus => l - r,
  };
  trace!("{} {} {} = {}", left, operator, right, result);
  Number::try_from(result).map_err(|_| EvaluationError::NumericOverflow)
}

/// Integer exponentiation. A negative exponent yields the exact
/// result truncated toward zero, which is nonzero only for a base of
/// `1` or `-1`.
fn power(base: WorkingInt, exponent: WorkingInt) -> Result<WorkingInt, EvaluationError> {
  if exponent < 0 {
    return match base {
      0 => Err(EvaluationError::DivisionByZero),
      1 => Ok(1),
      -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
      _ => Ok(0),
    };
  }
  let exponent = u32::try_from(exponent).map_err(|_| EvaluationError::NumericOverflow)?;
  base.checked_pow(exponent).ok_or(EvaluationError::NumericOverflow)
}
