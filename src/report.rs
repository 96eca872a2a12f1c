//! Human-readable diagnostics for the command line driver.

use crate::eval::EvaluationError;
use crate::parsing::error::{SyntaxError, SyntaxErrorKind};
use crate::parsing::token::Token;

use itertools::Itertools;

/// The one-line description of a syntax error, naming its column.
pub fn syntax_message(err: &SyntaxError) -> String {
  let column = err.column;
  match err.kind {
    SyntaxErrorKind::UnexpectedEndOfExpression =>
      format!("Unexpected end of input at column ({column})!"),
    SyntaxErrorKind::IllFormedInteger =>
      format!("Ill formed integer at column ({column})!"),
    SyntaxErrorKind::MissingTerm =>
      format!("Missing <term> at column ({column})!"),
    SyntaxErrorKind::ExtraneousSymbol =>
      format!("Extraneous symbol after valid expression found at column ({column})!"),
    SyntaxErrorKind::MissingClosingParenthesis =>
      format!("Missing closing \")\" at column ({column})!"),
    SyntaxErrorKind::IntegerOutOfRange =>
      format!("Integer constant out of range beginning at column ({column})!"),
  }
}

pub fn evaluation_message(err: &EvaluationError) -> String {
  match err {
    EvaluationError::DivisionByZero => "Division by zero!".to_owned(),
    EvaluationError::NumericOverflow => "Numeric overflow error!".to_owned(),
    other => format!("Malformed token sequence: {other}!"),
  }
}

/// A line which, printed under `"expression"`, puts a caret below
/// the character at `column`. Tabs in the expression are repeated so
/// that the caret lines up in a terminal.
pub fn caret_line(expression: &str, err: &SyntaxError) -> String {
  let column = usize::from(err.column);
  let prefix = expression.get(..column).unwrap_or(expression);
  // One extra column for the opening quote.
  let padding: String = prefix.chars().map(|ch| if ch == '\t' { '\t' } else { ' ' }).collect();
  format!(" {padding}^")
}

/// The full diagnostic for a syntax error: the message, the quoted
/// expression, and a caret under the offending column.
pub fn render_syntax_error(expression: &str, err: &SyntaxError) -> String {
  format!(">>> {}\n\"{}\"\n{}", syntax_message(err), expression, caret_line(expression, err))
}

pub fn render_evaluation_error(err: &EvaluationError) -> String {
  format!(">>> {}", evaluation_message(err))
}

/// Renders a token list as `{ <1,OPERAND> <+,OPERATOR> ... }`.
pub fn render_tokens(tokens: &[Token]) -> String {
  format!("{{ {} }}", tokens.iter().join(" "))
}

/// Renders a postfix sequence by its token texts, separated by
/// spaces.
pub fn render_postfix(postfix: &[Token]) -> String {
  postfix.iter().map(Token::as_str).join(" ")
}
