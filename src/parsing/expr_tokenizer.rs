//! Recursive-descent tokenizer for integer arithmetic expressions.
//!
//! The tokenizer validates an expression against the grammar
//!
//! ```text
//! expr            := term , { ("+"|"-"|"*"|"/"|"%"|"^") , term } ;
//! term            := "(" , expr , ")" | integer ;
//! integer         := "0" | { "-" } , natural_number ;
//! natural_number  := digit_excl_zero , { digit } ;
//! digit_excl_zero := "1".."9" ;
//! digit           := "0" | digit_excl_zero ;
//! ```
//!
//! and produces the token sequence as a by-product. Blanks (spaces
//! and tabs) may appear between any two tokens but never inside a
//! numeral.

use super::error::{SyntaxError, SyntaxErrorKind};
use super::operator::Operator;
use super::source::Span;
use super::token::Token;
use super::tokenizer::TokenizerState;
use crate::number::{Number, ParseNumberError};

use log::trace;
use regex::Regex;
use once_cell::sync::Lazy;

/// Parses expressions into token sequences. A single tokenizer may be
/// reused for any number of expressions; each call to
/// [`parse`](ExprTokenizer::parse) starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct ExprTokenizer {
  tokens: Vec<Token>,
}

/// State of one parse: the cursor and the buffer being filled.
struct Descent<'a, 't> {
  state: TokenizerState<'a>,
  tokens: &'t mut Vec<Token>,
}

/// A parenthesized scope which has been opened but not yet closed.
/// Open scopes are kept on an explicit stack, so nesting depth is
/// limited only by memory.
#[derive(Debug, Clone, Copy)]
struct OpenScope {
  /// Whether the `(` stood in place of a term that follows an
  /// operator.
  follows_operator: bool,
}

/// An integer literal as it appeared in the input, with any chain of
/// leading minus signs already folded into a single sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Numeral<'a> {
  negative: bool,
  digits: &'a str,
}

impl ExprTokenizer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Validates `expression`, replacing the token buffer with its
  /// tokens. On failure the buffer is left empty.
  pub fn parse(&mut self, expression: &str) -> Result<(), SyntaxError> {
    self.tokens.clear();
    let mut descent = Descent {
      state: TokenizerState::new(expression),
      tokens: &mut self.tokens,
    };
    let result = descent.expression();
    if let Err(err) = &result {
      trace!("rejected {:?}: {}", expression, err);
      self.tokens.clear();
    }
    result
  }

  /// The tokens produced by the most recent successful call to
  /// [`parse`](ExprTokenizer::parse).
  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  pub fn into_tokens(self) -> Vec<Token> {
    self.tokens
  }
}

/// Parses `expression` with a fresh [`ExprTokenizer`] and returns its
/// tokens.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, SyntaxError> {
  let mut tokenizer = ExprTokenizer::new();
  tokenizer.parse(expression)?;
  Ok(tokenizer.into_tokens())
}

impl<'a, 't> Descent<'a, 't> {
  fn error_here(&self, kind: SyntaxErrorKind) -> SyntaxError {
    SyntaxError::new(kind, self.state.current_pos())
  }

  /// The whole input: an `expr` surrounded by optional blanks.
  fn expression(&mut self) -> Result<(), SyntaxError> {
    self.state.consume_spaces();
    if self.state.is_eof() {
      return Err(self.error_here(SyntaxErrorKind::UnexpectedEndOfExpression));
    }
    self.expr()?;
    self.state.consume_spaces();
    if !self.state.is_eof() {
      return Err(self.error_here(SyntaxErrorKind::ExtraneousSymbol));
    }
    Ok(())
  }

  fn expr(&mut self) -> Result<(), SyntaxError> {
    let mut scopes: Vec<OpenScope> = Vec::new();
    self.term(&mut scopes, false)?;
    loop {
      if let Some(op) = self.operator() {
        self.tokens.push(Token::operator(op));
        self.term(&mut scopes, true)?;
      } else if scopes.pop().is_some() {
        if self.state.read_literal(")").is_none() {
          return Err(self.error_here(SyntaxErrorKind::MissingClosingParenthesis));
        }
        self.tokens.push(Token::closing_scope());
      } else {
        return Ok(());
      }
    }
  }

  /// Skips blanks and reads a binary operator, if there is one.
  fn operator(&mut self) -> Option<Operator> {
    self.state.consume_spaces();
    let op = self.state.peek().and_then(Operator::from_symbol)?;
    self.state.advance(1);
    Some(op)
  }

  /// Reads the opening parentheses of a term, pushing each onto
  /// `scopes`, and then the integer at its core. The matching closing
  /// parentheses are read by [`expr`](Descent::expr).
  fn term(&mut self, scopes: &mut Vec<OpenScope>, follows_operator: bool) -> Result<(), SyntaxError> {
    let mut follows_operator = follows_operator;
    loop {
      self.state.consume_spaces();
      if self.state.read_literal("(").is_none() {
        break;
      }
      self.tokens.push(Token::opening_scope());
      scopes.push(OpenScope { follows_operator });
      follows_operator = false;
    }

    match self.operand() {
      // Input ran out before a term could even begin.
      Err(err) if err.kind == SyntaxErrorKind::IllFormedInteger
        && self.state.is_eof()
        && (follows_operator || scopes.iter().any(|scope| scope.follows_operator)) => {
        Err(err.with_kind(SyntaxErrorKind::MissingTerm))
      }
      result => result,
    }
  }

  /// An integer, checked against the required range and emitted as an
  /// operand.
  fn operand(&mut self) -> Result<(), SyntaxError> {
    let start = self.state.current_pos();
    let numeral = self.integer()?;
    let span = Span::new(start, self.state.current_pos());
    let literal = numeral.literal();
    trace!("numeral {:?} read as {} at {}", self.state.slice(span), literal, span);
    match literal.parse::<Number>() {
      Ok(_) => {
        self.tokens.push(Token::operand(literal));
        Ok(())
      }
      Err(ParseNumberError::OutOfRange(_)) => {
        Err(SyntaxError::new(SyntaxErrorKind::IntegerOutOfRange, start))
      }
      Err(_) => {
        Err(SyntaxError::new(SyntaxErrorKind::IllFormedInteger, start))
      }
    }
  }

  fn integer(&mut self) -> Result<Numeral<'a>, SyntaxError> {
    if let Some(digits) = self.state.read_literal("0") {
      return Ok(Numeral { negative: false, digits });
    }
    let minus_count = self.state.read_many(|state| state.read_literal("-")).len();
    let digits = self.natural_number()?;
    Ok(Numeral { negative: minus_count % 2 == 1, digits })
  }

  fn natural_number(&mut self) -> Result<&'a str, SyntaxError> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*").unwrap());
    self.state.read_regex(&RE)
      .ok_or_else(|| self.error_here(SyntaxErrorKind::IllFormedInteger))
  }
}

impl Numeral<'_> {
  /// The literal in canonical form: the digits, preceded by a single
  /// `-` if the literal is negative.
  fn literal(&self) -> String {
    if self.negative {
      format!("-{}", self.digits)
    } else {
      self.digits.to_owned()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::source::SourceOffset;
  use crate::parsing::token::TokenKind;

  use proptest::prelude::*;

  fn error(kind: SyntaxErrorKind, column: usize) -> SyntaxError {
    SyntaxError::new(kind, SourceOffset(column))
  }

  fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::as_str).collect()
  }

  #[test]
  fn test_simple_expression() {
    let tokens = tokenize("1+2*3").unwrap();
    assert_eq!(
      tokens,
      vec![
        Token::operand("1"),
        Token::operator(Operator::Plus),
        Token::operand("2"),
        Token::operator(Operator::Times),
        Token::operand("3"),
      ],
    );
  }

  #[test]
  fn test_blanks_between_tokens() {
    let tokens = tokenize(" \t( 10 %\t3 ) ^ 2  ").unwrap();
    assert_eq!(
      tokens,
      vec![
        Token::opening_scope(),
        Token::operand("10"),
        Token::operator(Operator::Modulo),
        Token::operand("3"),
        Token::closing_scope(),
        Token::operator(Operator::Power),
        Token::operand("2"),
      ],
    );
  }

  #[test]
  fn test_nested_scopes() {
    let tokens = tokenize("((7))").unwrap();
    let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
    assert_eq!(
      kinds,
      vec![
        TokenKind::OpeningScope,
        TokenKind::OpeningScope,
        TokenKind::Operand,
        TokenKind::ClosingScope,
        TokenKind::ClosingScope,
      ],
    );
  }

  #[test]
  fn test_zero() {
    assert_eq!(tokenize("0").unwrap(), vec![Token::operand("0")]);
    assert_eq!(texts(&tokenize("0-0").unwrap()), vec!["0", "-", "0"]);
  }

  #[test]
  fn test_minus_chain_parity() {
    assert_eq!(tokenize("-5").unwrap(), vec![Token::operand("-5")]);
    assert_eq!(tokenize("--5").unwrap(), vec![Token::operand("5")]);
    assert_eq!(tokenize("---5").unwrap(), vec![Token::operand("-5")]);
    assert_eq!(tokenize("----50").unwrap(), vec![Token::operand("50")]);
  }

  #[test]
  fn test_minus_after_operator_is_a_sign() {
    assert_eq!(texts(&tokenize("1--2").unwrap()), vec!["1", "-", "-2"]);
    assert_eq!(texts(&tokenize("1 - -2").unwrap()), vec!["1", "-", "-2"]);
    // A sign must be attached to its digits.
    assert_eq!(tokenize("1 - - 2"), Err(error(SyntaxErrorKind::IllFormedInteger, 5)));
    assert_eq!(texts(&tokenize("2^-1").unwrap()), vec!["2", "^", "-1"]);
  }

  #[test]
  fn test_range_limits() {
    assert_eq!(tokenize("32767").unwrap(), vec![Token::operand("32767")]);
    assert_eq!(tokenize("-32768").unwrap(), vec![Token::operand("-32768")]);
    assert_eq!(tokenize("---32768").unwrap(), vec![Token::operand("-32768")]);
  }

  #[test]
  fn test_unexpected_end_of_expression() {
    assert_eq!(tokenize(""), Err(error(SyntaxErrorKind::UnexpectedEndOfExpression, 0)));
    assert_eq!(tokenize("   "), Err(error(SyntaxErrorKind::UnexpectedEndOfExpression, 3)));
    assert_eq!(tokenize("\t"), Err(error(SyntaxErrorKind::UnexpectedEndOfExpression, 1)));
  }

  #[test]
  fn test_ill_formed_integer() {
    assert_eq!(tokenize("x"), Err(error(SyntaxErrorKind::IllFormedInteger, 0)));
    assert_eq!(tokenize("1+x"), Err(error(SyntaxErrorKind::IllFormedInteger, 2)));
    assert_eq!(tokenize("-0"), Err(error(SyntaxErrorKind::IllFormedInteger, 1)));
    assert_eq!(tokenize("- 3"), Err(error(SyntaxErrorKind::IllFormedInteger, 1)));
    assert_eq!(tokenize("3 + +2"), Err(error(SyntaxErrorKind::IllFormedInteger, 4)));
    assert_eq!(tokenize("(*2)"), Err(error(SyntaxErrorKind::IllFormedInteger, 1)));
    assert_eq!(tokenize("("), Err(error(SyntaxErrorKind::IllFormedInteger, 1)));
  }

  #[test]
  fn test_missing_term() {
    assert_eq!(tokenize("1+"), Err(error(SyntaxErrorKind::MissingTerm, 2)));
    assert_eq!(tokenize("1 +   "), Err(error(SyntaxErrorKind::MissingTerm, 6)));
    assert_eq!(tokenize("1 + -"), Err(error(SyntaxErrorKind::MissingTerm, 5)));
    assert_eq!(tokenize("(1+"), Err(error(SyntaxErrorKind::MissingTerm, 3)));
    assert_eq!(tokenize("1+("), Err(error(SyntaxErrorKind::MissingTerm, 3)));
  }

  #[test]
  fn test_extraneous_symbol() {
    assert_eq!(tokenize("1 2"), Err(error(SyntaxErrorKind::ExtraneousSymbol, 2)));
    assert_eq!(tokenize("1)"), Err(error(SyntaxErrorKind::ExtraneousSymbol, 1)));
    assert_eq!(tokenize("05"), Err(error(SyntaxErrorKind::ExtraneousSymbol, 1)));
    assert_eq!(tokenize("1 + 2 x"), Err(error(SyntaxErrorKind::ExtraneousSymbol, 6)));
    assert_eq!(tokenize("(1)(2)"), Err(error(SyntaxErrorKind::ExtraneousSymbol, 3)));
    assert_eq!(tokenize("7\n"), Err(error(SyntaxErrorKind::ExtraneousSymbol, 1)));
  }

  #[test]
  fn test_missing_closing_parenthesis() {
    assert_eq!(tokenize("4/(5^2"), Err(error(SyntaxErrorKind::MissingClosingParenthesis, 6)));
    assert_eq!(tokenize("2*(1"), Err(error(SyntaxErrorKind::MissingClosingParenthesis, 4)));
    assert_eq!(tokenize("((1)"), Err(error(SyntaxErrorKind::MissingClosingParenthesis, 4)));
    assert_eq!(tokenize("(1 2)"), Err(error(SyntaxErrorKind::MissingClosingParenthesis, 3)));
  }

  #[test]
  fn test_integer_out_of_range() {
    assert_eq!(tokenize("99999"), Err(error(SyntaxErrorKind::IntegerOutOfRange, 0)));
    assert_eq!(tokenize("1 + 32768"), Err(error(SyntaxErrorKind::IntegerOutOfRange, 4)));
    assert_eq!(tokenize("-32769"), Err(error(SyntaxErrorKind::IntegerOutOfRange, 0)));
    assert_eq!(tokenize("--32768"), Err(error(SyntaxErrorKind::IntegerOutOfRange, 0)));
    assert_eq!(tokenize("(2 * 123456789012345678901234567890)"), Err(error(SyntaxErrorKind::IntegerOutOfRange, 5)));
  }

  #[test]
  fn test_failed_parse_clears_tokens() {
    let mut tokenizer = ExprTokenizer::new();
    tokenizer.parse("1+2").unwrap();
    assert_eq!(tokenizer.tokens().len(), 3);

    assert!(tokenizer.parse("1+").is_err());
    assert!(tokenizer.tokens().is_empty());

    tokenizer.parse("1+2").unwrap();
    assert!(tokenizer.parse("1+2 3").is_err());
    assert!(tokenizer.tokens().is_empty());
  }

  #[test]
  fn test_reuse_does_not_leak_tokens() {
    let mut tokenizer = ExprTokenizer::new();
    tokenizer.parse("(1 + 2) * 3").unwrap();
    let first = tokenizer.tokens().to_vec();
    tokenizer.parse("4").unwrap();
    assert_eq!(tokenizer.tokens(), &[Token::operand("4")]);
    tokenizer.parse("(1 + 2) * 3").unwrap();
    assert_eq!(tokenizer.tokens(), first.as_slice());
  }

  fn nested(depth: usize, core: &str) -> String {
    format!("{}{}{}", "(".repeat(depth), core, ")".repeat(depth))
  }

  #[test]
  fn test_deeply_nested_scopes() {
    let depth = 100_000;
    let tokens = tokenize(&nested(depth, "1")).unwrap();
    assert_eq!(tokens.len(), 2 * depth + 1);
    assert_eq!(tokens[depth], Token::operand("1"));
    assert!(tokens[..depth].iter().all(|t| t.kind() == TokenKind::OpeningScope));
    assert!(tokens[depth + 1..].iter().all(|t| t.kind() == TokenKind::ClosingScope));

    let tokens = tokenize(&format!("2 * {} - 3", nested(depth, "4 ^ -1"))).unwrap();
    assert_eq!(tokens.len(), 2 * depth + 7);
  }

  #[test]
  fn test_deeply_nested_errors() {
    let depth = 100_000;
    let unclosed = format!("{}1", "(".repeat(depth));
    assert_eq!(tokenize(&unclosed), Err(error(SyntaxErrorKind::MissingClosingParenthesis, depth + 1)));

    let open_only = "(".repeat(depth);
    assert_eq!(tokenize(&open_only), Err(error(SyntaxErrorKind::IllFormedInteger, depth)));

    let after_operator = format!("1+{}", "(".repeat(depth));
    assert_eq!(tokenize(&after_operator), Err(error(SyntaxErrorKind::MissingTerm, depth + 2)));

    let extra_close = format!("{})", nested(depth, "1"));
    assert_eq!(tokenize(&extra_close), Err(error(SyntaxErrorKind::ExtraneousSymbol, 2 * depth + 1)));
  }

  #[test]
  fn test_missing_term_inside_scopes() {
    assert_eq!(tokenize("(1+(2+"), Err(error(SyntaxErrorKind::MissingTerm, 6)));
    assert_eq!(tokenize("2*((("), Err(error(SyntaxErrorKind::MissingTerm, 5)));
    assert_eq!(tokenize("(1+((2)"), Err(error(SyntaxErrorKind::MissingClosingParenthesis, 7)));
    assert_eq!(tokenize("((("), Err(error(SyntaxErrorKind::IllFormedInteger, 3)));
    assert_eq!(tokenize("(1) + ((x"), Err(error(SyntaxErrorKind::IllFormedInteger, 8)));
  }

  fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
  }

  fn expression_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    (
      any::<i16>(),
      prop::collection::vec((operator_strategy(), any::<i16>()), 0..8),
      "[ \t]{0,2}",
    ).prop_map(|(first, rest, pad)| {
      let mut text = first.to_string();
      let mut expected = vec![first.to_string()];
      for (op, n) in rest {
        text.push_str(&format!("{pad}{op}{pad}{n}"));
        expected.push(op.to_string());
        expected.push(n.to_string());
      }
      (text, expected)
    })
  }

  proptest! {
    #[test]
    fn test_generated_expressions_round_trip((text, expected) in expression_strategy()) {
      let tokens = tokenize(&text).unwrap();
      let rendered: Vec<String> = tokens.iter().map(|t| t.as_str().to_owned()).collect();
      prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn test_parenthesized_expressions_round_trip((text, expected) in expression_strategy()) {
      let tokens = tokenize(&format!("({text})")).unwrap();
      prop_assert_eq!(tokens.first(), Some(&Token::opening_scope()));
      prop_assert_eq!(tokens.last(), Some(&Token::closing_scope()));
      let inner: Vec<String> = tokens[1..tokens.len() - 1].iter().map(|t| t.as_str().to_owned()).collect();
      prop_assert_eq!(inner, expected);
    }

    #[test]
    fn test_parse_is_idempotent((text, _) in expression_strategy()) {
      let mut tokenizer = ExprTokenizer::new();
      tokenizer.parse(&text).unwrap();
      let first = tokenizer.tokens().to_vec();
      tokenizer.parse(&text).unwrap();
      prop_assert_eq!(tokenizer.tokens(), first.as_slice());
    }
  }
}
