use super::source::{SourceOffset, Span};

use regex::Regex;
use once_cell::sync::Lazy;

/// A cursor over an expression string. The recursive-descent parser
/// reads terminal symbols through this type and never indexes the
/// string directly.
#[derive(Debug, Clone)]
pub struct TokenizerState<'a> {
  whole_input: &'a str,
  input: &'a str,
  position: SourceOffset,
}

impl<'a> TokenizerState<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      whole_input: input,
      input,
      position: SourceOffset(0),
    }
  }

  pub fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  pub fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// Advances the position of `self` by `amount` bytes and returns
  /// the skipped portion of the input. This method will never advance
  /// beyond one-past-the-end of the input.
  ///
  /// `amount` must land on a character boundary.
  pub fn advance(&mut self, amount: usize) -> &'a str {
    let amount = amount.min(self.input.len());
    let (prefix, suffix) = self.input.split_at(amount);
    self.position += amount;
    self.input = suffix;
    prefix
  }

  pub fn read_literal(&mut self, literal: &str) -> Option<&'a str> {
    self.input.starts_with(literal).then(|| {
      self.advance(literal.len())
    })
  }

  /// If the current position of the string matches the given regex,
  /// returns the matched string and advances the tokenizer state. If
  /// not, returns `None`.
  ///
  /// The regex MUST be anchored at the start of the input. This
  /// function may panic if that precondition is not satisfied.
  pub fn read_regex(&mut self, regex: &Regex) -> Option<&'a str> {
    let m = regex.find(self.input)?;
    assert_eq!(m.start(), 0, "Regex must be anchored at the start of the input");

    Some(self.advance(m.len()))
  }

  pub fn read_many<T, F>(&mut self, mut function: F) -> Vec<T>
  where F: FnMut(&mut Self) -> Option<T> {
    let mut output = Vec::new();
    while let Some(item) = function(self) {
      output.push(item);
    }
    output
  }

  /// Skips blanks (spaces and horizontal tabs). Other whitespace is
  /// not part of the expression language.
  pub fn consume_spaces(&mut self) {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*").unwrap());
    self.read_regex(&RE).expect("regex should not fail");
  }

  /// The portion of the whole input covered by `span`. Out of bounds
  /// spans are truncated to the input.
  pub fn slice(&self, span: Span) -> &'a str {
    let end = span.end.0.min(self.whole_input.len());
    let start = span.start.0.min(end);
    &self.whole_input[start..end]
  }
}
