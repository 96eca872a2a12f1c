/// The associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
  /// `a - b - c` is `(a - b) - c`.
  Left,
  /// `a ^ b ^ c` is `a ^ (b ^ c)`.
  Right,
}

impl Associativity {
  pub fn is_right_assoc(self) -> bool {
    self == Associativity::Right
  }
}
