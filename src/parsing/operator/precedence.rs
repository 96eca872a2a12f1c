/// The precedence of an operator. Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(u8);

impl Precedence {
  /// The precedence of an opening parenthesis sitting on the operator
  /// stack. No operator is ever popped past it.
  pub const SCOPE: Precedence = Precedence(0);
  pub const ADDITIVE: Precedence = Precedence(1);
  pub const MULTIPLICATIVE: Precedence = Precedence(2);
  pub const EXPONENTIAL: Precedence = Precedence(3);
}
