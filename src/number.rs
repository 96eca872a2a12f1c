//! The integer type that expressions compute with.
//!
//! Literals and every intermediate result must fit in a 16-bit signed
//! integer. Arithmetic itself is carried out in the wider
//! [`WorkingInt`] so that an out-of-range result can be detected
//! before it is truncated.

use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::num::IntErrorKind;
use std::str::FromStr;

/// The integer type that literals and results are required to fit
/// in.
pub type RequiredInt = i16;

/// The integer type used to carry out a single arithmetic operation.
pub type WorkingInt = i64;

/// An integer known to lie within the range of [`RequiredInt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Number(RequiredInt);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is outside of the range [{min}, {max}]", min = Number::MIN, max = Number::MAX)]
pub struct OutOfRangeError(pub WorkingInt);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseNumberError {
  #[error("Integer literal '{0}' is out of range")]
  OutOfRange(String),
  #[error("Invalid integer literal '{0}'")]
  Invalid(String),
}

impl Number {
  pub const MIN: Number = Number(RequiredInt::MIN);
  pub const MAX: Number = Number(RequiredInt::MAX);

  pub const fn new(value: RequiredInt) -> Self {
    Self(value)
  }

  pub const fn value(self) -> RequiredInt {
    self.0
  }

  /// The value as a [`WorkingInt`], ready for arithmetic.
  pub const fn widen(self) -> WorkingInt {
    self.0 as WorkingInt
  }
}

impl From<RequiredInt> for Number {
  fn from(value: RequiredInt) -> Self {
    Self(value)
  }
}

impl From<Number> for RequiredInt {
  fn from(n: Number) -> Self {
    n.0
  }
}

impl TryFrom<WorkingInt> for Number {
  type Error = OutOfRangeError;

  fn try_from(value: WorkingInt) -> Result<Self, Self::Error> {
    RequiredInt::try_from(value)
      .map(Number)
      .map_err(|_| OutOfRangeError(value))
  }
}

impl FromStr for Number {
  type Err = ParseNumberError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse::<RequiredInt>().map(Number).map_err(|err| {
      match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseNumberError::OutOfRange(s.to_owned()),
        _ => ParseNumberError::Invalid(s.to_owned()),
      }
    })
  }
}

impl Display for Number {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
