use std::{convert::TryFrom, fmt, str::FromStr};
use thiserror::Error;

/// Decimal scale of a quantity, as a power of ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
  Nano = -9,
  Micro = -6,
  Milli = -3,
  Unit = 0,
  Kilo = 3,
  Mega = 6,
  Giga = 9,
  Tera = 12,
  Peta = 15,
  Exa = 18,
}

impl Scale {
  #[inline]
  pub fn exponent(self) -> i32 {
    self as i32
  }
}

/// A fixed-point amount of some resource, such as `2G`, `512Mi` or `1.5e9`.
///
/// The accepted grammar is the one used by Kubernetes resource quantities:
///
/// ```text
/// <quantity>        ::= <signedNumber><suffix>
/// <signedNumber>    ::= <number> | <sign><number>
/// <sign>            ::= "+" | "-"
/// <number>          ::= <digits> | <digits>.<digits> | <digits>. | .<digits>
/// <suffix>          ::= <binarySI> | <decimalExponent> | <decimalSI>
/// <binarySI>        ::= Ki | Mi | Gi | Ti | Pi | Ei
/// <decimalSI>       ::= m | "" | k | M | G | T | P | E
/// <decimalExponent> ::= "e" <signedNumber> | "E" <signedNumber>
/// ```
///
/// The value is kept exactly as `mantissa * 10^exponent * 2^binary`, so no
/// precision is lost between parsing and scaling.
#[derive(Clone, PartialEq, Eq)]
pub struct Quantity {
  negative: bool,
  mantissa: u128,
  exponent: i32,
  binary: u32,
  raw: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseQuantityError {
  #[error("quantity is empty")]
  Empty,

  #[error("quantity {0:?} has no valid numeric part")]
  InvalidNumber(String),

  #[error("quantity {0:?} has an unknown suffix")]
  InvalidSuffix(String),

  #[error("quantity {0:?} is too large")]
  OutOfRange(String),
}

/// Failure to express a quantity as a whole number of scale units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScaleError {
  #[error("value cannot be represented at the requested scale without rounding")]
  Inexact,

  #[error("scaled value overflows")]
  Overflow,
}

impl Quantity {
  #[inline]
  pub fn is_zero(&self) -> bool {
    self.mantissa == 0
  }

  #[inline]
  pub fn is_negative(&self) -> bool {
    self.negative && !self.is_zero()
  }

  /// Returns -1, 0 or 1 depending on the sign of the value.
  #[inline]
  pub fn signum(&self) -> i8 {
    if self.is_zero() {
      0
    } else if self.negative {
      -1
    } else {
      1
    }
  }

  /// Returns the value as a whole number of `scale` units, failing with
  /// [`ScaleError::Inexact`] when that would require rounding.
  ///
  /// `2G` at [`Scale::Giga`] is `2`, `2Gi` is inexact (2147483648 bytes),
  /// while `1953125Ki` is exactly `2`.
  pub fn to_scaled(&self, scale: Scale) -> Result<i128, ScaleError> {
    let exponent = i64::from(self.exponent) - i64::from(scale.exponent());
    let magnitude = scale_magnitude(self.mantissa, exponent, self.binary)?;
    let value = i128::try_from(magnitude).map_err(|_| ScaleError::Overflow)?;

    Ok(if self.negative { -value } else { value })
  }
}

fn scale_magnitude(mantissa: u128, exponent: i64, binary: u32) -> Result<u128, ScaleError> {
  if mantissa == 0 {
    return Ok(0);
  }

  if exponent >= 0 {
    let exponent = u32::try_from(exponent).map_err(|_| ScaleError::Overflow)?;
    let value = 10u128
      .checked_pow(exponent)
      .and_then(|factor| mantissa.checked_mul(factor))
      .ok_or(ScaleError::Overflow)?;
    return checked_shl(value, binary);
  }

  // 10^k = 5^k * 2^k, and the binary suffix only contributes twos.
  let k = u32::try_from(-exponent).map_err(|_| ScaleError::Inexact)?;
  let fives = 5u128.checked_pow(k).ok_or(ScaleError::Inexact)?;
  if mantissa % fives != 0 {
    return Err(ScaleError::Inexact);
  }

  let value = mantissa / fives;
  if binary >= k {
    checked_shl(value, binary - k)
  } else {
    let shift = k - binary;
    if value.trailing_zeros() < shift {
      Err(ScaleError::Inexact)
    } else {
      Ok(value >> shift)
    }
  }
}

#[inline]
fn checked_shl(value: u128, shift: u32) -> Result<u128, ScaleError> {
  if value.leading_zeros() < shift {
    Err(ScaleError::Overflow)
  } else {
    Ok(value << shift)
  }
}

fn parse_suffix(suffix: &str) -> Option<(i32, u32)> {
  Some(match suffix {
    "" => (0, 0),
    "m" => (-3, 0),
    "k" => (3, 0),
    "M" => (6, 0),
    "G" => (9, 0),
    "T" => (12, 0),
    "P" => (15, 0),
    "E" => (18, 0),
    "Ki" => (0, 10),
    "Mi" => (0, 20),
    "Gi" => (0, 30),
    "Ti" => (0, 40),
    "Pi" => (0, 50),
    "Ei" => (0, 60),
    s if s.starts_with('e') || s.starts_with('E') => (s[1..].parse::<i32>().ok()?, 0),
    _ => return None,
  })
}

impl FromStr for Quantity {
  type Err = ParseQuantityError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(ParseQuantityError::Empty);
    }

    let (negative, rest) = match s.as_bytes()[0] {
      b'-' => (true, &s[1..]),
      b'+' => (false, &s[1..]),
      _ => (false, s),
    };

    let number_len = rest
      .find(|c: char| !(c.is_ascii_digit() || c == '.'))
      .unwrap_or_else(|| rest.len());
    let (number, suffix) = rest.split_at(number_len);
    let (whole, fraction) = match number.find('.') {
      Some(i) => (&number[..i], &number[i + 1..]),
      None => (number, ""),
    };

    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
      return Err(ParseQuantityError::InvalidNumber(s.to_owned()));
    }

    let out_of_range = || ParseQuantityError::OutOfRange(s.to_owned());
    let mut mantissa = 0u128;
    for digit in whole.bytes().chain(fraction.bytes()) {
      mantissa = mantissa
        .checked_mul(10)
        .and_then(|m| m.checked_add(u128::from(digit - b'0')))
        .ok_or_else(out_of_range)?;
    }

    let (suffix_exponent, mut binary) =
      parse_suffix(suffix).ok_or_else(|| ParseQuantityError::InvalidSuffix(s.to_owned()))?;
    let mut exponent = i32::try_from(fraction.len())
      .ok()
      .and_then(|fraction_len| suffix_exponent.checked_sub(fraction_len))
      .ok_or_else(out_of_range)?;

    if mantissa == 0 {
      exponent = 0;
      binary = 0;
    } else {
      while mantissa % 10 == 0 {
        mantissa /= 10;
        exponent = exponent.checked_add(1).ok_or_else(out_of_range)?;
      }
    }

    Ok(Quantity {
      negative,
      mantissa,
      exponent,
      binary,
      raw: s.to_owned(),
    })
  }
}

impl fmt::Display for Quantity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl fmt::Debug for Quantity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Quantity").field(&self.raw).finish()
  }
}
