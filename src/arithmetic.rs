//! Binary operators and the pure arithmetic primitives behind them.
//!
//! Every primitive takes two finite numbers and either returns a finite
//! number or an [`ArithmeticError`]. Zero divisors are rejected up front;
//! anything else that comes out infinite or NaN is caught by [`classify`].

use crate::error::{ArithmeticError, ParseOperatorError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the six binary operators the keypad offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulo,
        Operator::Power,
    ];

    /// The keypad symbol for this operator.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => '%',
            Self::Power => '^',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator to `a` and `b`.
    ///
    /// ```rust
    /// use keypad::{ArithmeticError, Operator};
    ///
    /// assert_eq!(Operator::Power.apply(2.0, 10.0), Ok(1024.0));
    /// assert_eq!(Operator::Modulo.apply(7.0, 0.0), Err(ArithmeticError::DivisionByZero));
    /// ```
    pub fn apply(self, a: f64, b: f64) -> Result<f64, ArithmeticError> {
        let primitive: fn(f64, f64) -> Result<f64, ArithmeticError> = match self {
            Self::Add => add,
            Self::Subtract => subtract,
            Self::Multiply => multiply,
            Self::Divide => divide,
            Self::Modulo => modulo,
            Self::Power => power,
        };
        primitive(a, b)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let op = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c),
            _ => None,
        };
        op.ok_or_else(|| ParseOperatorError(s.to_string()))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        symbol.parse().map_err(serde::de::Error::custom)
    }
}

/// True for `+∞`, `-∞` and NaN.
pub fn is_erroneous(x: f64) -> bool {
    x.is_infinite() || x.is_nan()
}

/// Pass finite values through; map the rest to the matching error.
pub fn classify(x: f64) -> Result<f64, ArithmeticError> {
    if x.is_nan() {
        Err(ArithmeticError::NotANumber)
    } else if x.is_infinite() {
        Err(ArithmeticError::Overflow)
    } else {
        Ok(x)
    }
}

pub fn add(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    classify(a + b)
}

pub fn subtract(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    classify(a - b)
}

pub fn multiply(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    classify(a * b)
}

pub fn divide(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    classify(a / b)
}

/// Floating-point remainder; the sign follows the dividend.
pub fn modulo(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    classify(a % b)
}

pub fn power(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    classify(a.powf(b))
}

/// Round half away from zero to `places` decimals.
///
/// Values too large to scale are already integral at this precision and are
/// returned as they are. Negative zero comes back as zero.
///
/// ```rust
/// use keypad::arithmetic::round_to;
///
/// assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
/// assert_eq!(round_to(-0.0004, 3), 0.0);
/// ```
pub fn round_to(x: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = x * factor;
    if !scaled.is_finite() {
        return x;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Plain decimal rendering of a finite number, without exponent notation.
pub fn format_number(x: f64) -> String {
    x.to_string()
}
