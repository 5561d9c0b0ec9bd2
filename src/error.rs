//! Error types.
//!
//! Nothing here is fatal. A [`Rejection`] means an input event was dropped
//! without changing state; an [`ArithmeticError`] is shown to the user as the
//! error token and resets the calculation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric failure raised by an arithmetic primitive.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("result overflowed to infinity")]
    Overflow,

    #[error("result is not a number")]
    NotANumber,
}

/// Reason an input event was ignored.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    #[error("a result is shown; press an operator or clear first")]
    ResultFrozen,

    #[error("operand already contains a decimal point")]
    DuplicatePoint,

    #[error("operand is at the display length limit")]
    BufferFull,

    #[error("no usable operand")]
    MissingOperand,

    #[error("no operator selected")]
    MissingOperator,

    #[error("nothing on screen can be deleted")]
    NothingToDelete,

    #[error("digit {0} is out of range 0-9")]
    InvalidDigit(u8),
}

/// Operator symbol that is not one of `+ - * / % ^`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown operator '{0}'")]
pub struct ParseOperatorError(pub String);

/// A single problem found while validating an evaluator configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("max_display_len must be at least 1")]
    DisplayTooShort,

    #[error("precision {precision} exceeds the maximum of {max}")]
    PrecisionTooHigh { precision: u32, max: u32 },

    #[error("error_token must not be empty")]
    EmptyErrorToken,

    #[error("error_token '{token}' is longer than the display ({max_display_len} chars)")]
    ErrorTokenTooLong {
        token: String,
        max_display_len: usize,
    },

    #[error("journal_limit must be at least 1")]
    EmptyJournal,
}

/// Errors that can occur when loading an evaluator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration is invalid: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
