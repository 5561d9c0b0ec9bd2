//! Operand buffers.

use crate::error::Rejection;
use serde::{Deserialize, Serialize};

/// Text accumulated for one side of a binary operation.
///
/// Holds digits and at most one decimal point, or a stringified previous
/// result when chaining. The empty buffer means "unset".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operand(String);

impl Operand {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_lone_point(&self) -> bool {
        self.0 == "."
    }

    pub fn has_point(&self) -> bool {
        self.0.contains('.')
    }

    /// True if the buffer has something an operator can act on.
    pub fn is_usable(&self) -> bool {
        !self.is_empty() && !self.is_lone_point()
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Append `c` unless it is a second point or the buffer holds `cap`
    /// characters already. Extra digits are dropped, never shifted in.
    pub fn push(&mut self, c: char, cap: usize) -> Result<(), Rejection> {
        if c == '.' && self.has_point() {
            return Err(Rejection::DuplicatePoint);
        }
        if self.len() >= cap {
            return Err(Rejection::BufferFull);
        }
        self.0.push(c);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// The buffer as a finite number, if it parses as one.
    pub fn value(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn replace(&mut self, text: String) {
        self.0 = text;
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
