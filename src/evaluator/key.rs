//! Input events.
//!
//! The host maps whatever it has (buttons, key codes) to [`Key`]s; the
//! evaluator never sees raw input.

use crate::arithmetic::Operator;
use crate::error::Rejection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A character the evaluator will append to an operand buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entry {
    /// A decimal digit, `0..=9`.
    Digit(u8),
    Point,
}

impl Entry {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Point),
            _ => c.to_digit(10).map(|d| Self::Digit(d as u8)),
        }
    }

    /// The character this entry adds to an operand buffer.
    pub fn as_char(self) -> Result<char, Rejection> {
        match self {
            Self::Point => Ok('.'),
            Self::Digit(d) => {
                char::from_digit(u32::from(d), 10).ok_or(Rejection::InvalidDigit(d))
            }
        }
    }
}

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Entry(Entry),
    Operator(Operator),
    Equals,
    Delete,
    Clear,
}

impl Key {
    /// Map a typed character.
    ///
    /// Digits, `.` and the operator symbols map to themselves; `=` is
    /// equals, `<` is delete and `c`/`C` is clear.
    ///
    /// ```rust
    /// use keypad::{Key, Operator};
    ///
    /// assert_eq!(Key::from_char('^'), Some(Key::Operator(Operator::Power)));
    /// assert_eq!(Key::from_char('<'), Some(Key::Delete));
    /// assert_eq!(Key::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Equals),
            '<' => Some(Self::Delete),
            'c' | 'C' => Some(Self::Clear),
            _ => Entry::from_char(c)
                .map(Self::Entry)
                .or_else(|| Operator::from_symbol(c).map(Self::Operator)),
        }
    }

    /// Map a keyboard key name as reported by browsers and most toolkits.
    ///
    /// ```rust
    /// use keypad::Key;
    ///
    /// assert_eq!(Key::from_key_name("Enter"), Some(Key::Equals));
    /// assert_eq!(Key::from_key_name("Backspace"), Some(Key::Delete));
    /// assert_eq!(Key::from_key_name("Escape"), Some(Key::Clear));
    /// ```
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(Self::Equals),
            "Backspace" => Some(Self::Delete),
            "Escape" | "Delete" => Some(Self::Clear),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    // Letters are not keypad keys when named.
                    (Some(c), None) if !c.is_alphabetic() => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }
}

impl From<Entry> for Key {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}

impl From<Operator> for Key {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(Entry::Digit(d)) => write!(f, "{d}"),
            Self::Entry(Entry::Point) => f.write_str("."),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Delete => f.write_str("DEL"),
            Self::Clear => f.write_str("C"),
        }
    }
}
