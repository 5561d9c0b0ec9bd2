//! The input-accumulation and evaluation state machine.
//!
//! One [`Evaluator`] owns all mutable state. The host forwards [`Key`]
//! events to it and renders [`Evaluator::display`] after each one.
//!
//! Policy choices:
//! - An arithmetic error clears both operands and the operator. The last
//!   good result is kept but no longer shown; the next digit starts over.
//! - Choosing an operator does not change the display.
//! - Delete only edits the operand currently taking input, and never while
//!   the display matches the stored result or shows an error.

mod key;
mod machine;
mod operand;

pub use key::{Entry, Key};
pub use machine::{Evaluator, Snapshot};
pub use operand::Operand;

use crate::error::{ArithmeticError, Rejection};

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or was refreshed) as requested.
    Applied,
    /// The event was dropped and state is unchanged.
    Ignored(Rejection),
    /// Evaluation failed; the display shows the error token.
    Failed(ArithmeticError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
