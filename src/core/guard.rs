//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over a state. The evaluator uses them to
//! decide whether an input event may act in the current phase.

use super::state::State;
use std::fmt;

/// Pure predicate that determines if a transition can execute.
///
/// A guard wraps a plain function pointer, so it carries no captured data and
/// can be declared as a `const`.
///
/// # Example
///
/// ```rust
/// use keypad::core::{Guard, Phase};
///
/// fn accepting(phase: &Phase) -> bool {
///     !matches!(phase, Phase::Evaluated)
/// }
///
/// const ACCEPTS_DIGITS: Guard<Phase> = Guard::new(accepting);
///
/// assert!(ACCEPTS_DIGITS.check(&Phase::EnteringFirstOperand));
/// assert!(!ACCEPTS_DIGITS.check(&Phase::Evaluated));
/// ```
pub struct Guard<S: State> {
    predicate: fn(&S) -> bool,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub const fn new(predicate: fn(&S) -> bool) -> Self {
        Guard { predicate }
    }

    /// Check if the guard allows a transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: State> Copy for Guard<S> {}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
