//! Phases of a calculation cycle.

use super::guard::Guard;

crate::state_enum! {
    /// Where the evaluator stands in the current calculation cycle.
    ///
    /// `EnteringFirstOperand -> EnteringSecondOperand -> Evaluated`, with a
    /// chain back to `EnteringSecondOperand` when an operator follows a
    /// result. `Error` is reachable from any phase that can evaluate and is
    /// left only by clearing or by typing a fresh operand.
    #[derive(Default)]
    pub enum Phase {
        #[default]
        EnteringFirstOperand,
        EnteringSecondOperand,
        Evaluated,
        Error,
    }
    final: [Error]
    error: [Error]
}

fn not_frozen(phase: &Phase) -> bool {
    !matches!(phase, Phase::Evaluated)
}

fn showing_input(phase: &Phase) -> bool {
    matches!(
        phase,
        Phase::EnteringFirstOperand | Phase::EnteringSecondOperand
    )
}

/// Digit entry is refused while a result is frozen on the display.
pub const ACCEPTS_ENTRY: Guard<Phase> = Guard::new(not_frozen);

/// Deletion only edits an operand being typed, never a result or error.
pub const ACCEPTS_DELETE: Guard<Phase> = Guard::new(showing_input);
