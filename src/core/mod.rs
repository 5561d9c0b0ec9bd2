//! Core state machine types.
//!
//! - `State` trait and the `state_enum!` macro
//! - `Phase`, the evaluator's calculation-cycle states
//! - `Guard` predicates over phases
//! - A bounded journal of phase transitions
//!
//! Everything here is pure; the evaluator in [`crate::evaluator`] is the only
//! owner of mutable state.

mod guard;
mod history;
mod macros;
mod phase;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use phase::{Phase, ACCEPTS_DELETE, ACCEPTS_ENTRY};
pub use state::State;
