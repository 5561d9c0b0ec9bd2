//! Keypad: an event-driven two-operand calculator core.
//!
//! The host application turns button presses or key codes into [`Key`]
//! events, hands them to an [`Evaluator`] one at a time, and renders
//! [`Evaluator::display`] after each. Everything else (buffering digits,
//! deciding when to evaluate, chaining off a previous result, reporting
//! division by zero or overflow) happens here.
//!
//! # Core Concepts
//!
//! - **Phases**: the calculation cycle as an explicit [`Phase`] state
//! - **Guards**: pure predicates deciding which events a phase accepts
//! - **Primitives**: pure `f64` operations in [`arithmetic`] that classify
//!   infinite and NaN results as errors
//! - **Journal**: a bounded record of phase changes for diagnostics
//!
//! # Example
//!
//! ```rust
//! use keypad::{Entry, Evaluator, Key, Operator, Outcome};
//!
//! let mut calc = Evaluator::new();
//! calc.handle(Key::Entry(Entry::Digit(7)));
//! calc.handle(Key::Operator(Operator::Divide));
//! calc.handle(Key::Entry(Entry::Digit(2)));
//! assert_eq!(calc.handle(Key::Equals), Outcome::Applied);
//! assert_eq!(calc.display(), "3.5");
//! ```

pub mod arithmetic;
pub mod config;
pub mod core;
pub mod error;
pub mod evaluator;

// Re-export commonly used types
pub use arithmetic::Operator;
pub use config::EvaluatorConfig;
pub use self::core::{Phase, State, StateHistory, StateTransition};
pub use error::{ArithmeticError, ConfigError, ConfigViolation, ParseOperatorError, Rejection};
pub use evaluator::{Entry, Evaluator, Key, Operand, Outcome, Snapshot};
