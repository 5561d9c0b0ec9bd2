//! The `State` trait for evaluator phases.
//!
//! A phase is a coarse, inspectable summary of where the evaluator is in a
//! calculation cycle. All methods are pure.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// States are small immutable values. They must be serializable so a
/// journal of phase changes can be exported for diagnostics.
///
/// # Example
///
/// ```rust
/// use keypad::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Lamp {
///     Off,
///     On,
///     Broken,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert_eq!(Lamp::On.name(), "On");
/// assert!(Lamp::Broken.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and journals.
    fn name(&self) -> &str;

    /// Whether this state ends the current cycle.
    ///
    /// Leaving a final state requires an explicit reset. Default is `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state represents a failure. Default is `false`.
    fn is_error(&self) -> bool {
        false
    }
}
