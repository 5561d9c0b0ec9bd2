//! Phase transition journal.
//!
//! Keeps an ordered, bounded record of phase changes with the input that
//! caused each one. Used for diagnostics only; it never feeds back into the
//! evaluator's decisions.

use super::state::State;
use crate::evaluator::Key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use keypad::core::{Phase, StateTransition};
/// use keypad::{Key, Operator};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::EnteringFirstOperand,
///     to: Phase::EnteringSecondOperand,
///     trigger: Key::Operator(Operator::Add),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.trigger.to_string(), "+");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The input event that caused the change
    pub trigger: Key,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// The history may be bounded; once `limit` entries are held, recording a
/// new one discards the oldest.
///
/// # Example
///
/// ```rust
/// use keypad::core::{Phase, StateHistory, StateTransition};
/// use keypad::{Key, Operator};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Phase::EnteringFirstOperand,
///         to: Phase::EnteringSecondOperand,
///         trigger: Key::Operator(Operator::Multiply),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Phase::EnteringSecondOperand,
///         to: Phase::Evaluated,
///         trigger: Key::Equals,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &Phase::Evaluated);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` transitions.
    ///
    /// A limit of zero is treated as one.
    pub fn bounded(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            transitions: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning the updated history.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        if let Some(limit) = self.limit {
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    /// All retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
