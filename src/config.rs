//! Evaluator configuration.
//!
//! Validation follows the accumulate-everything approach: every rule is run
//! and all violations are reported together, rather than stopping at the
//! first one.

use crate::error::{ConfigError, ConfigViolation};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Largest supported rounding precision. Beyond this an `f64` has no
/// meaningful decimal digits left to round.
pub const MAX_PRECISION: u32 = 15;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Tunables for an [`Evaluator`](crate::Evaluator).
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change.
///
/// ```rust
/// use keypad::EvaluatorConfig;
///
/// let config = EvaluatorConfig::from_json(r#"{ "precision": 2 }"#).unwrap();
/// assert_eq!(config.precision, 2);
/// assert_eq!(config.max_display_len, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Display width in characters; operand buffers are capped at it too.
    pub max_display_len: usize,
    /// Decimal places results are rounded to.
    pub precision: u32,
    /// Text shown after an arithmetic error.
    pub error_token: String,
    /// Number of phase changes kept in the journal.
    pub journal_limit: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_display_len: 10,
            precision: 3,
            error_token: "Error".to_string(),
            journal_limit: 64,
        }
    }
}

impl EvaluatorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Run every rule, collecting all violations.
    pub fn validate(&self) -> Check {
        let checks = vec![
            rule(self.max_display_len >= 1, || ConfigViolation::DisplayTooShort),
            rule(self.precision <= MAX_PRECISION, || {
                ConfigViolation::PrecisionTooHigh {
                    precision: self.precision,
                    max: MAX_PRECISION,
                }
            }),
            rule(!self.error_token.is_empty(), || {
                ConfigViolation::EmptyErrorToken
            }),
            rule(
                self.error_token.chars().count() <= self.max_display_len,
                || ConfigViolation::ErrorTokenTooLong {
                    token: self.error_token.clone(),
                    max_display_len: self.max_display_len,
                },
            ),
            rule(self.journal_limit >= 1, || ConfigViolation::EmptyJournal),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Return `self` if it passes [`validate`](Self::validate).
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

fn rule(holds: bool, violation: impl FnOnce() -> ConfigViolation) -> Check {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}
