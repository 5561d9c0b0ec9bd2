//! The evaluator state machine.

use super::key::{Entry, Key};
use super::operand::Operand;
use super::Outcome;
use crate::arithmetic::{classify, format_number, round_to, Operator};
use crate::config::EvaluatorConfig;
use crate::core::{
    Phase, State, StateHistory, StateTransition, ACCEPTS_DELETE, ACCEPTS_ENTRY,
};
use crate::error::{ArithmeticError, ConfigError, Rejection};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Copy of the evaluator's canonical state.
///
/// Two evaluators with equal snapshots react identically to any further
/// input. The journal is deliberately left out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub first: Operand,
    pub second: Operand,
    pub operator: Option<Operator>,
    pub result: Option<f64>,
    pub phase: Phase,
    pub error: Option<ArithmeticError>,
    pub display: String,
}

/// Two-operand calculator driven by discrete key events.
///
/// Digits go to the first operand until an operator is chosen, then to the
/// second. Equals evaluates and freezes the result on screen; an operator
/// pressed after that chains the result into a new calculation.
///
/// # Example
///
/// ```rust
/// use keypad::Evaluator;
///
/// let mut calc = Evaluator::new();
/// calc.feed("2+3=");
/// assert_eq!(calc.display(), "5");
///
/// calc.feed("+4=");
/// assert_eq!(calc.display(), "9");
///
/// calc.feed("/0=");
/// assert_eq!(calc.display(), "Error");
/// assert!(calc.is_error());
/// ```
#[derive(Clone, Debug)]
pub struct Evaluator {
    config: EvaluatorConfig,
    first: Operand,
    second: Operand,
    operator: Option<Operator>,
    result: Option<f64>,
    phase: Phase,
    error: Option<ArithmeticError>,
    display: String,
    journal: StateHistory<Phase>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator with the default configuration.
    pub fn new() -> Self {
        Self::build(EvaluatorConfig::default())
    }

    /// Create an evaluator with a custom configuration.
    pub fn with_config(config: EvaluatorConfig) -> Result<Self, ConfigError> {
        Ok(Self::build(config.validated()?))
    }

    fn build(config: EvaluatorConfig) -> Self {
        let journal = StateHistory::bounded(config.journal_limit);
        Self {
            config,
            first: Operand::default(),
            second: Operand::default(),
            operator: None,
            result: None,
            phase: Phase::default(),
            error: None,
            display: String::new(),
            journal,
        }
    }

    /// Text to render, at most `max_display_len` characters.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.phase.is_error()
    }

    pub fn error(&self) -> Option<ArithmeticError> {
        self.error
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// The last successfully computed, rounded result.
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Phase changes seen so far, oldest first.
    pub fn journal(&self) -> &StateHistory<Phase> {
        &self.journal
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            first: self.first.clone(),
            second: self.second.clone(),
            operator: self.operator,
            result: self.result,
            phase: self.phase,
            error: self.error,
            display: self.display.clone(),
        }
    }

    /// Dispatch one key event.
    pub fn handle(&mut self, key: Key) -> Outcome {
        trace!(%key, phase = self.phase.name(), "handling key");
        match key {
            Key::Entry(entry) => self.append(entry),
            Key::Operator(op) => self.set_operator(op),
            Key::Equals => self.evaluate(),
            Key::Delete => self.delete(),
            Key::Clear => self.clear(),
        }
    }

    /// Handle every character of `input` that maps to a key.
    ///
    /// See [`Key::from_char`] for the mapping. Other characters are skipped.
    pub fn feed(&mut self, input: &str) -> Vec<Outcome> {
        input
            .chars()
            .filter_map(|c| {
                let key = Key::from_char(c);
                if key.is_none() {
                    trace!(?c, "skipping unmapped character");
                }
                key
            })
            .map(|key| self.handle(key))
            .collect()
    }

    /// Append a digit or decimal point to the operand taking input.
    pub fn append(&mut self, entry: Entry) -> Outcome {
        let key = Key::Entry(entry);
        let c = match entry.as_char() {
            Ok(c) => c,
            Err(reason) => return self.ignore(key, reason),
        };

        if !ACCEPTS_ENTRY.check(&self.phase) {
            return self.ignore(key, Rejection::ResultFrozen);
        }

        let cap = self.config.max_display_len;
        let (target, next) = match self.operator {
            None => (&mut self.first, Phase::EnteringFirstOperand),
            Some(_) => (&mut self.second, Phase::EnteringSecondOperand),
        };
        if let Err(reason) = target.push(c, cap) {
            return self.ignore(key, reason);
        }

        self.error = None;
        self.apply(key, next)
    }

    /// Select the pending operator, chaining from a frozen result if there
    /// is one.
    pub fn set_operator(&mut self, op: Operator) -> Outcome {
        let key = Key::Operator(op);
        if !self.first.is_usable() {
            return self.ignore(key, Rejection::MissingOperand);
        }

        let chaining =
            self.operator.is_some() && self.phase == Phase::Evaluated && !self.second.is_empty();
        if chaining {
            if let Some(result) = self.result {
                debug!(result, "chaining from previous result");
                self.first.replace(format_number(result));
            }
            self.second.clear();
        }

        self.operator = Some(op);
        self.apply(key, Phase::EnteringSecondOperand)
    }

    /// Compute `first <op> second`.
    pub fn evaluate(&mut self) -> Outcome {
        let key = Key::Equals;
        let Some(op) = self.operator else {
            return self.ignore(key, Rejection::MissingOperator);
        };
        let (Some(a), Some(b)) = (self.first.value(), self.second.value()) else {
            return self.ignore(key, Rejection::MissingOperand);
        };

        let precision = self.config.precision;
        match op
            .apply(a, b)
            .and_then(|raw| classify(round_to(raw, precision)))
        {
            Ok(value) => {
                debug!(a, %op, b, value, "evaluated");
                self.result = Some(value);
                self.apply(key, Phase::Evaluated)
            }
            Err(err) => self.fail(key, err),
        }
    }

    /// Remove the last character of the operand taking input.
    pub fn delete(&mut self) -> Outcome {
        let key = Key::Delete;
        if self.display.is_empty() || !ACCEPTS_DELETE.check(&self.phase) {
            return self.ignore(key, Rejection::NothingToDelete);
        }
        // A shown result is never edited, even when typed back in.
        let shown_result = self.result.map(|r| self.fit(format_number(r)));
        if shown_result.as_deref() == Some(self.display.as_str()) {
            return self.ignore(key, Rejection::NothingToDelete);
        }

        let target = match self.operator {
            None => &mut self.first,
            Some(_) => &mut self.second,
        };
        if target.pop().is_none() {
            return self.ignore(key, Rejection::NothingToDelete);
        }

        self.apply(key, self.phase)
    }

    /// Reset everything except the journal and configuration.
    pub fn clear(&mut self) -> Outcome {
        self.first.clear();
        self.second.clear();
        self.operator = None;
        self.result = None;
        self.error = None;
        self.apply(Key::Clear, Phase::EnteringFirstOperand)
    }

    fn fail(&mut self, key: Key, err: ArithmeticError) -> Outcome {
        warn!(%err, "arithmetic error; resetting operands");
        self.first.clear();
        self.second.clear();
        self.operator = None;
        self.error = Some(err);
        self.apply(key, Phase::Error);
        Outcome::Failed(err)
    }

    fn ignore(&self, key: Key, reason: Rejection) -> Outcome {
        debug!(%key, %reason, "input ignored");
        Outcome::Ignored(reason)
    }

    fn apply(&mut self, key: Key, next: Phase) -> Outcome {
        if next != self.phase {
            debug!(from = self.phase.name(), to = next.name(), %key, "phase change");
            let transition = StateTransition {
                from: self.phase,
                to: next,
                trigger: key,
                timestamp: Utc::now(),
            };
            self.journal = std::mem::take(&mut self.journal).record(transition);
            self.phase = next;
        }
        self.display = self.render();
        Outcome::Applied
    }

    fn render(&self) -> String {
        let text = match self.phase {
            Phase::Error => self.config.error_token.clone(),
            Phase::Evaluated => self.result.map(format_number).unwrap_or_default(),
            _ if !self.second.is_empty() => self.second.as_str().to_string(),
            _ => self.first.as_str().to_string(),
        };
        self.fit(text)
    }

    fn fit(&self, text: String) -> String {
        text.chars().take(self.config.max_display_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Evaluator {
        let mut calc = Evaluator::new();
        calc.feed(input);
        calc
    }

    #[test]
    fn starts_at_sentinels() {
        let calc = Evaluator::new();
        assert_eq!(calc.display(), "");
        assert_eq!(calc.phase(), Phase::EnteringFirstOperand);
        assert_eq!(calc.operator(), None);
        assert_eq!(calc.result(), None);
        assert!(!calc.is_error());
        assert!(calc.journal().is_empty());
    }

    #[test]
    fn digits_fill_the_first_operand_then_the_second() {
        let mut calc = run("12");
        assert_eq!(calc.display(), "12");

        calc.handle(Key::Operator(Operator::Multiply));
        assert_eq!(calc.display(), "12");
        assert_eq!(calc.phase(), Phase::EnteringSecondOperand);

        calc.feed("34");
        assert_eq!(calc.display(), "34");
        assert_eq!(calc.snapshot().first.as_str(), "12");
    }

    #[test]
    fn second_decimal_point_is_ignored() {
        let mut calc = run("1.2");
        assert_eq!(
            calc.append(Entry::Point),
            Outcome::Ignored(Rejection::DuplicatePoint)
        );
        calc.append(Entry::Digit(5));
        assert_eq!(calc.display(), "1.25");
    }

    #[test]
    fn buffer_stops_at_display_length() {
        let mut calc = run("1234567890");
        assert_eq!(
            calc.append(Entry::Digit(1)),
            Outcome::Ignored(Rejection::BufferFull)
        );
        assert_eq!(calc.display(), "1234567890");
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let mut calc = Evaluator::new();
        assert_eq!(
            calc.append(Entry::Digit(11)),
            Outcome::Ignored(Rejection::InvalidDigit(11))
        );
        assert_eq!(calc.snapshot(), Evaluator::new().snapshot());
    }

    #[test]
    fn operator_needs_a_usable_first_operand() {
        let mut calc = Evaluator::new();
        assert_eq!(
            calc.set_operator(Operator::Add),
            Outcome::Ignored(Rejection::MissingOperand)
        );

        calc.append(Entry::Point);
        assert_eq!(
            calc.set_operator(Operator::Add),
            Outcome::Ignored(Rejection::MissingOperand)
        );
        assert_eq!(calc.operator(), None);
    }

    #[test]
    fn new_operator_replaces_pending_one() {
        let mut calc = run("8+");
        calc.handle(Key::Operator(Operator::Subtract));
        assert_eq!(calc.operator(), Some(Operator::Subtract));

        calc.feed("3=");
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn evaluate_without_operator_or_operand_is_a_no_op() {
        let mut calc = run("4");
        assert_eq!(
            calc.evaluate(),
            Outcome::Ignored(Rejection::MissingOperator)
        );

        calc.feed("+");
        let before = calc.snapshot();
        assert_eq!(calc.evaluate(), Outcome::Ignored(Rejection::MissingOperand));
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn result_is_rounded_to_three_places() {
        let calc = run("2/3=");
        assert_eq!(calc.result(), Some(0.667));
        assert_eq!(calc.display(), "0.667");
    }

    #[test]
    fn zero_result_is_a_real_result() {
        let calc = run("5-5=");
        assert_eq!(calc.result(), Some(0.0));
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.phase(), Phase::Evaluated);
    }

    #[test]
    fn digits_are_refused_while_result_is_frozen() {
        let mut calc = run("2+3=");
        assert_eq!(
            calc.append(Entry::Digit(7)),
            Outcome::Ignored(Rejection::ResultFrozen)
        );
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn operator_after_result_chains() {
        let mut calc = run("2+3=");
        calc.handle(Key::Operator(Operator::Add));

        let snap = calc.snapshot();
        assert_eq!(snap.first.as_str(), "5");
        assert!(snap.second.is_empty());
        assert_eq!(snap.phase, Phase::EnteringSecondOperand);

        calc.feed("4=");
        assert_eq!(calc.display(), "9");
    }

    #[test]
    fn repeated_equals_recomputes_the_same_pair() {
        let mut calc = run("2+3=");
        calc.evaluate();
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn division_by_zero_resets_operands() {
        let mut calc = run("7/0");
        assert_eq!(
            calc.evaluate(),
            Outcome::Failed(ArithmeticError::DivisionByZero)
        );
        assert_eq!(calc.display(), "Error");
        assert!(calc.is_error());
        assert_eq!(calc.operator(), None);
        assert_eq!(calc.error(), Some(ArithmeticError::DivisionByZero));

        calc.feed("5");
        assert_eq!(calc.display(), "5");
        assert!(!calc.is_error());
        assert_eq!(calc.phase(), Phase::EnteringFirstOperand);
    }

    #[test]
    fn failed_evaluation_keeps_previous_result() {
        let mut calc = run("2*3=");
        calc.feed("/0=");
        assert!(calc.is_error());
        assert_eq!(calc.result(), Some(6.0));
    }

    #[test]
    fn power_overflow_and_nan_are_errors() {
        let mut calc = run("9^999=");
        assert_eq!(calc.error(), Some(ArithmeticError::Overflow));

        calc.clear();
        calc.feed("0^");
        calc.feed("0=");
        assert_eq!(calc.display(), "1");

        calc.clear();
        calc.feed("0/0=");
        assert_eq!(calc.error(), Some(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn operator_and_delete_are_ignored_in_error() {
        let mut calc = run("1%0=");
        assert_eq!(
            calc.set_operator(Operator::Add),
            Outcome::Ignored(Rejection::MissingOperand)
        );
        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));
        assert_eq!(calc.display(), "Error");
    }

    #[test]
    fn delete_edits_the_active_operand() {
        let mut calc = run("45+67");
        assert_eq!(calc.delete(), Outcome::Applied);
        assert_eq!(calc.display(), "6");
        calc.delete();
        assert_eq!(calc.display(), "45");
        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));
        assert_eq!(calc.snapshot().first.as_str(), "45");
    }

    #[test]
    fn delete_cannot_touch_a_result() {
        let mut calc = run("2+3=");
        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));

        calc.feed("+");
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));
    }

    #[test]
    fn delete_cannot_touch_a_retyped_result() {
        let mut calc = run("2*3=/0=6");
        assert_eq!(calc.display(), "6");
        assert_eq!(calc.result(), Some(6.0));

        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));
        assert_eq!(calc.display(), "6");
        assert_eq!(calc.snapshot().first.as_str(), "6");

        calc.feed("1");
        assert_eq!(calc.delete(), Outcome::Applied);
        assert_eq!(calc.display(), "6");
    }

    #[test]
    fn delete_compares_against_the_truncated_result() {
        let mut calc = run("999999*999999=/0=9999980000");
        assert_eq!(calc.result(), Some(999_998_000_001.0));
        assert_eq!(calc.display(), "9999980000");
        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));
    }

    #[test]
    fn delete_on_empty_display_is_ignored() {
        let mut calc = Evaluator::new();
        assert_eq!(calc.delete(), Outcome::Ignored(Rejection::NothingToDelete));
    }

    #[test]
    fn clear_restores_initial_state() {
        let mut calc = run("12.5*4=+");
        assert_eq!(calc.clear(), Outcome::Applied);
        assert_eq!(calc.snapshot(), Evaluator::new().snapshot());
    }

    #[test]
    fn long_results_are_truncated_not_rounded() {
        let calc = run("99999*99999=");
        assert_eq!(calc.result(), Some(9_999_800_001.0));
        assert_eq!(calc.display(), "9999800001");

        let calc = run("1/7=");
        assert_eq!(calc.display(), "0.143");

        let calc = run("999999*999999=");
        assert_eq!(calc.display(), "9999980000");
    }

    #[test]
    fn journal_records_phase_changes_only() {
        let calc = run("12+3=");
        let path: Vec<Phase> = calc.journal().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![
                Phase::EnteringFirstOperand,
                Phase::EnteringSecondOperand,
                Phase::Evaluated
            ]
        );
        let triggers: Vec<Key> = calc.journal().transitions().map(|t| t.trigger).collect();
        assert_eq!(triggers, vec![Key::Operator(Operator::Add), Key::Equals]);
    }

    #[test]
    fn custom_config_changes_token_width_and_precision() {
        let config = EvaluatorConfig {
            max_display_len: 4,
            precision: 1,
            error_token: "E".to_string(),
            journal_limit: 2,
        };
        let mut calc = Evaluator::with_config(config).unwrap();

        calc.feed("123456");
        assert_eq!(calc.display(), "1234");

        calc.feed("/3=");
        assert_eq!(calc.display(), "411.");
        assert_eq!(calc.result(), Some(411.3));

        calc.feed("/0=");
        assert_eq!(calc.display(), "E");
        assert_eq!(calc.journal().len(), 2);
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = EvaluatorConfig {
            max_display_len: 0,
            ..EvaluatorConfig::default()
        };
        assert!(matches!(
            Evaluator::with_config(config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn snapshot_serializes() {
        let calc = run("3^2=");
        let json = serde_json::to_string(&calc.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, calc.snapshot());
        assert!(json.contains("\"operator\":\"^\""));
    }
}
