//! Weighted, composable strength evaluation for candidate secrets.
//!
//! This module provides:
//! - [`StrengthEvaluator`] — an ordered collection of rules folded into one
//!   normalized score
//! - [`EvaluationRule`] — a named, weighted, enable-able scoring rule
//! - [`Scorer`] — the pluggable scoring trait (closures qualify)
//! - [`Weight`] / [`SignedLevel`] — the tagged weight model
//! - [`RuleOutcome`] / [`EvaluationReport`] — per-rule and aggregate results
//!
//! # Rule order is a contract
//!
//! Rules run in insertion order, and the first critical outcome stops the
//! evaluation: rules after it are never invoked. Callers composing custom
//! rule sets should therefore place gatekeeper rules (minimum length,
//! blacklists) before advisory ones. Ordering is exposed through
//! [`StrengthEvaluator::rules`] and [`StrengthEvaluator::insert_rule`].

use crate::error::SecretError;
use crate::memory::SecretBuffer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Details line attached to an evaluation of an empty secret.
const EMPTY_SECRET_DETAILS: &str = "a secret is required";

/// Details line attached when no rule contributed to the denominator.
const NO_ACTIVE_RULES_DETAILS: &str = "no active rules";

// ---------------------------------------------------------------------------
// Weight model
// ---------------------------------------------------------------------------

/// One of 14 discrete signed weight levels.
///
/// Positive levels reward a rule's score; adverse (negative) levels turn it
/// into a penalty while still counting its magnitude toward the normalizing
/// denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i8)]
pub enum SignedLevel {
    /// −7
    AdverseExtreme = -7,
    /// −6
    AdverseSevere = -6,
    /// −5
    AdverseHigh = -5,
    /// −4
    AdverseNormal = -4,
    /// −3
    AdverseModerate = -3,
    /// −2
    AdverseLow = -2,
    /// −1
    AdverseMinimal = -1,
    /// 1
    Minimal = 1,
    /// 2
    Low = 2,
    /// 3
    Moderate = 3,
    /// 4
    Normal = 4,
    /// 5
    High = 5,
    /// 6
    Severe = 6,
    /// 7
    Extreme = 7,
}

impl SignedLevel {
    /// The signed integer value of this level.
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i8 as i32
    }
}

/// A rule's weight: either disabled or rated at a [`SignedLevel`].
///
/// The original design used `0` as a magic "disabled" weight whose setter
/// also flipped the enabled flag. The tagged variant removes that coupling:
/// there is no zero level, and a `Disabled` weight simply makes
/// [`EvaluationRule::is_enabled`] false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weight {
    /// The rule does not participate in evaluation.
    Disabled,
    /// The rule participates with the given signed level.
    Rated(SignedLevel),
}

impl Weight {
    /// Signed contribution factor: 0 when disabled.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Disabled => 0,
            Self::Rated(level) => level.value(),
        }
    }

    /// Absolute value, used for the normalizing denominator.
    #[must_use]
    pub const fn magnitude(self) -> u32 {
        self.value().unsigned_abs()
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of one rule scoring one secret.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleOutcome {
    /// Raw score in `[0, 1]`. Anything outside that range is a contract
    /// violation by the rule author, surfaced as
    /// [`SecretError::RuleContract`].
    pub raw_score: f64,
    /// Optional human-readable note accumulated into the report.
    pub details: Option<String>,
    /// A critical outcome zeroes the whole evaluation and stops it.
    pub critical: bool,
}

impl RuleOutcome {
    /// A plain score with no details.
    #[must_use]
    pub const fn score(raw_score: f64) -> Self {
        Self {
            raw_score,
            details: None,
            critical: false,
        }
    }

    /// A score with an attached details line.
    #[must_use]
    pub const fn with_details(raw_score: f64, details: String) -> Self {
        Self {
            raw_score,
            details: Some(details),
            critical: false,
        }
    }

    /// A critical failure: forces the evaluation to zero and halts it.
    #[must_use]
    pub const fn critical(details: String) -> Self {
        Self {
            raw_score: 0.0,
            details: Some(details),
            critical: true,
        }
    }
}

/// Aggregate result of one evaluation. Fresh per call; serializable so a
/// UI layer can ship it across a process boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Normalized score in `[0, 1]`.
    pub score: f64,
    /// Newline-joined details lines from the rules that ran.
    pub details: String,
    /// `true` when a critical outcome (or empty secret / empty rule set)
    /// forced the score to zero.
    pub critical: bool,
}

impl EvaluationReport {
    fn zero(details: String) -> Self {
        Self {
            score: 0.0,
            details,
            critical: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A scoring function over a secret.
///
/// Implemented by the built-in catalog scorers; any
/// `Fn(&SecretBuffer) -> RuleOutcome` closure qualifies through the blanket
/// impl, so callers can supply ad-hoc rules without defining a type.
pub trait Scorer: Send + Sync {
    /// Score one secret. Must return a raw score in `[0, 1]`.
    fn score(&self, secret: &SecretBuffer) -> RuleOutcome;
}

impl<F> Scorer for F
where
    F: Fn(&SecretBuffer) -> RuleOutcome + Send + Sync,
{
    fn score(&self, secret: &SecretBuffer) -> RuleOutcome {
        self(secret)
    }
}

/// A named, weighted, enable-able scoring rule.
pub struct EvaluationRule {
    name: String,
    description: String,
    weight: Weight,
    explicit_enable: bool,
    extra_credit: bool,
    scorer: Box<dyn Scorer>,
}

impl EvaluationRule {
    /// A rule with default configuration: weight `Normal`, enabled, not
    /// extra-credit.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        scorer: impl Scorer + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            weight: Weight::Rated(SignedLevel::Normal),
            explicit_enable: true,
            extra_credit: false,
            scorer: Box::new(scorer),
        }
    }

    /// Override the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Override the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the rule as extra-credit: its score feeds the numerator but its
    /// weight is excluded from the normalizing denominator.
    #[must_use]
    pub fn with_extra_credit(mut self, extra_credit: bool) -> Self {
        self.extra_credit = extra_credit;
        self
    }

    /// Set the explicit enable flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.explicit_enable = enabled;
        self
    }

    /// Rule name, used for lookup and in contract-violation reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current weight.
    #[must_use]
    pub const fn weight(&self) -> Weight {
        self.weight
    }

    /// Whether the rule is excluded from the normalizing denominator.
    #[must_use]
    pub const fn is_extra_credit(&self) -> bool {
        self.extra_credit
    }

    /// Effective enablement — derived, not stored: a rule runs iff it is
    /// explicitly enabled *and* its weight is not `Disabled`.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.explicit_enable && !matches!(self.weight, Weight::Disabled)
    }

    /// Change the weight. Takes effect on the next evaluation.
    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Change the explicit enable flag. Takes effect on the next evaluation.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.explicit_enable = enabled;
    }
}

impl fmt::Debug for EvaluationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationRule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .field("enabled", &self.is_enabled())
            .field("extra_credit", &self.extra_credit)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Aggregates an ordered set of [`EvaluationRule`]s into one normalized
/// score.
///
/// Mutation requires `&mut self` while evaluation takes `&self`, so the
/// "no configuration changes concurrent with evaluation" contract is
/// enforced by the borrow checker rather than by documentation.
#[derive(Debug, Default)]
pub struct StrengthEvaluator {
    rules: Vec<EvaluationRule>,
}

impl StrengthEvaluator {
    /// An evaluator with no rules. Evaluating anything non-empty against it
    /// reports a critical "no active rules" result.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// An evaluator loaded with the standard opinionated rule bundle.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: crate::rules::standard_rule_set(),
        }
    }

    /// Append a rule at the end of the evaluation order.
    pub fn push_rule(&mut self, rule: EvaluationRule) {
        self.rules.push(rule);
    }

    /// Insert a rule at `index` in the evaluation order (clamped to the
    /// current length).
    pub fn insert_rule(&mut self, index: usize, rule: EvaluationRule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    /// Remove and return the first rule with the given name.
    pub fn remove_rule(&mut self, name: &str) -> Option<EvaluationRule> {
        let index = self.rules.iter().position(|r| r.name() == name)?;
        Some(self.rules.remove(index))
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[EvaluationRule] {
        &self.rules
    }

    /// Mutable access to the first rule with the given name, for toggling
    /// enablement or weight between evaluations.
    pub fn rule_mut(&mut self, name: &str) -> Option<&mut EvaluationRule> {
        self.rules.iter_mut().find(|r| r.name() == name)
    }

    /// Evaluate a secret against the enabled rules, in insertion order.
    ///
    /// - An empty secret short-circuits to a critical zero report without
    ///   invoking any rule.
    /// - The first critical rule outcome stops the iteration; later rules
    ///   never run.
    /// - Extra-credit rules feed the numerator only, so they can lift the
    ///   score above what the denominator alone allows — the final clamp
    ///   to `[0, 1]` is intentional.
    /// - If no enabled rule contributed to the denominator, the report is
    ///   critical with a "no active rules" note.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::RuleContract`] if a scorer returns a raw
    /// score outside `[0, 1]` — a rule-authoring bug, reported instead of
    /// being clamped away.
    pub fn evaluate(&self, secret: &SecretBuffer) -> Result<EvaluationReport, SecretError> {
        if secret.is_empty() {
            return Ok(EvaluationReport::zero(EMPTY_SECRET_DETAILS.to_owned()));
        }

        let mut total_weighted = 0.0_f64;
        let mut total_weight: u32 = 0;
        let mut details: Vec<String> = Vec::new();

        for rule in self.rules.iter().filter(|r| r.is_enabled()) {
            let outcome = rule.scorer.score(secret);

            if !(0.0..=1.0).contains(&outcome.raw_score) {
                return Err(SecretError::RuleContract {
                    rule: rule.name().to_owned(),
                    score: outcome.raw_score,
                });
            }

            if let Some(text) = outcome.details {
                if !text.is_empty() {
                    details.push(text);
                }
            }

            if outcome.critical {
                return Ok(EvaluationReport::zero(details.join("\n")));
            }

            total_weighted += outcome.raw_score * f64::from(rule.weight().value());
            if !rule.is_extra_credit() {
                total_weight = total_weight.saturating_add(rule.weight().magnitude());
            }
        }

        if total_weight == 0 {
            details.push(NO_ACTIVE_RULES_DETAILS.to_owned());
            return Ok(EvaluationReport::zero(details.join("\n")));
        }

        Ok(EvaluationReport {
            score: (total_weighted / f64::from(total_weight)).clamp(0.0, 1.0),
            details: details.join("\n"),
            critical: false,
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn secret(text: &str) -> SecretBuffer {
        SecretBuffer::from_text(text).expect("secret allocation should succeed")
    }

    fn fixed(score: f64) -> impl Scorer {
        move |_: &SecretBuffer| RuleOutcome::score(score)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "score {actual} != expected {expected}"
        );
    }

    #[test]
    fn empty_secret_is_critical_without_invoking_rules() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new(
            "must-not-run",
            "panics if invoked",
            |_: &SecretBuffer| -> RuleOutcome { panic!("rule invoked on empty secret") },
        ));

        let report = evaluator
            .evaluate(&secret(""))
            .expect("evaluate should succeed");
        assert_eq!(report.score, 0.0);
        assert!(report.critical);
        assert_eq!(report.details, EMPTY_SECRET_DETAILS);
    }

    #[test]
    fn no_rules_is_critical() {
        let evaluator = StrengthEvaluator::new();
        let report = evaluator
            .evaluate(&secret("something"))
            .expect("evaluate should succeed");
        assert!(report.critical);
        assert_eq!(report.score, 0.0);
        assert!(report.details.contains("no active rules"));
    }

    #[test]
    fn single_rule_full_score() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("full", "always 1", fixed(1.0)));
        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_close(report.score, 1.0);
        assert!(!report.critical);
    }

    #[test]
    fn weighted_average_of_two_rules() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("a", "", fixed(1.0))); // Normal = 4
        evaluator.push_rule(
            EvaluationRule::new("b", "", fixed(0.5)).with_weight(Weight::Rated(SignedLevel::Low)),
        ); // 0.5 * 2 = 1

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        // (4 + 1) / (4 + 2)
        assert_close(report.score, 5.0 / 6.0);
    }

    #[test]
    fn adverse_rule_penalizes() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("good", "", fixed(1.0))); // +4
        evaluator.push_rule(
            EvaluationRule::new("bad", "", fixed(1.0))
                .with_weight(Weight::Rated(SignedLevel::AdverseNormal)),
        ); // -4

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        // (4 - 4) / (4 + 4) = 0
        assert_close(report.score, 0.0);
        assert!(!report.critical);
    }

    #[test]
    fn negative_aggregate_clamps_to_zero() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(
            EvaluationRule::new("penalty", "", fixed(1.0))
                .with_weight(Weight::Rated(SignedLevel::AdverseNormal)),
        );
        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_close(report.score, 0.0);
    }

    #[test]
    fn extra_credit_excluded_from_denominator() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("base", "", fixed(0.5))); // 2 / 4
        evaluator.push_rule(
            EvaluationRule::new("bonus", "", fixed(1.0))
                .with_weight(Weight::Rated(SignedLevel::Low))
                .with_extra_credit(true),
        ); // +2 numerator only

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        // (0.5*4 + 1*2) / 4 = 1.0
        assert_close(report.score, 1.0);
    }

    #[test]
    fn extra_credit_overflow_clamps_to_one() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("base", "", fixed(1.0)));
        evaluator.push_rule(
            EvaluationRule::new("bonus", "", fixed(1.0))
                .with_weight(Weight::Rated(SignedLevel::Extreme))
                .with_extra_credit(true),
        );

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        // (4 + 7) / 4 would be 2.75 — clamped.
        assert_close(report.score, 1.0);
    }

    #[test]
    fn only_extra_credit_rules_is_critical() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("bonus", "", fixed(1.0)).with_extra_credit(true));

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert!(report.critical);
        assert_eq!(report.score, 0.0);
        assert!(report.details.contains("no active rules"));
    }

    #[test]
    fn critical_rule_short_circuits_in_insertion_order() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let after_critical = Arc::clone(&invoked);

        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("first", "", fixed(1.0)));
        evaluator.push_rule(EvaluationRule::new("gate", "", |_: &SecretBuffer| {
            RuleOutcome::critical("gate closed".to_owned())
        }));
        evaluator.push_rule(EvaluationRule::new(
            "after",
            "",
            move |_: &SecretBuffer| {
                after_critical.fetch_add(1, Ordering::SeqCst);
                RuleOutcome::score(1.0)
            },
        ));

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert!(report.critical);
        assert_eq!(report.score, 0.0);
        assert!(report.details.contains("gate closed"));
        assert_eq!(
            invoked.load(Ordering::SeqCst),
            0,
            "rules after the critical one must not run"
        );
    }

    #[test]
    fn details_accumulate_in_rule_order() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("a", "", |_: &SecretBuffer| {
            RuleOutcome::with_details(1.0, "first note".to_owned())
        }));
        evaluator.push_rule(EvaluationRule::new("b", "", fixed(1.0)));
        evaluator.push_rule(EvaluationRule::new("c", "", |_: &SecretBuffer| {
            RuleOutcome::with_details(1.0, "second note".to_owned())
        }));

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_eq!(report.details, "first note\nsecond note");
    }

    #[test]
    fn out_of_range_score_is_a_contract_error() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("broken", "", fixed(1.5)));

        let err = evaluator
            .evaluate(&secret("abc"))
            .expect_err("out-of-range score must error");
        match err {
            SecretError::RuleContract { rule, score } => {
                assert_eq!(rule, "broken");
                assert!((score - 1.5).abs() < f64::EPSILON);
            }
            other => panic!("expected RuleContract, got {other:?}"),
        }
    }

    #[test]
    fn negative_score_is_a_contract_error() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("broken", "", fixed(-0.1)));
        assert!(matches!(
            evaluator.evaluate(&secret("abc")),
            Err(SecretError::RuleContract { .. })
        ));
    }

    #[test]
    fn disabled_weight_excludes_rule() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("active", "", fixed(1.0)));
        evaluator.push_rule(
            EvaluationRule::new("dormant", "", fixed(0.0)).with_weight(Weight::Disabled),
        );

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_close(report.score, 1.0);
    }

    #[test]
    fn explicit_disable_excludes_rule() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("active", "", fixed(1.0)));
        evaluator.push_rule(EvaluationRule::new("off", "", fixed(0.0)).with_enabled(false));

        let report = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_close(report.score, 1.0);
    }

    #[test]
    fn toggling_takes_effect_on_next_evaluation() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("a", "", fixed(1.0)));
        evaluator.push_rule(EvaluationRule::new("b", "", fixed(0.0)));

        let before = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_close(before.score, 0.5);

        evaluator
            .rule_mut("b")
            .expect("rule b exists")
            .set_enabled(false);

        let after = evaluator
            .evaluate(&secret("abc"))
            .expect("evaluate should succeed");
        assert_close(after.score, 1.0);
    }

    #[test]
    fn remove_rule_by_name() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("keep", "", fixed(1.0)));
        evaluator.push_rule(EvaluationRule::new("drop", "", fixed(0.0)));

        let removed = evaluator.remove_rule("drop").expect("rule should exist");
        assert_eq!(removed.name(), "drop");
        assert!(evaluator.remove_rule("drop").is_none());
        assert_eq!(evaluator.rules().len(), 1);
    }

    #[test]
    fn insert_rule_controls_ordering() {
        let mut evaluator = StrengthEvaluator::new();
        evaluator.push_rule(EvaluationRule::new("second", "", fixed(1.0)));
        evaluator.insert_rule(0, EvaluationRule::new("first", "", fixed(1.0)));
        evaluator.insert_rule(99, EvaluationRule::new("last", "", fixed(1.0)));

        let names: Vec<&str> = evaluator.rules().iter().map(EvaluationRule::name).collect();
        assert_eq!(names, ["first", "second", "last"]);
    }

    #[test]
    fn derived_enablement() {
        let rule = EvaluationRule::new("r", "", fixed(1.0));
        assert!(rule.is_enabled());

        let disabled_weight = EvaluationRule::new("r", "", fixed(1.0)).with_weight(Weight::Disabled);
        assert!(!disabled_weight.is_enabled());

        let disabled_flag = EvaluationRule::new("r", "", fixed(1.0)).with_enabled(false);
        assert!(!disabled_flag.is_enabled());
    }

    #[test]
    fn weight_values_and_magnitudes() {
        assert_eq!(Weight::Disabled.value(), 0);
        assert_eq!(Weight::Disabled.magnitude(), 0);
        assert_eq!(Weight::Rated(SignedLevel::Extreme).value(), 7);
        assert_eq!(Weight::Rated(SignedLevel::AdverseExtreme).value(), -7);
        assert_eq!(Weight::Rated(SignedLevel::AdverseExtreme).magnitude(), 7);
        assert_eq!(Weight::Rated(SignedLevel::AdverseMinimal).value(), -1);
        assert_eq!(Weight::Rated(SignedLevel::Minimal).value(), 1);
    }

    #[test]
    fn weight_serde_roundtrip() {
        for weight in [
            Weight::Disabled,
            Weight::Rated(SignedLevel::Normal),
            Weight::Rated(SignedLevel::AdverseNormal),
        ] {
            let json = serde_json::to_string(&weight).expect("serialize should succeed");
            let back: Weight = serde_json::from_str(&json).expect("deserialize should succeed");
            assert_eq!(weight, back);
        }
    }

    #[test]
    fn report_serde_roundtrip() {
        let report = EvaluationReport {
            score: 0.75,
            details: "note".to_owned(),
            critical: false,
        };
        let json = serde_json::to_string(&report).expect("serialize should succeed");
        let back: EvaluationReport =
            serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(report, back);
    }

    #[test]
    fn rule_debug_masks_scorer() {
        let rule = EvaluationRule::new("visible", "desc", fixed(1.0));
        let debug = format!("{rule:?}");
        assert!(debug.contains("visible"));
        assert!(debug.contains(".."));
    }
}
