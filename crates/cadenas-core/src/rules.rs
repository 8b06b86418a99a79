//! Catalog of standard evaluation rules.
//!
//! Factory functions returning configured [`EvaluationRule`]s:
//! - [`length_rule`] — minimum/ideal/excessive length bounds
//! - [`contention_rule`] — fraction of distinct characters drawn from a charset
//! - [`uppercase_rule`] / [`lowercase_rule`] / [`digit_rule`] / [`symbol_rule`]
//! - [`exotic_unicode_rule`] — extra-credit for characters beyond the keyboard set
//! - [`balancing_rule`] — constant counterweight for asymmetric rule sets
//! - [`standard_rule_set`] — the default opinionated bundle
//!
//! Every factory returns a rule with sensible defaults; callers override
//! name, description, weight, enablement, or extra-credit through the
//! [`EvaluationRule`] builder methods.

use crate::error::SecretError;
use crate::evaluator::{EvaluationRule, RuleOutcome, Scorer, SignedLevel, Weight};
use crate::memory::SecretBuffer;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Uppercase Latin letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase Latin letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Decimal digits.
pub const DIGITS: &str = "0123456789";

/// Keyboard symbols.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:',.<>?/~";

/// A code unit within the common keyboard superset: printable ASCII plus
/// the printable Latin-1 supplement (accented letters on international
/// layouts). Anything outside counts as exotic.
const fn is_common_keyboard(unit: u16) -> bool {
    matches!(unit, 0x0020..=0x007E | 0x00A0..=0x00FF)
}

// ---------------------------------------------------------------------------
// Length rule
// ---------------------------------------------------------------------------

/// Validated length bounds for [`length_rule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LengthBounds {
    min: usize,
    ideal: usize,
    excessive: usize,
}

impl LengthBounds {
    /// Build length bounds.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::RuleConfig` unless `1 <= min < ideal <= excessive`.
    pub fn new(min: usize, ideal: usize, excessive: usize) -> Result<Self, SecretError> {
        if min == 0 {
            return Err(SecretError::RuleConfig(
                "minimum length must be at least 1".into(),
            ));
        }
        if ideal <= min {
            return Err(SecretError::RuleConfig(format!(
                "ideal length {ideal} must exceed minimum length {min}"
            )));
        }
        if excessive < ideal {
            return Err(SecretError::RuleConfig(format!(
                "excessive length {excessive} must not be below ideal length {ideal}"
            )));
        }
        Ok(Self {
            min,
            ideal,
            excessive,
        })
    }

    /// Minimum acceptable length; anything shorter is critical.
    #[must_use]
    pub const fn min(self) -> usize {
        self.min
    }

    /// Length at which the rule scores 1.
    #[must_use]
    pub const fn ideal(self) -> usize {
        self.ideal
    }

    /// Length past which a non-critical warning is attached.
    #[must_use]
    pub const fn excessive(self) -> usize {
        self.excessive
    }
}

impl Default for LengthBounds {
    /// 8 / 16 / 128.
    fn default() -> Self {
        Self {
            min: 8,
            ideal: 16,
            excessive: 128,
        }
    }
}

struct LengthScorer {
    bounds: LengthBounds,
}

impl Scorer for LengthScorer {
    #[allow(clippy::cast_precision_loss)]
    fn score(&self, secret: &SecretBuffer) -> RuleOutcome {
        let len = secret.len();
        let LengthBounds {
            min,
            ideal,
            excessive,
        } = self.bounds;

        if len < min {
            return RuleOutcome::critical(format!(
                "too short: {len} characters (minimum {min})"
            ));
        }
        if len > ideal {
            if len > excessive {
                return RuleOutcome::with_details(
                    1.0,
                    format!("unusually long: {len} characters (over {excessive})"),
                );
            }
            return RuleOutcome::score(1.0);
        }
        // Linear ramp from 0.6 at the minimum to 1.0 at the ideal.
        let span = ideal.saturating_sub(min) as f64;
        let progress = len.saturating_sub(min) as f64;
        RuleOutcome::score(0.6 + progress / span * 0.4)
    }
}

/// Length rule: critical below `min`, full score at `ideal`, warning past
/// `excessive`. Placed first in [`standard_rule_set`] so the critical
/// short-circuit skips the class rules for hopeless candidates.
pub fn length_rule(bounds: LengthBounds) -> EvaluationRule {
    EvaluationRule::new(
        "length",
        format!(
            "requires at least {} characters, rewards up to {}",
            bounds.min, bounds.ideal
        ),
        LengthScorer { bounds },
    )
    .with_weight(Weight::Rated(SignedLevel::High))
}

// ---------------------------------------------------------------------------
// Contention rules
// ---------------------------------------------------------------------------

struct ContentionScorer {
    units: HashSet<u16>,
    label: String,
    advisory: bool,
}

impl Scorer for ContentionScorer {
    #[allow(clippy::cast_precision_loss)]
    fn score(&self, secret: &SecretBuffer) -> RuleOutcome {
        let len = secret.len();
        if len == 0 {
            // The evaluator short-circuits empty secrets before rules run;
            // direct callers get a plain zero.
            return RuleOutcome::score(0.0);
        }

        let distinct: HashSet<u16> = secret.expose().iter().copied().collect();
        let matches = distinct.iter().filter(|u| self.units.contains(u)).count();

        if matches == 0 {
            let details = if self.advisory {
                format!("note: no {} characters present", self.label)
            } else {
                format!("warning: add {} characters", self.label)
            };
            return RuleOutcome::with_details(0.0, details);
        }

        RuleOutcome::score((0.3 + matches as f64 / len as f64).clamp(0.0, 1.0))
    }
}

/// Contention rule: scores by the count of the secret's distinct characters
/// found in `charset`, relative to the secret's length, with a 0.3 floor
/// once at least one character matches. Zero matches score 0 with a details
/// line — a warning when the rule is mandatory, a neutral note when
/// `advisory` (which also marks the rule extra-credit).
pub fn contention_rule(
    charset: &str,
    name: &str,
    description: &str,
    advisory: bool,
) -> EvaluationRule {
    let scorer = ContentionScorer {
        units: charset.encode_utf16().collect(),
        label: name.to_owned(),
        advisory,
    };
    EvaluationRule::new(name, description, scorer).with_extra_credit(advisory)
}

/// Contention rule over [`UPPERCASE`].
pub fn uppercase_rule() -> EvaluationRule {
    contention_rule(UPPERCASE, "uppercase", "rewards uppercase letters", false)
}

/// Contention rule over [`LOWERCASE`].
pub fn lowercase_rule() -> EvaluationRule {
    contention_rule(LOWERCASE, "lowercase", "rewards lowercase letters", false)
}

/// Contention rule over [`DIGITS`].
pub fn digit_rule() -> EvaluationRule {
    contention_rule(DIGITS, "digits", "rewards decimal digits", false)
}

/// Contention rule over [`SYMBOLS`].
pub fn symbol_rule() -> EvaluationRule {
    contention_rule(SYMBOLS, "symbols", "rewards keyboard symbols", false)
}

// ---------------------------------------------------------------------------
// Exotic unicode rule
// ---------------------------------------------------------------------------

struct ExoticScorer;

impl Scorer for ExoticScorer {
    fn score(&self, secret: &SecretBuffer) -> RuleOutcome {
        let exotic = secret
            .expose()
            .iter()
            .any(|&unit| !is_common_keyboard(unit));
        if exotic {
            RuleOutcome::with_details(
                1.0,
                "note: contains characters beyond the common keyboard set".to_owned(),
            )
        } else {
            RuleOutcome::score(0.0)
        }
    }
}

/// Extra-credit rule scoring 1 when any character falls outside the common
/// keyboard superset (printable ASCII + Latin-1 supplement), else 0.
pub fn exotic_unicode_rule() -> EvaluationRule {
    EvaluationRule::new(
        "exotic-unicode",
        "bonus for characters beyond the common keyboard set",
        ExoticScorer,
    )
    .with_weight(Weight::Rated(SignedLevel::Low))
    .with_extra_credit(true)
}

// ---------------------------------------------------------------------------
// Balancing rule
// ---------------------------------------------------------------------------

struct BalancingScorer;

impl Scorer for BalancingScorer {
    fn score(&self, _secret: &SecretBuffer) -> RuleOutcome {
        RuleOutcome::score(1.0)
    }
}

/// Constant rule scoring 1 with default weight `AdverseNormal`. A deliberate
/// counterweight for composing asymmetric rule sets — not a strength signal.
pub fn balancing_rule() -> EvaluationRule {
    EvaluationRule::new(
        "balancing",
        "constant counterweight for asymmetric rule sets",
        BalancingScorer,
    )
    .with_weight(Weight::Rated(SignedLevel::AdverseNormal))
}

// ---------------------------------------------------------------------------
// Standard bundle
// ---------------------------------------------------------------------------

/// The default opinionated bundle: length first (it gates critically), then
/// the four character-class contention rules.
#[must_use]
pub fn standard_rule_set() -> Vec<EvaluationRule> {
    vec![
        length_rule(LengthBounds::default()),
        uppercase_rule(),
        lowercase_rule(),
        digit_rule(),
        symbol_rule(),
    ]
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
