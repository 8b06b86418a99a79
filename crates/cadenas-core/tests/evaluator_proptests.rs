#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the strength evaluator and standard rules.

use cadenas_core::evaluator::StrengthEvaluator;
use cadenas_core::memory::SecretBuffer;
use cadenas_core::rules::{length_rule, LengthBounds};
use proptest::prelude::*;

fn secret(text: &str) -> SecretBuffer {
    SecretBuffer::from_text(text).expect("secret allocation should succeed")
}

/// Score of a lone standard length rule for a secret of `len` repeated
/// characters. Critical reports score 0, so the mapping is total.
fn length_score(len: usize) -> f64 {
    let mut evaluator = StrengthEvaluator::new();
    evaluator.push_rule(length_rule(
        LengthBounds::new(8, 16, 1000).expect("valid bounds"),
    ));
    evaluator
        .evaluate(&secret(&"x".repeat(len)))
        .expect("evaluate should succeed")
        .score
}

proptest! {
    /// The length rule's score is non-decreasing in secret length.
    #[test]
    fn length_score_is_monotonic(a in 0usize..48, b in 0usize..48) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            length_score(short) <= length_score(long),
            "score({short}) > score({long})"
        );
    }

    /// The standard bundle always reports a score within [0, 1] and never
    /// errors on well-formed text.
    #[test]
    fn standard_score_stays_in_unit_interval(text in ".{0,48}") {
        let evaluator = StrengthEvaluator::standard();
        let report = evaluator
            .evaluate(&secret(&text))
            .expect("evaluate should succeed");
        prop_assert!((0.0..=1.0).contains(&report.score), "score {}", report.score);
    }

    /// Secrets under the standard minimum length are always critical with
    /// a zero score, regardless of their character mix.
    #[test]
    fn short_secrets_are_always_critical(text in "[a-zA-Z0-9!@#]{1,7}") {
        let evaluator = StrengthEvaluator::standard();
        let report = evaluator
            .evaluate(&secret(&text))
            .expect("evaluate should succeed");
        prop_assert!(report.critical);
        prop_assert_eq!(report.score, 0.0);
    }
}
