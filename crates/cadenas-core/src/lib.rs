//! `cadenas-core` — Password security primitives for CADENAS.
//!
//! This crate is the audit target: zero network, zero async, zero UI
//! dependencies. It provides three independent capabilities over a shared
//! secure-memory layer:
//!
//! - **Stored hashes** — [`HashStore`] derives a self-describing salted
//!   PBKDF2 hash blob from a secret and verifies secrets against it with a
//!   tri-state [`Verdict`] and constant-time comparison.
//! - **Strength evaluation** — [`StrengthEvaluator`] folds an ordered,
//!   weighted set of [`EvaluationRule`]s into one normalized score; the
//!   [`rules`] catalog provides the standard rules.
//! - **Secret generation** — [`generate`] and the [`Preset`] domains
//!   produce random secrets from OS CSPRNG randomness only.
//!
//! Secrets live in [`SecretBuffer`] (UTF-16 code units, zeroized on drop,
//! best-effort `mlock`, masked `Debug`), are borrowed per operation, and
//! are consumed by value when hashed.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod kdf;

pub mod hash_format;

pub mod store;

pub mod evaluator;

pub mod rules;

pub mod generator;

pub use error::SecretError;
pub use evaluator::{
    EvaluationReport, EvaluationRule, RuleOutcome, Scorer, SignedLevel, StrengthEvaluator, Weight,
};
pub use generator::{
    generate, Preset, EXTREMELY_COMPLEX_LENGTH, PIN_LENGTH, SAFE_LENGTH, VERY_COMPLEX_LENGTH,
};
pub use hash_format::{decode, encode, StoredHash};
pub use kdf::{derive, KdfParams, DEFAULT_HASH_LEN, DEFAULT_ITERATIONS, DEFAULT_SALT_LEN};
pub use memory::{disable_core_dumps, LockedRegion, SecretBuffer, SecretBytes};
pub use rules::{
    balancing_rule, contention_rule, digit_rule, exotic_unicode_rule, length_rule, lowercase_rule,
    standard_rule_set, symbol_rule, uppercase_rule, LengthBounds,
};
pub use store::{Comparison, HashStore, Verdict};
