//! Error types for `cadenas-core`.

use thiserror::Error;

/// Errors produced by password security operations.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The OS CSPRNG refused to produce random bytes. Non-recoverable:
    /// hashing and generation must not proceed with degraded randomness.
    #[error("secure randomness unavailable: {0}")]
    SecureRandom(String),

    /// Key derivation failed (invalid iteration count or output length).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Stored hash blob is malformed (truncated, bad length fields).
    #[error("stored hash format error: {0}")]
    HashFormat(String),

    /// A scoring function returned a raw score outside [0, 1] — a bug in
    /// the rule's author, reported distinctly from any normal low score.
    #[error("rule '{rule}' violated its scoring contract: raw score {score} is outside [0, 1]")]
    RuleContract {
        /// Name of the offending rule.
        rule: String,
        /// The out-of-range value it returned.
        score: f64,
    },

    /// Rule construction rejected its configuration (e.g. inconsistent
    /// length bounds, empty charset).
    #[error("rule configuration error: {0}")]
    RuleConfig(String),

    /// Secret generation rejected its parameters.
    #[error("secret generation error: {0}")]
    Generation(String),

    /// Secure memory bookkeeping failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}
