//! Salted hash creation and verification.
//!
//! This module provides:
//! - [`HashStore`] — composes the KDF and the blob codec
//! - [`HashStore::create_hash`] — random salt, derive, encode
//! - [`HashStore::verify_hash`] — decode, re-derive, compare, tri-state verdict
//! - [`Verdict`] — `Match` / `Mismatch` / `Indeterminate`
//!
//! Verification is deliberately infallible in the default policy: malformed
//! blobs and derivation failures surface as [`Verdict::Indeterminate`], so a
//! login path never has to distinguish "wrong password" plumbing from
//! "corrupt database row" plumbing unless it opts into the strict variant.

use crate::error::SecretError;
use crate::hash_format::{self, StoredHash};
use crate::kdf::{self, KdfParams};
use crate::memory::SecretBuffer;
use rand::rngs::OsRng;
use rand::RngCore;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of verifying a secret against a stored hash blob.
///
/// Three variants, not a nullable boolean: callers must handle the
/// undetermined case explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "a verification verdict must be acted upon"]
pub enum Verdict {
    /// The secret reproduces the stored hash.
    Match,
    /// The secret does not reproduce the stored hash.
    Mismatch,
    /// The stored blob could not be decoded or the key could not be
    /// re-derived — no statement about the secret is possible.
    Indeterminate,
}

/// How derived keys are compared against stored hashes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Comparison {
    /// Process every byte pair regardless of early mismatch. Default.
    #[default]
    ConstantTime,
    /// Short-circuiting `==`. Only for explicitly configured
    /// performance-over-hardening scenarios (e.g. bulk migration checks).
    Fast,
}

/// Creates and verifies self-describing salted hash blobs.
#[derive(Clone, Debug, Default)]
pub struct HashStore {
    params: KdfParams,
    comparison: Comparison,
}

impl HashStore {
    /// A store creating hashes with the given parameters.
    ///
    /// Verification ignores `params`: it re-derives with whatever the
    /// decoded blob describes.
    #[must_use]
    pub const fn new(params: KdfParams) -> Self {
        Self {
            params,
            comparison: Comparison::ConstantTime,
        }
    }

    /// Override the comparison strategy.
    #[must_use]
    pub const fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Parameters used for hash creation.
    #[must_use]
    pub const fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Derive a storable, self-describing salted hash blob from `secret`.
    ///
    /// The buffer is taken by value: creating a hash consumes the secret,
    /// which is wiped when the buffer drops at the end of this call.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::SecureRandom` if the OS CSPRNG cannot produce
    /// the salt — fatal, there is no degraded-randomness fallback — and
    /// `SecretError::KeyDerivation`/`SecureMemory` if derivation fails.
    pub fn create_hash(&self, secret: SecretBuffer) -> Result<Vec<u8>, SecretError> {
        let mut salt = vec![0u8; self.params.salt_len];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| SecretError::SecureRandom(format!("salt generation failed: {e}")))?;

        let derived = kdf::derive(
            &secret,
            &salt,
            self.params.iterations,
            self.params.hash_len,
        )?;

        let stored = StoredHash::new(self.params.iterations, salt, derived.expose().to_vec())?;
        Ok(hash_format::encode(&stored))
    }

    /// Verify `secret` against a stored blob under the default lenient
    /// policy: any decode or derivation failure yields
    /// [`Verdict::Indeterminate`] instead of an error.
    pub fn verify_hash(&self, secret: &SecretBuffer, stored: &[u8]) -> Verdict {
        self.verify_hash_strict(secret, stored)
            .unwrap_or(Verdict::Indeterminate)
    }

    /// Strict-policy verification: surfaces decode and derivation failures
    /// to the caller instead of folding them into a verdict.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::HashFormat` for a malformed blob and
    /// `SecretError::KeyDerivation`/`SecureMemory` for derivation failures.
    /// Comparison itself never errors.
    pub fn verify_hash_strict(
        &self,
        secret: &SecretBuffer,
        stored: &[u8],
    ) -> Result<Verdict, SecretError> {
        let decoded = hash_format::decode(stored)?;
        let derived = kdf::derive(
            secret,
            decoded.salt(),
            decoded.iterations(),
            decoded.hash().len(),
        )?;

        let equal = match self.comparison {
            Comparison::ConstantTime => constant_time_eq(derived.expose(), decoded.hash()),
            Comparison::Fast => derived.expose() == decoded.hash(),
        };

        Ok(if equal { Verdict::Match } else { Verdict::Mismatch })
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Constant-time byte comparison for derived keys.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Uses bitwise OR accumulation to avoid short-circuit timing leaks.
///
/// Note: The early return on length mismatch is acceptable because the hash
/// length is read from the stored blob — it is public information. The
/// constant-time property protects the *key bytes*, not their count.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
