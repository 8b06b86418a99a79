//! PBKDF2 key derivation for stored password hashes.
//!
//! This module provides:
//! - [`derive`] — derive a key of caller-chosen length from a secret + salt
//! - [`KdfParams`] — serializable parameter set (iteration count, salt and
//!   hash lengths) used when creating new stored hashes
//!
//! The PRF is HMAC-SHA256. Iteration count is the tuning knob: derivation
//! cost is linear in it, and callers wanting cancellation or offloading
//! wrap the call at the call-site — there is no timeout inside the loop.

use crate::error::SecretError;
use crate::memory::{SecretBuffer, SecretBytes};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

/// Default PBKDF2 iteration count for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 64_000;

/// Default salt length in bytes for new hashes.
pub const DEFAULT_SALT_LEN: usize = 24;

/// Default derived hash length in bytes for new hashes.
pub const DEFAULT_HASH_LEN: usize = 18;

/// Upper bound for salt and hash lengths — each must fit a 16-bit length
/// field in the stored blob.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// PBKDF2 parameter set used when creating new stored hashes.
///
/// Verification never consults these: the decoded blob is self-describing,
/// so old hashes keep verifying after the defaults are raised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Number of PBKDF2 iterations (≥ 1).
    pub iterations: u32,
    /// Random salt length in bytes (1..=65 535).
    pub salt_len: usize,
    /// Derived hash length in bytes (1..=65 535).
    pub hash_len: usize,
}

impl KdfParams {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::KeyDerivation` if `iterations` is zero, or if
    /// either length is zero or exceeds the 16-bit field limit.
    pub fn new(iterations: u32, salt_len: usize, hash_len: usize) -> Result<Self, SecretError> {
        if iterations == 0 {
            return Err(SecretError::KeyDerivation(
                "iteration count must be at least 1".into(),
            ));
        }
        if salt_len == 0 || salt_len > MAX_FIELD_LEN {
            return Err(SecretError::KeyDerivation(format!(
                "salt length {salt_len} is outside 1..={MAX_FIELD_LEN}"
            )));
        }
        if hash_len == 0 || hash_len > MAX_FIELD_LEN {
            return Err(SecretError::KeyDerivation(format!(
                "hash length {hash_len} is outside 1..={MAX_FIELD_LEN}"
            )));
        }
        Ok(Self {
            iterations,
            salt_len,
            hash_len,
        })
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt_len: DEFAULT_SALT_LEN,
            hash_len: DEFAULT_HASH_LEN,
        }
    }
}

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Derive `out_len` key bytes from a secret and salt using PBKDF2-HMAC-SHA256.
///
/// The secret's code units are fed to the PRF through
/// [`SecretBuffer::kdf_bytes`] — a zeroizing per-code-unit encoding, never
/// an intermediate plain-text `String`. The intermediate output buffer is
/// zeroized after copying into the returned [`SecretBytes`].
///
/// Accepts any secret length, including empty: strength enforcement belongs
/// to the evaluator, not the KDF.
///
/// # Errors
///
/// Returns `SecretError::KeyDerivation` if `iterations` is zero or
/// `out_len` is zero, and `SecretError::SecureMemory` if the secure output
/// allocation fails.
pub fn derive(
    secret: &SecretBuffer,
    salt: &[u8],
    iterations: u32,
    out_len: usize,
) -> Result<SecretBytes, SecretError> {
    if iterations == 0 {
        return Err(SecretError::KeyDerivation(
            "iteration count must be at least 1".into(),
        ));
    }
    if out_len == 0 {
        return Err(SecretError::KeyDerivation(
            "derived key length must be at least 1 byte".into(),
        ));
    }

    let password = secret.kdf_bytes();
    let mut output = vec![0u8; out_len];
    pbkdf2_hmac::<Sha256>(&password, salt, iterations, &mut output);

    let result = SecretBytes::new(&output);
    output.zeroize();
    result
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
