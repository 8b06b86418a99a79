//! Cryptographic secret generation from configurable character domains.
//!
//! This module provides:
//! - [`generate`] — random secret from an arbitrary charset
//! - [`Preset`] — named domains (`Safe`, `VeryComplex`, `Pin`,
//!   `ExtremelyComplex`) with default lengths
//!
//! All randomness comes from `OsRng` (OS-level CSPRNG), for the shuffle and
//! for every character pick. The reference behavior this subsystem descends
//! from used a general-purpose pseudo-random generator here; that is a
//! hardening bug, not a behavior to preserve, so this implementation is
//! deliberately CSPRNG-only.

use crate::error::SecretError;
use crate::memory::SecretBuffer;
use crate::rules::{DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default length for [`Preset::Safe`].
pub const SAFE_LENGTH: usize = 16;

/// Default length for [`Preset::VeryComplex`].
pub const VERY_COMPLEX_LENGTH: usize = 128;

/// Default length for [`Preset::Pin`].
pub const PIN_LENGTH: usize = 4;

/// Default length for [`Preset::ExtremelyComplex`].
pub const EXTREMELY_COMPLEX_LENGTH: usize = 512;

/// Accented letters and currency/punctuation marks reachable on
/// international keyboard layouts, used by [`Preset::VeryComplex`].
const EXTENDED_SYMBOLS: &str =
    "ÀÂÄÇÈÉÊËÎÏÔÖÙÛÜàâäçèéêëîïôöùûüÿÆŒæœÑñÅåØøß¡¿«»€£¥¤§µ°±·";

// ---------------------------------------------------------------------------
// Core generation
// ---------------------------------------------------------------------------

/// Generate a random secret of `length` characters drawn from `charset`.
///
/// The charset is shuffled (Fisher-Yates, unbiased) and each position then
/// picks a uniformly random index into the shuffled copy. Duplicate charset
/// entries are kept: a caller repeating a character deliberately biases the
/// draw toward it.
///
/// # Errors
///
/// Returns `SecretError::Generation` if the charset is empty or `length`
/// is zero, and `SecretError::SecureMemory` if the secure allocation fails.
pub fn generate(charset: &str, length: usize) -> Result<SecretBuffer, SecretError> {
    let mut pool: Vec<u16> = charset.encode_utf16().collect();
    if pool.is_empty() {
        return Err(SecretError::Generation("charset must not be empty".into()));
    }
    if length == 0 {
        return Err(SecretError::Generation(
            "length must be at least 1".into(),
        ));
    }

    let mut rng = OsRng;
    pool.shuffle(&mut rng);

    let mut units: Vec<u16> = Vec::with_capacity(length);
    for _ in 0..length {
        units.push(pool[rng.gen_range(0..pool.len())]);
    }

    let result = SecretBuffer::from_utf16(&units);
    units.zeroize();
    result
}

/// Generate a secret of uniformly random 16-bit code units over the full
/// code-unit space.
///
/// The output may contain unpaired surrogate code units — it is not
/// guaranteed to be valid text. Callers needing displayable secrets should
/// use a charset-bound preset instead.
///
/// # Errors
///
/// Returns `SecretError::SecureRandom` if the CSPRNG fails (fatal) and
/// `SecretError::Generation` if `length` is zero.
fn generate_full_code_space(length: usize) -> Result<SecretBuffer, SecretError> {
    if length == 0 {
        return Err(SecretError::Generation(
            "length must be at least 1".into(),
        ));
    }

    let mut bytes = vec![0u8; length.saturating_mul(2)];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SecretError::SecureRandom(format!("CSPRNG fill failed: {e}")))?;

    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let result = SecretBuffer::from_utf16(&units);
    units.zeroize();
    bytes.zeroize();
    result
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named generation domains, each a fixed charset plus a default length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Mixed-case letters, digits, and keyboard symbols; default length 16.
    Safe,
    /// The `Safe` domain extended with international characters; default
    /// length 128.
    VeryComplex,
    /// Decimal digits only; default length 4.
    Pin,
    /// Uniformly random 16-bit code units over the full code-unit space;
    /// default length 512. May emit unpaired surrogates.
    ExtremelyComplex,
}

impl Preset {
    /// Default secret length for this preset.
    #[must_use]
    pub const fn default_length(self) -> usize {
        match self {
            Self::Safe => SAFE_LENGTH,
            Self::VeryComplex => VERY_COMPLEX_LENGTH,
            Self::Pin => PIN_LENGTH,
            Self::ExtremelyComplex => EXTREMELY_COMPLEX_LENGTH,
        }
    }

    /// Generate a secret at this preset's default length.
    ///
    /// # Errors
    ///
    /// See [`Preset::generate_with_length`].
    pub fn generate(self) -> Result<SecretBuffer, SecretError> {
        self.generate_with_length(self.default_length())
    }

    /// Generate a secret of `length` characters from this preset's domain.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::Generation` if `length` is zero and
    /// `SecretError::SecureRandom` if the CSPRNG fails.
    pub fn generate_with_length(self, length: usize) -> Result<SecretBuffer, SecretError> {
        match self {
            Self::Safe => generate(&safe_charset(), length),
            Self::VeryComplex => generate(&very_complex_charset(), length),
            Self::Pin => generate(DIGITS, length),
            Self::ExtremelyComplex => generate_full_code_space(length),
        }
    }
}

fn safe_charset() -> String {
    format!("{UPPERCASE}{LOWERCASE}{DIGITS}{SYMBOLS}")
}

fn very_complex_charset() -> String {
    format!("{UPPERCASE}{LOWERCASE}{DIGITS}{SYMBOLS}{EXTENDED_SYMBOLS}")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
