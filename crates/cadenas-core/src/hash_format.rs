//! Self-describing binary layout for stored password hashes.
//!
//! This module provides:
//! - [`StoredHash`] — decoded `{iterations, salt, hash}` triple
//! - [`encode`] — produce the storable blob from a [`StoredHash`]
//! - [`decode`] — recover a [`StoredHash`] from a blob
//!
//! # Blob Layout
//!
//! ```text
//! [0..4)   iterations  (u32 LE)
//! [4..6)   salt_len    (u16 LE)
//! [6..)    salt bytes
//! [.. +2)  hash_len    (u16 LE)
//! [..)     hash bytes
//! ```
//!
//! The blob is self-describing: verification reads iteration count and
//! lengths from the blob itself, never from current configuration, so
//! hashes created under old defaults keep verifying. Byte order is
//! little-endian and only needs to round-trip within this codec — the blob
//! is an opaque token to callers, not a cross-system interchange format.

use crate::error::SecretError;
use crate::kdf::MAX_FIELD_LEN;

/// Length of the iteration count field.
const ITERATIONS_LEN: usize = 4;

/// Length of a u16 length prefix.
const LEN_PREFIX: usize = 2;

/// Minimum blob size: iterations + two length prefixes (empty salt, empty hash).
const MIN_BLOB_LEN: usize = ITERATIONS_LEN + LEN_PREFIX + LEN_PREFIX;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A decoded stored hash — iteration count, salt, and derived hash bytes.
///
/// Immutable once built; the only producers are [`decode`] and the hash
/// store's creation path.
#[must_use = "a stored hash must be encoded and persisted by the caller"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl StoredHash {
    /// Build a `StoredHash`, enforcing the field invariants.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::HashFormat` if `iterations` is zero, the hash
    /// is empty, or either field exceeds the 16-bit length limit.
    pub fn new(iterations: u32, salt: Vec<u8>, hash: Vec<u8>) -> Result<Self, SecretError> {
        if iterations == 0 {
            return Err(SecretError::HashFormat(
                "iteration count must be at least 1".into(),
            ));
        }
        if salt.len() > MAX_FIELD_LEN {
            return Err(SecretError::HashFormat(format!(
                "salt length {} exceeds 16-bit field limit",
                salt.len()
            )));
        }
        if hash.is_empty() {
            return Err(SecretError::HashFormat(
                "hash must not be empty".into(),
            ));
        }
        if hash.len() > MAX_FIELD_LEN {
            return Err(SecretError::HashFormat(format!(
                "hash length {} exceeds 16-bit field limit",
                hash.len()
            )));
        }
        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }

    /// PBKDF2 iteration count this hash was derived with.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Random salt mixed into the derivation.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The derived hash bytes.
    #[must_use]
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a [`StoredHash`] into its storable blob.
///
/// [`StoredHash::new`] already enforced the length invariants, so the u16
/// conversions here cannot fail.
#[must_use]
pub fn encode(stored: &StoredHash) -> Vec<u8> {
    let capacity = MIN_BLOB_LEN
        .saturating_add(stored.salt.len())
        .saturating_add(stored.hash.len());
    let mut out = Vec::with_capacity(capacity);
    out.extend_from_slice(&stored.iterations.to_le_bytes());

    let salt_len = u16::try_from(stored.salt.len()).unwrap_or(u16::MAX);
    out.extend_from_slice(&salt_len.to_le_bytes());
    out.extend_from_slice(&stored.salt);

    let hash_len = u16::try_from(stored.hash.len()).unwrap_or(u16::MAX);
    out.extend_from_slice(&hash_len.to_le_bytes());
    out.extend_from_slice(&stored.hash);

    out
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a blob back into a [`StoredHash`].
///
/// # Errors
///
/// Returns `SecretError::HashFormat` for truncated input, length fields
/// pointing past the end, trailing bytes, a zero iteration count, or an
/// empty hash field. The default verification policy maps any of these to
/// an indeterminate verdict rather than an error.
pub fn decode(data: &[u8]) -> Result<StoredHash, SecretError> {
    if data.len() < MIN_BLOB_LEN {
        return Err(SecretError::HashFormat(format!(
            "blob too short: {} bytes (minimum {MIN_BLOB_LEN})",
            data.len()
        )));
    }

    let mut cursor = 0usize;

    let iterations = read_u32_le(data, &mut cursor)?;

    let salt_len = read_u16_le(data, &mut cursor)?;
    let salt = read_field(data, &mut cursor, salt_len, "salt")?;

    let hash_len = read_u16_le(data, &mut cursor)?;
    let hash = read_field(data, &mut cursor, hash_len, "hash")?;

    if cursor != data.len() {
        return Err(SecretError::HashFormat(format!(
            "trailing bytes after hash field: blob is {} bytes, expected {cursor}",
            data.len()
        )));
    }

    StoredHash::new(iterations, salt, hash)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a u32 at `cursor` in little-endian order, advancing `cursor`.
fn read_u32_le(data: &[u8], cursor: &mut usize) -> Result<u32, SecretError> {
    let end = cursor
        .checked_add(ITERATIONS_LEN)
        .ok_or_else(|| SecretError::HashFormat("cursor overflow".into()))?;
    if end > data.len() {
        return Err(SecretError::HashFormat(format!(
            "blob too short to read u32 at offset {cursor}"
        )));
    }
    let mut buf = [0u8; ITERATIONS_LEN];
    buf.copy_from_slice(&data[*cursor..end]);
    *cursor = end;
    Ok(u32::from_le_bytes(buf))
}

/// Read a u16 at `cursor` in little-endian order, advancing `cursor`.
fn read_u16_le(data: &[u8], cursor: &mut usize) -> Result<usize, SecretError> {
    let end = cursor
        .checked_add(LEN_PREFIX)
        .ok_or_else(|| SecretError::HashFormat("cursor overflow".into()))?;
    if end > data.len() {
        return Err(SecretError::HashFormat(format!(
            "blob too short to read u16 at offset {cursor}"
        )));
    }
    let mut buf = [0u8; LEN_PREFIX];
    buf.copy_from_slice(&data[*cursor..end]);
    *cursor = end;
    Ok(usize::from(u16::from_le_bytes(buf)))
}

/// Read `len` bytes at `cursor`, advancing `cursor`.
fn read_field(
    data: &[u8],
    cursor: &mut usize,
    len: usize,
    field: &str,
) -> Result<Vec<u8>, SecretError> {
    let end = cursor
        .checked_add(len)
        .ok_or_else(|| SecretError::HashFormat(format!("{field} length overflow")))?;
    if end > data.len() {
        return Err(SecretError::HashFormat(format!(
            "{field} field extends beyond blob: end={end}, blob_len={}",
            data.len()
        )));
    }
    let bytes = data[*cursor..end].to_vec();
    *cursor = end;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
