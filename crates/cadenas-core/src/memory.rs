//! Secure memory types for secrets and derived key material.
//!
//! This module provides:
//! - [`SecretBuffer`] — a wipeable holder for a secret's UTF-16 code units
//! - [`SecretBytes`] — a wipeable holder for derived key bytes
//! - [`LockedRegion`] — RAII `mlock` guard preventing swap-out
//! - [`disable_core_dumps`] — process-wide `RLIMIT_CORE` hardening
//!
//! All secret types zero their memory on drop (via [`secrecy`]'s built-in
//! zeroization), lock their pages in RAM where the platform allows it, and
//! mask their `Debug`/`Display` output. None of them implement `Serialize`:
//! a secret never leaves the process through this crate.

use crate::error::SecretError;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

// ---------------------------------------------------------------------------
// Platform-specific memory locking
// ---------------------------------------------------------------------------

/// RAII guard that unlocks memory on drop.
///
/// When created, locks a memory region via `mlock` so the secret cannot be
/// swapped to disk. On drop, calls `munlock` to release the lock.
pub struct LockedRegion {
    ptr: *const u8,
    len: usize,
    locked: bool,
}

// SAFETY: The pointer is only used for mlock/munlock system calls, which
// are thread-safe. The pointed-to data is owned by SecretBuffer/SecretBytes
// and is not accessed through LockedRegion.
unsafe impl Send for LockedRegion {}
unsafe impl Sync for LockedRegion {}

impl LockedRegion {
    /// Attempt to lock a memory region. Returns a guard that unlocks on drop.
    ///
    /// If `mlock` fails (insufficient privileges or quota), the region is
    /// **not** locked but no error is returned — a soft fallback. Zeroize
    /// on drop still holds either way.
    ///
    /// `pub(crate)` because callers must guarantee pointer validity and
    /// lifetime; external consumers go through `SecretBuffer`/`SecretBytes`.
    #[must_use]
    pub(crate) fn try_lock(ptr: *const u8, len: usize) -> Self {
        let locked = platform::try_mlock(ptr, len);
        if !locked && len > 0 {
            static WARNED: std::sync::Once = std::sync::Once::new();
            WARNED.call_once(|| {
                eprintln!(
                    "[cadenas-core] WARNING: mlock failed — \
                     secret data may be swapped to disk. \
                     Consider increasing RLIMIT_MEMLOCK."
                );
            });
        }
        Self { ptr, len, locked }
    }

    /// Returns `true` if the memory region is currently locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Drop for LockedRegion {
    fn drop(&mut self) {
        if self.locked {
            platform::try_munlock(self.ptr, self.len);
        }
    }
}

// ---------------------------------------------------------------------------
// SecretBuffer — a secret's characters
// ---------------------------------------------------------------------------

/// Wipeable holder for a secret's characters, stored as UTF-16 code units.
///
/// The subsystem borrows a `SecretBuffer` for the duration of one operation
/// and never retains it. Hashing consumes the buffer by value — after
/// `create_hash` the caller no longer owns a usable secret, mirroring a
/// scoped-resource release.
///
/// Code units rather than `char`s: a generated secret may contain unpaired
/// surrogates (see the full-code-space generator preset), and length-based
/// rules count code units.
pub struct SecretBuffer {
    inner: SecretSlice<u16>,
    lock: LockedRegion,
}

impl SecretBuffer {
    /// Create a `SecretBuffer` from a string, encoding to UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::SecureMemory` if the secure allocation fails.
    pub fn from_text(text: &str) -> Result<Self, SecretError> {
        let mut units: Vec<u16> = text.encode_utf16().collect();
        let result = Self::from_utf16(&units);
        units.zeroize();
        result
    }

    /// Create a `SecretBuffer` from raw UTF-16 code units.
    ///
    /// The units are copied into a new locked allocation; the caller should
    /// zeroize the source afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::SecureMemory` if the secure allocation fails.
    pub fn from_utf16(units: &[u16]) -> Result<Self, SecretError> {
        let inner: SecretSlice<u16> = units.to_vec().into();
        let exposed = inner.expose_secret();
        let lock = LockedRegion::try_lock(
            exposed.as_ptr().cast(),
            exposed.len().saturating_mul(size_of::<u16>()),
        );
        Ok(Self { inner, lock })
    }

    /// Expose the underlying code units. Use sparingly, within a single
    /// operation — do not bind the slice to anything long-lived.
    #[must_use]
    pub fn expose(&self) -> &[u16] {
        self.inner.expose_secret()
    }

    /// Number of UTF-16 code units in the secret.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Returns `true` if the secret holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-code-unit little-endian byte encoding fed to the key derivation
    /// function. Returned in a zeroizing buffer so no plain-text copy of
    /// the secret outlives the derivation call.
    #[must_use]
    pub fn kdf_bytes(&self) -> Zeroizing<Vec<u8>> {
        let units = self.inner.expose_secret();
        let mut bytes = Zeroizing::new(Vec::with_capacity(units.len().saturating_mul(2)));
        for unit in units {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    /// Returns `true` if the underlying memory is `mlock`'d.
    #[must_use]
    pub const fn is_mlocked(&self) -> bool {
        self.lock.is_locked()
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

// ---------------------------------------------------------------------------
// SecretBytes — derived key material
// ---------------------------------------------------------------------------

/// Variable-length wipeable buffer for derived key bytes.
///
/// The verifier re-derives keys whose length comes from the decoded stored
/// hash, so the length is a runtime value rather than a const parameter.
pub struct SecretBytes {
    inner: SecretSlice<u8>,
    lock: LockedRegion,
}

impl SecretBytes {
    /// Create a `SecretBytes` from the given data.
    ///
    /// The data is copied into a new locked allocation; the caller should
    /// zeroize the source afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::SecureMemory` if the secure allocation fails.
    pub fn new(data: &[u8]) -> Result<Self, SecretError> {
        let inner: SecretSlice<u8> = data.to_vec().into();
        let exposed = inner.expose_secret();
        let lock = LockedRegion::try_lock(exposed.as_ptr(), exposed.len());
        Ok(Self { inner, lock })
    }

    /// Create a `SecretBytes` filled with cryptographically random bytes.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::SecureRandom` if the CSPRNG fails.
    pub fn random(len: usize) -> Result<Self, SecretError> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SecretError::SecureRandom(format!("CSPRNG fill failed: {e}")))?;
        let result = Self::new(&bytes);
        bytes.zeroize();
        result
    }

    /// Expose the underlying bytes for a cryptographic operation.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Returns the number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBytes(***)")
    }
}

impl fmt::Display for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBytes(***)")
    }
}

// ---------------------------------------------------------------------------
// Core dump disabling
// ---------------------------------------------------------------------------

/// Disable core dumps for the current process.
///
/// On Unix: sets `RLIMIT_CORE` to 0 (both soft and hard limits).
/// On non-Unix: no-op (returns `Ok`).
///
/// # Errors
///
/// Returns `SecretError::SecureMemory` if the `setrlimit` call fails.
pub fn disable_core_dumps() -> Result<(), SecretError> {
    platform::disable_core_dumps_impl()
}

// ---------------------------------------------------------------------------
// Platform-specific implementations
// ---------------------------------------------------------------------------

#[cfg(unix)]
mod platform {
    use crate::error::SecretError;

    pub(super) fn try_mlock(ptr: *const u8, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        // SAFETY: mlock is safe to call with any valid pointer/length pair.
        // If the pointer is invalid, the kernel returns ENOMEM which we handle.
        unsafe { libc::mlock(ptr.cast(), len) == 0 }
    }

    pub(super) fn try_munlock(ptr: *const u8, len: usize) {
        if len == 0 {
            return;
        }
        // SAFETY: munlock is safe to call. Failure is non-critical.
        unsafe {
            libc::munlock(ptr.cast(), len);
        }
    }

    pub(super) fn disable_core_dumps_impl() -> Result<(), SecretError> {
        let limit = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: setrlimit with RLIMIT_CORE is a standard POSIX call.
        let ret = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &raw const limit) };
        if ret != 0 {
            return Err(SecretError::SecureMemory(
                "failed to disable core dumps via RLIMIT_CORE".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(not(unix))]
mod platform {
    use crate::error::SecretError;

    pub(super) fn try_mlock(_ptr: *const u8, _len: usize) -> bool {
        false
    }

    pub(super) fn try_munlock(_ptr: *const u8, _len: usize) {}

    pub(super) fn disable_core_dumps_impl() -> Result<(), SecretError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
