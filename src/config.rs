//! Protocol constants for the AEAD record layer.
//!
//! This module centralizes every fixed value the wire format depends on —
//! the single source of truth callers and tests read from instead of
//! re-deriving magic numbers at each call site.

/// Authentication tag length, in bytes, shared by every supported method.
pub const TAG_LEN: usize = 16;

/// Width of the big-endian length prefix on each TCP chunk.
pub const CHUNK_SIZE_LEN: usize = 2;

/// Mask applied to the 16-bit length field; also the maximum plaintext
/// payload size of a single TCP chunk (16383 bytes).
pub const CHUNK_SIZE_MASK: usize = 0x3FFF;

/// Fixed 16-byte personalization tag fed to the subkey derivation hash.
///
/// Protocol-level constant, not a secret: both peers must agree on it
/// bit-for-bit or subkeys will silently diverge. Matches the reference
/// implementation's own tag so subkeys derived by this crate agree with
/// subkeys derived by any other implementation of this wire format.
pub const SUBKEY_APPID: &[u8; 16] = b"fuckshadows-g3nk";

/// Cipher method name used when an unrecognized name is supplied to
/// [`crate::catalog::resolve`].
pub const FALLBACK_METHOD: &str = "aes-256-gcm";
