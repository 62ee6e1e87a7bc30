//! Static table of supported AEAD methods.
//!
//! Resolves a wire-level method name to a [`CipherKind`] and exposes the
//! per-method key, nonce, and tag lengths every other module needs.

/// One of the six AEAD constructions this record layer supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    Aes128Gcm,
    Aes192Gcm,
    Aes256Gcm,
    ChaCha20Poly1305,
    ChaCha20Poly1305Ietf,
    XChaCha20Poly1305Ietf,
}

/// Immutable per-method descriptor: key, nonce, and tag lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSpec {
    pub kind: CipherKind,
    pub key_len: usize,
    pub nonce_len: usize,
    pub tag_len: usize,
}

impl CipherKind {
    pub fn spec(self) -> CipherSpec {
        let (key_len, nonce_len) = match self {
            CipherKind::Aes128Gcm => (16, 12),
            CipherKind::Aes192Gcm => (24, 12),
            CipherKind::Aes256Gcm => (32, 12),
            CipherKind::ChaCha20Poly1305 => (32, 8),
            CipherKind::ChaCha20Poly1305Ietf => (32, 12),
            CipherKind::XChaCha20Poly1305Ietf => (32, 24),
        };
        CipherSpec { kind: self, key_len, nonce_len, tag_len: crate::config::TAG_LEN }
    }
}

/// Resolves a method name to its [`CipherKind`].
///
/// Matching is case-sensitive against the literal six-item set. An
/// unrecognized name is not an error: it is logged and silently mapped to
/// `aes-256-gcm`, matching the fallback behavior existing clients rely on.
pub fn resolve(name: &str) -> CipherKind {
    match name {
        "aes-128-gcm" => CipherKind::Aes128Gcm,
        "aes-192-gcm" => CipherKind::Aes192Gcm,
        "aes-256-gcm" => CipherKind::Aes256Gcm,
        "chacha20-poly1305" => CipherKind::ChaCha20Poly1305,
        "chacha20-ietf-poly1305" => CipherKind::ChaCha20Poly1305Ietf,
        "xchacha20-ietf-poly1305" => CipherKind::XChaCha20Poly1305Ietf,
        other => {
            tracing::warn!(method = other, fallback = crate::config::FALLBACK_METHOD, "unknown cipher method, falling back");
            CipherKind::Aes256Gcm
        }
    }
}
