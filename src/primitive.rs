//! Uniform encrypt/decrypt surface over all six AEAD methods.
//!
//! AES-GCM variants are driven through a constructed block-cipher context
//! (the key is installed once per direction); ChaCha-family variants are
//! stateless one-shot calls that take the key directly on every
//! invocation. Modeled as a tagged enum with one constructor per AEAD
//! family rather than a single struct with optional fields, so that a
//! ChaCha variant simply has no block-cipher state to carry.

use aead::generic_array::GenericArray;
use aead::generic_array::typenum::U8;
use aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes192Gcm, Aes256Gcm};
use chacha20::ChaCha20Legacy;
use chacha20poly1305::{ChaCha20Poly1305, ChaChaPoly1305, XChaCha20Poly1305};

use crate::catalog::CipherKind;
use crate::error::{CryptoError, Result};

/// The original (non-IETF) ChaCha20-Poly1305 construction with its 8-byte
/// "djb" nonce, built from the legacy stream cipher plus the generic
/// ChaCha-Poly1305 AEAD wrapper.
type ChaCha20Poly1305Legacy = ChaChaPoly1305<ChaCha20Legacy, U8>;

/// A constructed AEAD primitive for one of the six supported methods.
///
/// AES variants hold `None` until [`AeadPrimitive::install_key`] is called;
/// ChaCha variants never hold any state and ignore `install_key` entirely.
pub enum AeadPrimitive {
    Aes128(Option<Aes128Gcm>),
    Aes192(Option<Aes192Gcm>),
    Aes256(Option<Aes256Gcm>),
    ChaCha20(()),
    ChaCha20Ietf(()),
    XChaCha20Ietf(()),
}

impl AeadPrimitive {
    pub fn new(kind: CipherKind) -> Self {
        match kind {
            CipherKind::Aes128Gcm => AeadPrimitive::Aes128(None),
            CipherKind::Aes192Gcm => AeadPrimitive::Aes192(None),
            CipherKind::Aes256Gcm => AeadPrimitive::Aes256(None),
            CipherKind::ChaCha20Poly1305 => AeadPrimitive::ChaCha20(()),
            CipherKind::ChaCha20Poly1305Ietf => AeadPrimitive::ChaCha20Ietf(()),
            CipherKind::XChaCha20Poly1305Ietf => AeadPrimitive::XChaCha20Ietf(()),
        }
    }

    /// Installs `key` into the block-cipher context. A no-op for the
    /// ChaCha-family variants, which take the key directly on every call.
    pub fn install_key(&mut self, key: &[u8]) -> Result<()> {
        match self {
            AeadPrimitive::Aes128(slot) => {
                *slot = Some(Aes128Gcm::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid aes-128-gcm key length"))?);
            }
            AeadPrimitive::Aes192(slot) => {
                *slot = Some(Aes192Gcm::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid aes-192-gcm key length"))?);
            }
            AeadPrimitive::Aes256(slot) => {
                *slot = Some(Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid aes-256-gcm key length"))?);
            }
            AeadPrimitive::ChaCha20(()) | AeadPrimitive::ChaCha20Ietf(()) | AeadPrimitive::XChaCha20Ietf(()) => {}
        }
        Ok(())
    }

    pub fn encrypt(&self, nonce: &[u8], key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        match self {
            AeadPrimitive::Aes128(slot) => {
                let cipher = slot.as_ref().ok_or(CryptoError::Configuration("aes-128-gcm key not installed"))?;
                cipher.encrypt(GenericArray::from_slice(nonce), plaintext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::Aes192(slot) => {
                let cipher = slot.as_ref().ok_or(CryptoError::Configuration("aes-192-gcm key not installed"))?;
                cipher.encrypt(GenericArray::from_slice(nonce), plaintext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::Aes256(slot) => {
                let cipher = slot.as_ref().ok_or(CryptoError::Configuration("aes-256-gcm key not installed"))?;
                cipher.encrypt(GenericArray::from_slice(nonce), plaintext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::ChaCha20(()) => {
                let cipher = ChaCha20Poly1305Legacy::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid chacha20-poly1305 key length"))?;
                cipher.encrypt(GenericArray::from_slice(nonce), plaintext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::ChaCha20Ietf(()) => {
                let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid chacha20-ietf-poly1305 key length"))?;
                cipher.encrypt(GenericArray::from_slice(nonce), plaintext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::XChaCha20Ietf(()) => {
                let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid xchacha20-ietf-poly1305 key length"))?;
                cipher.encrypt(GenericArray::from_slice(nonce), plaintext).map_err(|_| CryptoError::AuthenticationFailed)
            }
        }
    }

    pub fn decrypt(&self, nonce: &[u8], key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match self {
            AeadPrimitive::Aes128(slot) => {
                let cipher = slot.as_ref().ok_or(CryptoError::Configuration("aes-128-gcm key not installed"))?;
                cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::Aes192(slot) => {
                let cipher = slot.as_ref().ok_or(CryptoError::Configuration("aes-192-gcm key not installed"))?;
                cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::Aes256(slot) => {
                let cipher = slot.as_ref().ok_or(CryptoError::Configuration("aes-256-gcm key not installed"))?;
                cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::ChaCha20(()) => {
                let cipher = ChaCha20Poly1305Legacy::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid chacha20-poly1305 key length"))?;
                cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::ChaCha20Ietf(()) => {
                let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid chacha20-ietf-poly1305 key length"))?;
                cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| CryptoError::AuthenticationFailed)
            }
            AeadPrimitive::XChaCha20Ietf(()) => {
                let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::Configuration("invalid xchacha20-ietf-poly1305 key length"))?;
                cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| CryptoError::AuthenticationFailed)
            }
        }
    }
}
