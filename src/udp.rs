//! One-shot datagram codec.
//!
//! Each datagram stands alone: `salt || AEAD(key, nonce=0, plaintext) || tag`.
//! There is no session state to carry between calls -- freshness comes from
//! a fresh random salt on the wire rather than from a counter nonce, so the
//! nonce is simply the all-zero block on every call and is never
//! incremented here. Unlike the TCP codec, the salt here is not hashed into
//! a per-datagram subkey: the master key itself is the AEAD key (installed
//! into the primitive for AES-GCM, passed directly for the ChaCha family),
//! and the salt accompanies the datagram only so the replay guard has
//! something to check.

use crate::error::{CryptoError, Result};
use crate::master::MasterCipher;
use crate::primitive::AeadPrimitive;
use crate::replay::SaltReplayGuard;
use rand::Rng;

/// Encrypts `plaintext` into a self-contained datagram under `master`'s
/// method, prefixed with a freshly drawn random salt. The salt plays no
/// part in key derivation here; it exists purely for the receiver's replay
/// guard.
pub fn encrypt_all(master: &MasterCipher, plaintext: &[u8]) -> Result<Vec<u8>> {
    let spec = master.spec();

    let mut salt = vec![0u8; spec.key_len];
    rand::rng().fill(&mut salt[..]);

    let mut primitive = AeadPrimitive::new(master.kind());
    primitive.install_key(master.master_key())?;

    let nonce = vec![0u8; spec.nonce_len];
    let ciphertext = primitive.encrypt(&nonce, master.master_key(), plaintext)?;

    let mut out = Vec::with_capacity(spec.key_len + ciphertext.len());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypts a self-contained datagram produced by [`encrypt_all`].
///
/// `guard`, when present, is consulted for replay of the leading salt --
/// callers in the server role must pass one; a client decrypting its own
/// peer's responses has no replay concern and passes `None`.
pub fn decrypt_all(master: &MasterCipher, datagram: &[u8], guard: Option<&dyn SaltReplayGuard>) -> Result<Vec<u8>> {
    let spec = master.spec();

    if datagram.len() < spec.key_len + spec.tag_len {
        return Err(CryptoError::MalformedFrame("datagram shorter than salt + tag"));
    }

    let salt = &datagram[..spec.key_len];
    if let Some(guard) = guard {
        if guard.check(salt) {
            return Err(CryptoError::ReplayDetected);
        }
    }

    let mut primitive = AeadPrimitive::new(master.kind());
    primitive.install_key(master.master_key())?;

    let nonce = vec![0u8; spec.nonce_len];
    let plaintext = primitive.decrypt(&nonce, master.master_key(), &datagram[spec.key_len..])?;

    if let Some(guard) = guard {
        guard.add(salt);
    }

    Ok(plaintext)
}
