//! Per-direction, per-connection cipher state.
//!
//! One [`SessionCipherContext`] exists per direction per connection: a TCP
//! connection has one for its send side and one for its receive side, and
//! the two are never confused because nonce accounting and salt handling
//! differ between them. Nothing here is shared across threads -- a context
//! is owned exclusively by the task driving its connection.

use crate::catalog::CipherSpec;
use crate::derive::derive_subkey;
use crate::error::Result;
use crate::master::MasterCipher;
use crate::primitive::AeadPrimitive;
use crate::secret::Protected;
use rand::Rng;

/// Which end of the tunnel a decrypting context belongs to. Only the
/// server role consults the salt replay guard; a client has no peer salt
/// to defend against replay of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

/// Per-direction cipher state for one connection.
///
/// `salt` and `subkey` are `None` until the first call initializes them:
/// on the encrypt side at construction (the salt is drawn immediately),
/// on the decrypt side only once enough peer bytes have arrived.
pub struct SessionCipherContext<'a> {
    cipher: &'a MasterCipher,
    spec: CipherSpec,
    role: Role,
    pub(crate) salt: Option<Protected<Vec<u8>>>,
    subkey: Option<Protected<Vec<u8>>>,
    nonce: Vec<u8>,
    pub(crate) init: bool,
    pub(crate) chunk: Vec<u8>,
    pub(crate) pending_len: Option<usize>,
    primitive: AeadPrimitive,
}

impl<'a> SessionCipherContext<'a> {
    /// Constructs an encrypt-direction context: draws a fresh random salt
    /// immediately, but defers subkey derivation and nonce use until the
    /// first `encrypt` call (`init` starts `false`).
    pub fn init_encrypt(cipher: &'a MasterCipher) -> Self {
        let spec = cipher.spec();
        let mut salt = vec![0u8; spec.key_len];
        rand::rng().fill(&mut salt[..]);
        SessionCipherContext {
            cipher,
            spec,
            role: Role::Client,
            salt: Some(Protected::new(salt)),
            subkey: None,
            nonce: vec![0u8; spec.nonce_len],
            init: false,
            chunk: Vec::new(),
            pending_len: None,
            primitive: AeadPrimitive::new(cipher.kind()),
        }
    }

    /// Constructs a decrypt-direction context. No salt is drawn: it will
    /// be copied out of the peer's first bytes. `role` controls whether
    /// the salt replay guard is consulted once the salt arrives.
    pub fn init_decrypt(cipher: &'a MasterCipher, role: Role) -> Self {
        let spec = cipher.spec();
        SessionCipherContext {
            cipher,
            spec,
            role,
            salt: None,
            subkey: None,
            nonce: vec![0u8; spec.nonce_len],
            init: false,
            chunk: Vec::new(),
            pending_len: None,
            primitive: AeadPrimitive::new(cipher.kind()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn spec(&self) -> CipherSpec {
        self.spec
    }

    pub fn is_initialized(&self) -> bool {
        self.init
    }

    /// Derives and installs the session subkey from `salt`, then installs
    /// it into the AEAD primitive adapter (a no-op for ChaCha-family
    /// methods, which take the key directly on every call).
    pub(crate) fn derive_and_install_subkey(&mut self, salt: &[u8]) -> Result<()> {
        let subkey = derive_subkey(self.cipher.master_key(), salt, self.spec.key_len);
        self.primitive.install_key(subkey.expose())?;
        self.subkey = Some(subkey);
        Ok(())
    }

    pub(crate) fn subkey(&self) -> &[u8] {
        self.subkey.as_ref().expect("subkey requested before initialization").expose()
    }

    pub(crate) fn primitive(&self) -> &AeadPrimitive {
        &self.primitive
    }

    /// Current nonce value, little-endian across `nonce_len` bytes.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Increments the nonce counter by one, little-endian, after every
    /// AEAD call (each length-chunk and each payload-chunk counts as one).
    pub(crate) fn advance_nonce(&mut self) {
        for byte in self.nonce.iter_mut() {
            let (next, carry) = byte.overflowing_add(1);
            *byte = next;
            if !carry {
                return;
            }
        }
    }

    /// Releases secret material ahead of the context's lexical end.
    /// Ordinary scoping (`Drop`, via [`Protected`]) discharges this
    /// automatically; this method exists for callers that want to zeroize
    /// sooner than the borrow checker would otherwise allow.
    pub fn release(&mut self) {
        self.salt = None;
        self.subkey = None;
        self.chunk.clear();
        self.pending_len = None;
        self.init = false;
    }

    pub(crate) fn salt(&self) -> &[u8] {
        self.salt.as_ref().expect("salt requested before initialization").expose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::MasterCipher;

    #[test]
    fn encrypt_context_has_salt_immediately() {
        let master = MasterCipher::new(b"hello", "aes-256-gcm");
        let ctx = SessionCipherContext::init_encrypt(&master);
        assert_eq!(ctx.salt().len(), 32);
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn decrypt_context_has_no_salt_until_supplied() {
        let master = MasterCipher::new(b"hello", "aes-256-gcm");
        let ctx = SessionCipherContext::init_decrypt(&master, Role::Server);
        assert!(ctx.salt.is_none());
    }

    #[test]
    fn nonce_increments_little_endian_with_carry() {
        let master = MasterCipher::new(b"hello", "chacha20-poly1305");
        let mut ctx = SessionCipherContext::init_encrypt(&master);
        ctx.nonce[0] = 0xFF;
        ctx.advance_nonce();
        assert_eq!(ctx.nonce()[0], 0x00);
        assert_eq!(ctx.nonce()[1], 1);
    }

    #[test]
    fn release_clears_reassembly_state() {
        let master = MasterCipher::new(b"hello", "aes-256-gcm");
        let mut ctx = SessionCipherContext::init_decrypt(&master, Role::Server);
        ctx.chunk.extend_from_slice(b"partial");
        ctx.pending_len = Some(5);
        ctx.release();
        assert!(ctx.chunk.is_empty());
        assert!(ctx.pending_len.is_none());
        assert!(!ctx.is_initialized());
    }
}
