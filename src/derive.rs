//! Password-to-master-key and salt-to-subkey derivation.
//!
//! Both steps use BLAKE2b, mirroring libsodium's
//! `crypto_generichash`/`crypto_generichash_blake2b_salt_personal`: the
//! master key is an unkeyed hash of the password, and the subkey is a
//! keyed, salted, personalized hash of the master key.

use crate::config::SUBKEY_APPID;
use crate::secret::Protected;

/// Derives the master key from a password. Deterministic: the same
/// password always yields the same master key for a given `key_len`.
pub fn derive_master_key(password: &[u8], key_len: usize) -> Protected<Vec<u8>> {
    let hash = blake2b_simd::Params::new().hash_length(key_len).hash(password);
    Protected::new(hash.as_bytes().to_vec())
}

/// Derives the per-session subkey from the master key and the first 16
/// bytes of the session salt. `salt` may be longer than 16 bytes; only the
/// leading 16 are fed to the hash, matching the reference's fixed-width
/// salt input.
pub fn derive_subkey(master_key: &[u8], salt: &[u8], key_len: usize) -> Protected<Vec<u8>> {
    let salt16 = &salt[..16.min(salt.len())];
    let hash = blake2b_simd::Params::new().hash_length(key_len).key(master_key).salt(salt16).personal(SUBKEY_APPID).hash(&[]);
    Protected::new(hash.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_key_derivation_is_deterministic() {
        let a = derive_master_key(b"hello", 32);
        let b = derive_master_key(b"hello", 32);
        assert_eq!(a.expose(), b.expose());
        assert_eq!(a.expose().len(), 32);
    }

    #[test]
    fn different_passwords_yield_different_keys() {
        let a = derive_master_key(b"hello", 32);
        let b = derive_master_key(b"goodbye", 32);
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn subkey_depends_on_salt() {
        let master = derive_master_key(b"hello", 32);
        let salt_a = [1u8; 32];
        let salt_b = [2u8; 32];
        let sub_a = derive_subkey(master.expose(), &salt_a, 32);
        let sub_b = derive_subkey(master.expose(), &salt_b, 32);
        assert_ne!(sub_a.expose(), sub_b.expose());
        assert_eq!(sub_a.expose().len(), 32);
    }

    #[test]
    fn subkey_only_uses_first_sixteen_salt_bytes() {
        let master = derive_master_key(b"hello", 32);
        let mut salt_a = [7u8; 32];
        let mut salt_b = [7u8; 32];
        salt_a[20] = 1;
        salt_b[20] = 2;
        let sub_a = derive_subkey(master.expose(), &salt_a, 32);
        let sub_b = derive_subkey(master.expose(), &salt_b, 32);
        assert_eq!(sub_a.expose(), sub_b.expose());
    }
}
