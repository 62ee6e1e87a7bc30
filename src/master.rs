//! The per-tunnel master cipher: a resolved method plus its derived key.
//!
//! Constructed once from `(password, method_name)` at tunnel setup and
//! shared by `&` reference across every [`crate::session::SessionCipherContext`]
//! of that tunnel. Immutable after construction, so it is `Sync` and needs
//! no internal synchronization to share across connection-handling threads.

use crate::catalog::{self, CipherKind, CipherSpec};
use crate::derive::derive_master_key;
use crate::secret::Protected;

/// Owns the resolved cipher method and the password-derived master key for
/// one tunnel. Dropped at shutdown along with every context that borrows
/// it; the master key is zeroized on drop via [`Protected`].
pub struct MasterCipher {
    spec: CipherSpec,
    master_key: Protected<Vec<u8>>,
}

impl MasterCipher {
    /// Resolves `method_name` (logging and falling back to `aes-256-gcm` on
    /// an unrecognized name) and derives the master key from `password`.
    pub fn new(password: &[u8], method_name: &str) -> Self {
        let kind = catalog::resolve(method_name);
        Self::from_kind(password, kind)
    }

    /// Builds a master cipher for an already-resolved [`CipherKind`].
    pub fn from_kind(password: &[u8], kind: CipherKind) -> Self {
        let spec = kind.spec();
        let master_key = derive_master_key(password, spec.key_len);
        MasterCipher { spec, master_key }
    }

    pub fn kind(&self) -> CipherKind {
        self.spec.kind
    }

    pub fn spec(&self) -> CipherSpec {
        self.spec
    }

    pub fn master_key(&self) -> &[u8] {
        self.master_key.expose()
    }
}
