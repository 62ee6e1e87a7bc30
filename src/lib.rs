//! A streaming AEAD record layer for Shadowsocks-style proxy tunnels.
//!
//! Converts an application byte stream (TCP) or a sequence of datagrams
//! (UDP) into ciphertext consisting of a per-connection random salt
//! followed by length-prefixed authenticated chunks, and inverts that
//! transform on receive. Supports AES-GCM in three key sizes,
//! ChaCha20-Poly1305, its IETF variant, and XChaCha20-Poly1305-IETF.
//!
//! - [`catalog`]: static table of supported AEAD methods
//! - [`derive`]: password-to-master-key and salt-to-subkey derivation
//! - [`primitive`]: uniform encrypt/decrypt over all six AEAD methods
//! - [`master`]: the per-tunnel master cipher
//! - [`session`]: per-direction, per-connection cipher state
//! - [`tcp`]: the stateful chunked stream codec
//! - [`udp`]: the one-shot datagram codec
//! - [`replay`]: the salt replay guard consulted by the server role
//!
//! Socket I/O, connection lifecycle, address parsing, and configuration
//! are external collaborators and out of scope for this crate.

pub mod catalog;
pub mod config;
pub mod derive;
pub mod error;
pub mod master;
pub mod primitive;
pub mod replay;
pub mod secret;
pub mod session;
mod tcp;
mod udp;

pub use error::{CodecOutcome, CryptoError, Result};
pub use master::MasterCipher;
pub use replay::{BloomSaltGuard, SaltReplayGuard};
pub use session::{Role, SessionCipherContext};
pub use udp::{decrypt_all, encrypt_all};
