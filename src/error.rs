//! Error taxonomy for the AEAD record layer.
//!
//! Distinguishes the failure classes a caller must react to differently:
//! a replay or authentication failure tears the connection down, while
//! `NEED_MORE` (expressed as [`CodecOutcome::NeedMore`]) is an expected,
//! recoverable signal and never reaches this enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    #[error("malformed frame: {0}")]
    MalformedFrame(&'static str),

    #[error("AEAD authentication failed")]
    AuthenticationFailed,

    #[error("replay detected")]
    ReplayDetected,

    #[error("resource allocation failed: {0}")]
    AllocationFailed(&'static str),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Outcome of a TCP stream codec call: either enough bytes were available to
/// produce plaintext (possibly empty, if only a partial chunk was consumed
/// internally) or the caller must supply more bytes before progress is
/// possible. This is never an error — it is the happy path for a stream
/// codec that cannot assume message boundaries align with read() calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecOutcome {
    NeedMore,
    Ready(Vec<u8>),
}

impl CodecOutcome {
    pub fn into_plaintext(self) -> Vec<u8> {
        match self {
            CodecOutcome::Ready(data) => data,
            CodecOutcome::NeedMore => Vec::new(),
        }
    }
}
