//! Salt replay guard consulted by the receiving (server) role.
//!
//! Wraps a scaling Bloom filter keyed on the first bytes a peer ever sends:
//! a session salt seen twice means the same handshake is being replayed.
//! False positives reject a legitimate connection (acceptable); false
//! negatives, which would let a replay through, must be vanishingly rare --
//! the Bloom filter's false-positive rate bounds the former, never the
//! latter.

use std::sync::Mutex;

use bloomfilter::Bloom;

/// Expected number of distinct salts over the filter's lifetime before its
/// false-positive rate starts climbing noticeably. Sized generously; the
/// filter is process-wide and long-lived.
const EXPECTED_SALTS: usize = 100_000;

/// Target false-positive probability at `EXPECTED_SALTS` insertions.
const FALSE_POSITIVE_RATE: f64 = 1e-6;

/// Check-and-insert interface over a probabilistic set of previously-seen
/// salts. Only the server (decrypt) role consults this; a client never
/// needs to distinguish its own salts from a peer's.
pub trait SaltReplayGuard: Send + Sync {
    /// Returns `true` if `salt` has already been recorded.
    fn check(&self, salt: &[u8]) -> bool;

    /// Records `salt` as seen.
    fn add(&self, salt: &[u8]);

    /// Convenience combining [`SaltReplayGuard::check`] and
    /// [`SaltReplayGuard::add`]: returns `true` if `salt` was already
    /// present, and records it either way.
    fn check_and_add(&self, salt: &[u8]) -> bool {
        let seen = self.check(salt);
        self.add(salt);
        seen
    }
}

/// Default [`SaltReplayGuard`]: a `Mutex`-guarded scaling Bloom filter.
/// Safe to share across connection-handling threads via `Arc`.
pub struct BloomSaltGuard {
    filter: Mutex<Bloom<[u8]>>,
}

impl BloomSaltGuard {
    pub fn new() -> Self {
        let filter = Bloom::new_for_fp_rate(EXPECTED_SALTS, FALSE_POSITIVE_RATE)
            .expect("bloom filter parameters are fixed constants and always valid");
        BloomSaltGuard { filter: Mutex::new(filter) }
    }
}

impl Default for BloomSaltGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SaltReplayGuard for BloomSaltGuard {
    fn check(&self, salt: &[u8]) -> bool {
        self.filter.lock().expect("replay guard mutex poisoned").check(salt)
    }

    fn add(&self, salt: &[u8]) {
        self.filter.lock().expect("replay guard mutex poisoned").set(salt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_salt_is_not_present() {
        let guard = BloomSaltGuard::new();
        assert!(!guard.check(b"salt-a"));
    }

    #[test]
    fn added_salt_is_present() {
        let guard = BloomSaltGuard::new();
        guard.add(b"salt-a");
        assert!(guard.check(b"salt-a"));
    }

    #[test]
    fn distinct_salts_do_not_collide() {
        let guard = BloomSaltGuard::new();
        guard.add(b"salt-a");
        assert!(!guard.check(b"salt-b"));
    }

    #[test]
    fn check_and_add_reports_first_use_then_replay() {
        let guard = BloomSaltGuard::new();
        assert!(!guard.check_and_add(b"salt-a"));
        assert!(guard.check_and_add(b"salt-a"));
    }
}
