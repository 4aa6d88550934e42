//! ID suffix generation for community-submitted catalog entries.
//!
//! A submitted item's id is `{prefix}-{slug}-{suffix}`. The suffix source is
//! injected into [`ProgressStore`](crate::ProgressStore) so tests can use a
//! deterministic sequence while the server uses content hashes.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of id suffixes. Suffixes must match `[a-z0-9]+`.
pub trait IdGenerator: Send {
    /// Produce the next suffix for an item whose slug is `seed`.
    fn next_suffix(&mut self, seed: &str) -> String;
}

/// Deterministic base-36 counter: `1`, `2`, ... `z`, `10`, ...
#[derive(Debug, Clone)]
pub struct SequenceIds {
    next: u64,
}

impl SequenceIds {
    /// Start counting at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequenceIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequenceIds {
    fn next_suffix(&mut self, _seed: &str) -> String {
        let n = self.next;
        self.next += 1;
        base36(n)
    }
}

/// Blake3 hash of the slug, wall clock and a local counter, hex-truncated.
#[derive(Debug, Clone, Default)]
pub struct HashIds {
    counter: u64,
}

impl HashIds {
    /// Hex characters kept from the hash.
    pub const SUFFIX_LEN: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for HashIds {
    fn next_suffix(&mut self, seed: &str) -> String {
        self.counter += 1;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let content = format!("{}:{}:{}", seed, nanos, self.counter);
        let hash = blake3::hash(content.as_bytes());
        let mut suffix = hex::encode(hash.as_bytes());
        suffix.truncate(Self::SUFFIX_LEN);
        suffix
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
