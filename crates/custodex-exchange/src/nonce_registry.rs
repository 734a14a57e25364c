//! Consumed-nonce registry — permanent replay protection.
//!
//! Signed withdrawals and trades carry a caller-chosen nonce; each
//! (account, nonce) pair may be consumed at most once. Consumption state
//! persists for the lifetime of the instance — there is no eviction,
//! because an evicted nonce would reopen the replay window.

use std::collections::HashSet;

use custodex_types::Address;

/// Tracks consumed (account, nonce) pairs.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    consumed: HashSet<(Address, u64)>,
}

impl NonceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether (account, nonce) has been consumed.
    #[must_use]
    pub fn is_consumed(&self, account: Address, nonce: u64) -> bool {
        self.consumed.contains(&(account, nonce))
    }

    /// Consume (account, nonce). Returns `false` if it was already
    /// consumed (a replay); the caller maps that to its own error.
    pub fn consume(&mut self, account: Address, nonce: u64) -> bool {
        self.consumed.insert((account, nonce))
    }

    /// Number of consumed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// Whether nothing has been consumed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
