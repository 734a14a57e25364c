//! Per-account deposit markers for the rolling withdrawal time-lock.
//!
//! Each account carries the block height of its most recent deposit,
//! overwritten on every deposit. The time-locked withdrawal path opens
//! once `withdrawal_security_period` blocks have elapsed since that
//! marker; any new deposit re-locks the account.
//!
//! This is a single rolling timestamp per account, not a per-deposit
//! maturity queue.

use std::collections::HashMap;

use custodex_types::{Address, BlockHeight};

/// Lock state of an account relative to the security period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Within the security period since the last deposit.
    Locked,
    /// The period has elapsed (or the account never deposited).
    Unlocked,
}

/// Stores the last-deposit height per account.
pub struct DepositMarkers {
    markers: HashMap<Address, BlockHeight>,
}

impl DepositMarkers {
    /// Create an empty marker store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            markers: HashMap::new(),
        }
    }

    /// Record a deposit, resetting the account's lock.
    pub fn record(&mut self, account: Address, height: BlockHeight) {
        self.markers.insert(account, height);
    }

    /// Height of the account's most recent deposit; accounts that never
    /// deposited read as zero.
    #[must_use]
    pub fn last_deposit(&self, account: Address) -> BlockHeight {
        self.markers.get(&account).copied().unwrap_or(0)
    }

    /// Lock state at height `now` for a given security period.
    #[must_use]
    pub fn lock_state(
        &self,
        account: Address,
        now: BlockHeight,
        period: BlockHeight,
    ) -> LockState {
        if now.saturating_sub(self.last_deposit(account)) >= period {
            LockState::Unlocked
        } else {
            LockState::Locked
        }
    }
}

impl Default for DepositMarkers {
    fn default() -> Self {
        Self::new()
    }
}
