//! Balance ledger — pure accounting over (account, asset) pairs.
//!
//! No signature or authorization checks happen here: callers are trusted
//! internal components that have already authorized the mutation. All
//! amounts are non-negative by construction (`u128`); additions that
//! would overflow fail with `ArithmeticOverflow` instead of wrapping.
//!
//! Multi-entry mutations go through [`LedgerBatch`] + [`BalanceLedger::commit`]:
//! every debit and every credit overflow is verified before anything is
//! applied, so a failed batch leaves the ledger untouched.

use std::collections::HashMap;

use custodex_types::{Address, Asset, CustodexError, Result};

/// One entry of a [`LedgerBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchEntry {
    Credit(Address, Asset, u128),
    Debit(Address, Asset, u128),
}

/// An ordered list of ledger mutations committed atomically.
#[derive(Debug, Default)]
pub struct LedgerBatch {
    entries: Vec<BatchEntry>,
}

impl LedgerBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credit entry.
    #[must_use]
    pub fn credit(mut self, account: Address, asset: Asset, amount: u128) -> Self {
        self.entries.push(BatchEntry::Credit(account, asset, amount));
        self
    }

    /// Add a debit entry.
    #[must_use]
    pub fn debit(mut self, account: Address, asset: Asset, amount: u128) -> Self {
        self.entries.push(BatchEntry::Debit(account, asset, amount));
        self
    }

    /// Number of entries in this batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The source of truth for all custodied balances.
///
/// Keyed by (account, asset); entries are created implicitly on first
/// credit and may decay to zero but are never explicitly destroyed.
pub struct BalanceLedger {
    balances: HashMap<(Address, Asset), u128>,
}

impl BalanceLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Unconditionally increase a balance.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the addition exceeds `u128`.
    pub fn credit(&mut self, account: Address, asset: Asset, amount: u128) -> Result<()> {
        let entry = self.balances.entry((account, asset)).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(CustodexError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Decrease a balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `amount` exceeds the current
    /// balance. The balance is unchanged on failure.
    pub fn debit(&mut self, account: Address, asset: Asset, amount: u128) -> Result<()> {
        let available = self.balance_of(account, asset);
        if available < amount {
            return Err(CustodexError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if let Some(entry) = self.balances.get_mut(&(account, asset)) {
            *entry -= amount;
        }
        Ok(())
    }

    /// Current balance of (account, asset); missing entries read as zero.
    #[must_use]
    pub fn balance_of(&self, account: Address, asset: Asset) -> u128 {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    /// Commit a batch atomically: verify every entry first, apply only
    /// if all pass. A failed batch leaves the ledger untouched.
    ///
    /// Verification replays the entries in order against a shadow of the
    /// touched balances, so a debit may legitimately spend a credit that
    /// appears earlier in the same batch.
    ///
    /// # Errors
    /// - `InsufficientBalance` if any debit would go negative
    /// - `ArithmeticOverflow` if any credit would overflow
    pub fn commit(&mut self, batch: &LedgerBatch) -> Result<()> {
        // Verify phase: simulate against a shadow copy of touched keys.
        let mut shadow: HashMap<(Address, Asset), u128> = HashMap::new();
        for entry in &batch.entries {
            match *entry {
                BatchEntry::Credit(account, asset, amount) => {
                    let current = *shadow
                        .entry((account, asset))
                        .or_insert_with(|| self.balance_of(account, asset));
                    let next = current
                        .checked_add(amount)
                        .ok_or(CustodexError::ArithmeticOverflow)?;
                    shadow.insert((account, asset), next);
                }
                BatchEntry::Debit(account, asset, amount) => {
                    let current = *shadow
                        .entry((account, asset))
                        .or_insert_with(|| self.balance_of(account, asset));
                    if current < amount {
                        return Err(CustodexError::InsufficientBalance {
                            needed: amount,
                            available: current,
                        });
                    }
                    shadow.insert((account, asset), current - amount);
                }
            }
        }

        // Apply phase: cannot fail after verification.
        for ((account, asset), next) in shadow {
            self.balances.insert((account, asset), next);
        }
        Ok(())
    }

    /// Total custodied amount of an asset across all accounts.
    #[must_use]
    pub fn total_held(&self, asset: Asset) -> u128 {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl Default for BalanceLedger {
    fn default() -> Self {
        Self::new()
    }
}
