//! Custody conservation invariant checker.
//!
//! Mathematical invariant enforced by the vault:
//! ```text
//! ∀ asset: Σ balances == Σ(deposits) - Σ(withdrawals)
//! ```
//!
//! Trade settlement only moves balances between accounts, so it never
//! changes either side. If this invariant ever breaks, something has
//! gone catastrophically wrong — the checker is the ultimate safety net.

use std::collections::HashMap;

use custodex_types::{Asset, CustodexError, Result};

/// Tracks per-asset custody totals and validates conservation.
pub struct CustodyTracker {
    /// Total deposits per asset since genesis.
    deposits: HashMap<Asset, u128>,
    /// Total withdrawals per asset since genesis.
    withdrawals: HashMap<Asset, u128>,
}

impl CustodyTracker {
    /// Create a new tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: HashMap::new(),
            withdrawals: HashMap::new(),
        }
    }

    /// Record a deposit.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the running total overflows.
    pub fn record_deposit(&mut self, asset: Asset, amount: u128) -> Result<()> {
        let total = self.deposits.entry(asset).or_insert(0);
        *total = total
            .checked_add(amount)
            .ok_or(CustodexError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Record a withdrawal.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the running total overflows.
    pub fn record_withdrawal(&mut self, asset: Asset, amount: u128) -> Result<()> {
        let total = self.withdrawals.entry(asset).or_insert(0);
        *total = total
            .checked_add(amount)
            .ok_or(CustodexError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Expected custodied total: deposits - withdrawals.
    #[must_use]
    pub fn expected_held(&self, asset: Asset) -> u128 {
        let deposited = self.deposits.get(&asset).copied().unwrap_or(0);
        let withdrawn = self.withdrawals.get(&asset).copied().unwrap_or(0);
        deposited.saturating_sub(withdrawn)
    }

    /// Verify that the ledger's actual total matches the expected total.
    ///
    /// # Errors
    /// Returns `CustodyInvariantViolation` if actual ≠ expected.
    pub fn verify(&self, asset: Asset, actual_held: u128) -> Result<()> {
        let expected = self.expected_held(asset);
        if actual_held != expected {
            return Err(CustodexError::CustodyInvariantViolation {
                reason: format!(
                    "asset {asset}: actual held {actual_held} != expected {expected} \
                     (deposits={}, withdrawals={})",
                    self.deposits.get(&asset).copied().unwrap_or(0),
                    self.withdrawals.get(&asset).copied().unwrap_or(0),
                ),
            });
        }
        Ok(())
    }

    /// Total deposits for an asset.
    #[must_use]
    pub fn total_deposits(&self, asset: Asset) -> u128 {
        self.deposits.get(&asset).copied().unwrap_or(0)
    }

    /// Total withdrawals for an asset.
    #[must_use]
    pub fn total_withdrawals(&self, asset: Asset) -> u128 {
        self.withdrawals.get(&asset).copied().unwrap_or(0)
    }
}

impl Default for CustodyTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_expects_zero() {
        let tracker = CustodyTracker::new();
        assert_eq!(tracker.expected_held(Asset::NATIVE), 0);
        assert!(tracker.verify(Asset::NATIVE, 0).is_ok());
    }

    #[test]
    fn deposits_minus_withdrawals() {
        let mut tracker = CustodyTracker::new();
        let asset = Asset::random_token();
        tracker.record_deposit(asset, 1000).unwrap();
        tracker.record_withdrawal(asset, 300).unwrap();
        assert_eq!(tracker.expected_held(asset), 700);
        assert!(tracker.verify(asset, 700).is_ok());
    }

    #[test]
    fn mismatch_is_a_violation() {
        let mut tracker = CustodyTracker::new();
        let asset = Asset::random_token();
        tracker.record_deposit(asset, 1000).unwrap();
        let err = tracker.verify(asset, 999).unwrap_err();
        assert!(matches!(err, CustodexError::CustodyInvariantViolation { .. }));
    }

    #[test]
    fn assets_tracked_independently() {
        let mut tracker = CustodyTracker::new();
        let a = Asset::random_token();
        let b = Asset::random_token();
        tracker.record_deposit(a, 10).unwrap();
        tracker.record_deposit(b, 20).unwrap();
        assert_eq!(tracker.total_deposits(a), 10);
        assert_eq!(tracker.total_deposits(b), 20);
    }

    #[test]
    fn deposit_overflow_fails() {
        let mut tracker = CustodyTracker::new();
        let asset = Asset::random_token();
        tracker.record_deposit(asset, u128::MAX).unwrap();
        let err = tracker.record_deposit(asset, 1).unwrap_err();
        assert!(matches!(err, CustodexError::ArithmeticOverflow));
    }
}
