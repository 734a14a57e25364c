//! External asset collaborator interface.
//!
//! The vault never implements token mechanics itself: deposited assets
//! live in external, already-correct fungible-asset contracts, reached
//! through this trait. The native currency is routed through the same
//! seam under the [`Asset::NATIVE`] sentinel.
//!
//! [`MockAssetBank`] is the reference in-memory implementation used by
//! the test suites; it applies standard allowance/balance semantics.

use std::collections::HashMap;

use custodex_types::{Address, Asset, CustodexError, Result};

/// The external fungible-asset surface the vault consumes.
///
/// Calls happen **after** the vault's own ledger mutations
/// (checks-effects-interactions); a failure rolls the whole operation
/// back at the call site.
pub trait AssetBackend {
    /// Pull `amount` of `asset` from `owner` into `recipient`.
    ///
    /// For token assets this is the standard pre-approved
    /// transfer-on-behalf call. For [`Asset::NATIVE`] it models the
    /// host's attached-value transfer, which needs no allowance.
    ///
    /// # Errors
    /// Returns `TransferFailed` if the external contract rejects the
    /// pull (insufficient balance or allowance).
    fn transfer_from(
        &mut self,
        asset: Asset,
        owner: Address,
        recipient: Address,
        amount: u128,
    ) -> Result<()>;

    /// Send `amount` of `asset` from the vault's own external holdings
    /// to `recipient`.
    ///
    /// # Errors
    /// Returns `TransferFailed` if the external contract rejects the
    /// transfer.
    fn transfer(&mut self, asset: Asset, recipient: Address, amount: u128) -> Result<()>;

    /// External balance of `account` in `asset`.
    fn balance_of(&self, asset: Asset, account: Address) -> u128;
}

/// In-memory asset bank with standard fungible-asset semantics.
///
/// One instance stands in for every external token contract plus the
/// native currency, keyed by asset.
pub struct MockAssetBank {
    /// The vault's own address — the `from` side of outbound transfers.
    vault: Address,
    balances: HashMap<(Asset, Address), u128>,
    allowances: HashMap<(Asset, Address, Address), u128>,
}

impl MockAssetBank {
    /// Create a bank serving the vault at `vault`.
    #[must_use]
    pub fn new(vault: Address) -> Self {
        Self {
            vault,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Mint external balance (token issuance / funding a native account).
    pub fn mint(&mut self, asset: Asset, account: Address, amount: u128) {
        *self.balances.entry((asset, account)).or_insert(0) += amount;
    }

    /// Standard `approve`: let `spender` pull up to `amount` from `owner`.
    pub fn approve(&mut self, asset: Asset, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((asset, owner, spender), amount);
    }

    /// Remaining allowance of (owner → spender).
    #[must_use]
    pub fn allowance(&self, asset: Asset, owner: Address, spender: Address) -> u128 {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    fn move_balance(
        &mut self,
        asset: Asset,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<()> {
        let from_balance = self.balance_of(asset, from);
        if from_balance < amount {
            return Err(CustodexError::TransferFailed {
                asset,
                reason: format!("balance {from_balance} < {amount}"),
            });
        }
        self.balances.insert((asset, from), from_balance - amount);
        *self.balances.entry((asset, to)).or_insert(0) += amount;
        Ok(())
    }
}

impl AssetBackend for MockAssetBank {
    fn transfer_from(
        &mut self,
        asset: Asset,
        owner: Address,
        recipient: Address,
        amount: u128,
    ) -> Result<()> {
        // Native value transfers are host-mediated and carry no allowance.
        if !asset.is_native() {
            let allowed = self.allowance(asset, owner, recipient);
            if allowed < amount {
                return Err(CustodexError::TransferFailed {
                    asset,
                    reason: format!("allowance {allowed} < {amount}"),
                });
            }
            self.allowances
                .insert((asset, owner, recipient), allowed - amount);
        }
        self.move_balance(asset, owner, recipient, amount)
    }

    fn transfer(&mut self, asset: Asset, recipient: Address, amount: u128) -> Result<()> {
        let vault = self.vault;
        self.move_balance(asset, vault, recipient, amount)
    }

    fn balance_of(&self, asset: Asset, account: Address) -> u128 {
        self.balances.get(&(asset, account)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_from_consumes_allowance() {
        let vault = Address::random();
        let trader = Address::random();
        let asset = Asset::random_token();
        let mut bank = MockAssetBank::new(vault);
        bank.mint(asset, trader, 1000);
        bank.approve(asset, trader, vault, 1000);

        bank.transfer_from(asset, trader, vault, 600).unwrap();
        assert_eq!(bank.balance_of(asset, trader), 400);
        assert_eq!(bank.balance_of(asset, vault), 600);
        assert_eq!(bank.allowance(asset, trader, vault), 400);
    }

    #[test]
    fn transfer_from_without_allowance_fails() {
        let vault = Address::random();
        let trader = Address::random();
        let asset = Asset::random_token();
        let mut bank = MockAssetBank::new(vault);
        bank.mint(asset, trader, 1000);

        let err = bank.transfer_from(asset, trader, vault, 1).unwrap_err();
        assert!(matches!(err, CustodexError::TransferFailed { .. }));
        assert_eq!(bank.balance_of(asset, trader), 1000);
    }

    #[test]
    fn transfer_from_without_balance_fails() {
        let vault = Address::random();
        let trader = Address::random();
        let asset = Asset::random_token();
        let mut bank = MockAssetBank::new(vault);
        bank.approve(asset, trader, vault, 1000);

        let err = bank.transfer_from(asset, trader, vault, 1000).unwrap_err();
        assert!(matches!(err, CustodexError::TransferFailed { .. }));
    }

    #[test]
    fn native_transfer_from_needs_no_allowance() {
        let vault = Address::random();
        let trader = Address::random();
        let mut bank = MockAssetBank::new(vault);
        bank.mint(Asset::NATIVE, trader, 500);

        bank.transfer_from(Asset::NATIVE, trader, vault, 500).unwrap();
        assert_eq!(bank.balance_of(Asset::NATIVE, vault), 500);
    }

    #[test]
    fn outbound_transfer_comes_from_vault() {
        let vault = Address::random();
        let trader = Address::random();
        let asset = Asset::random_token();
        let mut bank = MockAssetBank::new(vault);
        bank.mint(asset, vault, 300);

        bank.transfer(asset, trader, 300).unwrap();
        assert_eq!(bank.balance_of(asset, vault), 0);
        assert_eq!(bank.balance_of(asset, trader), 300);
    }

    #[test]
    fn outbound_transfer_over_holdings_fails() {
        let vault = Address::random();
        let mut bank = MockAssetBank::new(vault);
        let err = bank
            .transfer(Asset::random_token(), Address::random(), 1)
            .unwrap_err();
        assert!(matches!(err, CustodexError::TransferFailed { .. }));
    }
}
