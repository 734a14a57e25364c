//! Deposit gateway — pulls external funds into custody.
//!
//! Token deposits pull from the external asset contract via its
//! transfer-on-behalf mechanism (the depositor must have approved the
//! vault first); native deposits credit the sentinel asset with the
//! attached value. Every successful deposit overwrites the account's
//! deposit marker, re-arming the withdrawal time-lock.

use custodex_ledger::{BalanceLedger, CustodyTracker, DepositMarkers};
use custodex_types::{Address, Asset, BlockHeight, CustodexError, Result};

use crate::asset_backend::AssetBackend;

/// Owns the per-account deposit markers and performs deposits.
pub struct DepositGateway {
    markers: DepositMarkers,
}

impl DepositGateway {
    #[must_use]
    pub fn new() -> Self {
        Self {
            markers: DepositMarkers::new(),
        }
    }

    /// Deposit `amount` of an external token.
    ///
    /// The external pull happens first: if it fails, no ledger mutation
    /// occurs.
    ///
    /// # Errors
    /// - `TransferFailed` if the external pull is rejected, or if the
    ///   native sentinel is passed (native currency uses
    ///   [`DepositGateway::deposit_native`])
    /// - `ArithmeticOverflow` if the credited balance would overflow
    #[allow(clippy::too_many_arguments)]
    pub fn deposit_token<B: AssetBackend>(
        &mut self,
        backend: &mut B,
        ledger: &mut BalanceLedger,
        custody: &mut CustodyTracker,
        vault: Address,
        caller: Address,
        asset: Asset,
        amount: u128,
        now: BlockHeight,
    ) -> Result<()> {
        if asset.is_native() {
            return Err(CustodexError::TransferFailed {
                asset,
                reason: "native currency must use deposit_native".to_string(),
            });
        }
        backend.transfer_from(asset, caller, vault, amount)?;
        self.credit_deposit(ledger, custody, caller, asset, amount, now)
    }

    /// Deposit `value` of the native currency (the attached value of
    /// the call, already moved into the vault by the host).
    ///
    /// # Errors
    /// - `TransferFailed` if the host-mediated value transfer fails
    /// - `ArithmeticOverflow` if the credited balance would overflow
    pub fn deposit_native<B: AssetBackend>(
        &mut self,
        backend: &mut B,
        ledger: &mut BalanceLedger,
        custody: &mut CustodyTracker,
        vault: Address,
        caller: Address,
        value: u128,
        now: BlockHeight,
    ) -> Result<()> {
        backend.transfer_from(Asset::NATIVE, caller, vault, value)?;
        self.credit_deposit(ledger, custody, caller, Asset::NATIVE, value, now)
    }

    fn credit_deposit(
        &mut self,
        ledger: &mut BalanceLedger,
        custody: &mut CustodyTracker,
        caller: Address,
        asset: Asset,
        amount: u128,
        now: BlockHeight,
    ) -> Result<()> {
        ledger.credit(caller, asset, amount)?;
        custody.record_deposit(asset, amount)?;
        self.markers.record(caller, now);
        tracing::debug!(
            account = %caller.short(),
            %asset,
            amount,
            height = now,
            "deposit credited"
        );
        Ok(())
    }

    /// The marker store, read by the withdrawal manager's time-lock.
    #[must_use]
    pub fn markers(&self) -> &DepositMarkers {
        &self.markers
    }
}

impl Default for DepositGateway {
    fn default() -> Self {
        Self::new()
    }
}
