//! Withdrawal manager — both exit paths out of custody.
//!
//! **Time-locked self-withdrawal**: gated only by the rolling security
//! period since the caller's last deposit.
//!
//! **Operator-assisted withdrawal**: gated only by the account's
//! signature over the authorization hash (plus a one-shot nonce); the
//! operator keeps a fee, routed to the configured fee account.
//!
//! Both paths debit the ledger **before** the external transfer call
//! (checks-effects-interactions), so a reentrant callback observes the
//! already-reduced balance. If the external transfer itself fails, the
//! debit is compensated and the call fails with the ledger restored.

use custodex_crypto::verify_signer;
use custodex_ledger::{BalanceLedger, CustodyTracker, DepositMarkers, LedgerBatch, LockState};
use custodex_types::{
    Address, Asset, BlockHeight, CustodexError, Result, SignatureBytes, WithdrawalAuthorization,
};

use crate::asset_backend::AssetBackend;
use crate::nonce_registry::NonceRegistry;

/// Implements both withdrawal paths. Owns the consumed-nonce registry
/// for the operator path.
pub struct WithdrawalManager {
    consumed: NonceRegistry,
}

impl WithdrawalManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            consumed: NonceRegistry::new(),
        }
    }

    /// Time-locked self-withdrawal.
    ///
    /// # Errors
    /// - `SecurityPeriodNotElapsed` while within the period since the
    ///   caller's last deposit
    /// - `InsufficientBalance` if the caller's custodied balance is short
    /// - `TransferFailed` if the external transfer is rejected (the
    ///   debit is rolled back)
    #[allow(clippy::too_many_arguments)]
    pub fn security_withdraw<B: AssetBackend>(
        &mut self,
        backend: &mut B,
        ledger: &mut BalanceLedger,
        custody: &mut CustodyTracker,
        markers: &DepositMarkers,
        caller: Address,
        asset: Asset,
        amount: u128,
        now: BlockHeight,
        period: BlockHeight,
    ) -> Result<()> {
        if markers.lock_state(caller, now, period) == LockState::Locked {
            return Err(CustodexError::SecurityPeriodNotElapsed {
                unlock_at: markers.last_deposit(caller).saturating_add(period),
                now,
            });
        }

        // Effects before interaction: the debit commits first.
        ledger.debit(caller, asset, amount)?;

        if let Err(err) = backend.transfer(asset, caller, amount) {
            // External rejection unwinds the whole call.
            ledger.credit(caller, asset, amount)?;
            return Err(err);
        }

        custody.record_withdrawal(asset, amount)?;
        tracing::info!(
            account = %caller.short(),
            %asset,
            amount,
            "security withdrawal executed"
        );
        Ok(())
    }

    /// Operator-assisted withdrawal against a user-signed authorization.
    ///
    /// The admin gate is the facade's responsibility; this method
    /// verifies the signature, the nonce, and the fee bound.
    ///
    /// # Errors
    /// - `InvalidSignature` if the signer is not `auth.account`
    /// - `WithdrawalReplay` if (account, nonce) was already consumed
    /// - `InsufficientBalance` if the fee exceeds the amount or the
    ///   account's custodied balance is short
    /// - `TransferFailed` if the external transfer is rejected (ledger
    ///   mutations are rolled back)
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw<B: AssetBackend>(
        &mut self,
        backend: &mut B,
        ledger: &mut BalanceLedger,
        custody: &mut CustodyTracker,
        exchange: Address,
        fee_account: Address,
        auth: &WithdrawalAuthorization,
        signature: &SignatureBytes,
    ) -> Result<()> {
        let hash = auth.hash(exchange);
        verify_signer(&hash, signature, auth.account)?;

        if self.consumed.is_consumed(auth.account, auth.nonce) {
            return Err(CustodexError::WithdrawalReplay { nonce: auth.nonce });
        }

        let payout = auth
            .amount
            .checked_sub(auth.fee_withdrawal)
            .ok_or(CustodexError::InsufficientBalance {
                needed: auth.fee_withdrawal,
                available: auth.amount,
            })?;

        // Debit the account, route the fee — atomically, before the
        // external transfer.
        let batch = LedgerBatch::new()
            .debit(auth.account, auth.asset, auth.amount)
            .credit(fee_account, auth.asset, auth.fee_withdrawal);
        ledger.commit(&batch)?;

        if let Err(err) = backend.transfer(auth.asset, auth.beneficiary, payout) {
            let unwind = LedgerBatch::new()
                .debit(fee_account, auth.asset, auth.fee_withdrawal)
                .credit(auth.account, auth.asset, auth.amount);
            ledger.commit(&unwind)?;
            return Err(err);
        }

        custody.record_withdrawal(auth.asset, payout)?;
        self.consumed.consume(auth.account, auth.nonce);
        tracing::info!(
            account = %auth.account.short(),
            beneficiary = %auth.beneficiary.short(),
            asset = %auth.asset,
            amount = auth.amount,
            fee = auth.fee_withdrawal,
            nonce = auth.nonce,
            "operator withdrawal executed"
        );
        Ok(())
    }

    /// Whether an operator-path nonce has been consumed.
    #[must_use]
    pub fn is_nonce_consumed(&self, account: Address, nonce: u64) -> bool {
        self.consumed.is_consumed(account, nonce)
    }
}

impl Default for WithdrawalManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_backend::MockAssetBank;
    use custodex_crypto::TestSigner;
    use custodex_ledger::DepositMarkers;

    struct Setup {
        vault: Address,
        fee_account: Address,
        asset: Asset,
        bank: MockAssetBank,
        ledger: BalanceLedger,
        custody: CustodyTracker,
        markers: DepositMarkers,
        manager: WithdrawalManager,
    }

    /// A trader with `amount` already in custody, deposited at `height`.
    fn setup_with_custody(trader: Address, amount: u128, height: BlockHeight) -> Setup {
        let vault = Address::random();
        let asset = Asset::random_token();
        let mut bank = MockAssetBank::new(vault);
        bank.mint(asset, vault, amount);
        let mut ledger = BalanceLedger::new();
        ledger.credit(trader, asset, amount).unwrap();
        let mut custody = CustodyTracker::new();
        custody.record_deposit(asset, amount).unwrap();
        let mut markers = DepositMarkers::new();
        markers.record(trader, height);
        Setup {
            vault,
            fee_account: Address::random(),
            asset,
            bank,
            ledger,
            custody,
            markers,
            manager: WithdrawalManager::new(),
        }
    }

    #[test]
    fn security_withdraw_before_period_fails() {
        let trader = Address::random();
        let mut s = setup_with_custody(trader, 1000, 100);

        let err = s
            .manager
            .security_withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, &s.markers, trader, s.asset, 1000,
                105, 10,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CustodexError::SecurityPeriodNotElapsed {
                unlock_at: 110,
                now: 105
            }
        ));
        assert_eq!(s.ledger.balance_of(trader, s.asset), 1000);
    }

    #[test]
    fn security_withdraw_after_period_pays_out() {
        let trader = Address::random();
        let mut s = setup_with_custody(trader, 1000, 100);

        s.manager
            .security_withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, &s.markers, trader, s.asset, 1000,
                110, 10,
            )
            .unwrap();

        assert_eq!(s.ledger.balance_of(trader, s.asset), 0);
        assert_eq!(s.bank.balance_of(s.asset, trader), 1000);
        assert!(s.custody.verify(s.asset, s.ledger.total_held(s.asset)).is_ok());
    }

    #[test]
    fn security_withdraw_over_balance_fails() {
        let trader = Address::random();
        let mut s = setup_with_custody(trader, 1000, 100);

        let err = s
            .manager
            .security_withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, &s.markers, trader, s.asset, 1001,
                200, 10,
            )
            .unwrap_err();
        assert!(matches!(err, CustodexError::InsufficientBalance { .. }));
    }

    #[test]
    fn failed_external_transfer_restores_the_debit() {
        let trader = Address::random();
        let mut s = setup_with_custody(trader, 1000, 100);
        // Drain the vault's external holdings so the payout must fail.
        s.bank.transfer(s.asset, Address::random(), 1000).unwrap();

        let err = s
            .manager
            .security_withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, &s.markers, trader, s.asset, 1000,
                200, 10,
            )
            .unwrap_err();
        assert!(matches!(err, CustodexError::TransferFailed { .. }));
        assert_eq!(s.ledger.balance_of(trader, s.asset), 1000);
    }

    #[test]
    fn operator_withdraw_happy_path() {
        let signer = TestSigner::from_secret([0xa1u8; 32]);
        let trader = signer.address();
        let mut s = setup_with_custody(trader, 1000, 100);
        let exchange = s.vault;

        let auth = WithdrawalAuthorization {
            asset: s.asset,
            amount: 1000,
            account: trader,
            beneficiary: trader,
            nonce: 0,
            fee_withdrawal: 100,
        };
        let sig = signer.sign(&auth.hash(exchange));

        s.manager
            .withdraw(
                &mut s.bank,
                &mut s.ledger,
                &mut s.custody,
                exchange,
                s.fee_account,
                &auth,
                &sig,
            )
            .unwrap();

        assert_eq!(s.ledger.balance_of(trader, s.asset), 0);
        assert_eq!(s.ledger.balance_of(s.fee_account, s.asset), 100);
        assert_eq!(s.bank.balance_of(s.asset, trader), 900);
        assert!(s.custody.verify(s.asset, s.ledger.total_held(s.asset)).is_ok());
    }

    #[test]
    fn operator_withdraw_replay_fails() {
        let signer = TestSigner::from_secret([0xa2u8; 32]);
        let trader = signer.address();
        let mut s = setup_with_custody(trader, 2000, 100);
        let exchange = s.vault;
        s.bank.mint(s.asset, s.vault, 1000);

        let auth = WithdrawalAuthorization {
            asset: s.asset,
            amount: 1000,
            account: trader,
            beneficiary: trader,
            nonce: 7,
            fee_withdrawal: 0,
        };
        let sig = signer.sign(&auth.hash(exchange));

        s.manager
            .withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, exchange, s.fee_account, &auth, &sig,
            )
            .unwrap();
        let err = s
            .manager
            .withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, exchange, s.fee_account, &auth, &sig,
            )
            .unwrap_err();
        assert!(matches!(err, CustodexError::WithdrawalReplay { nonce: 7 }));
        // Only the first call moved funds.
        assert_eq!(s.ledger.balance_of(trader, s.asset), 1000);
    }

    #[test]
    fn operator_withdraw_wrong_signer_fails() {
        let signer = TestSigner::from_secret([0xa3u8; 32]);
        let imposter = TestSigner::from_secret([0xa4u8; 32]);
        let trader = signer.address();
        let mut s = setup_with_custody(trader, 1000, 100);
        let exchange = s.vault;

        let auth = WithdrawalAuthorization {
            asset: s.asset,
            amount: 1000,
            account: trader,
            beneficiary: trader,
            nonce: 0,
            fee_withdrawal: 0,
        };
        let sig = imposter.sign(&auth.hash(exchange));

        let err = s
            .manager
            .withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, exchange, s.fee_account, &auth, &sig,
            )
            .unwrap_err();
        assert!(matches!(err, CustodexError::InvalidSignature { .. }));
        assert_eq!(s.ledger.balance_of(trader, s.asset), 1000);
    }

    #[test]
    fn fee_larger_than_amount_fails() {
        let signer = TestSigner::from_secret([0xa5u8; 32]);
        let trader = signer.address();
        let mut s = setup_with_custody(trader, 1000, 100);
        let exchange = s.vault;

        let auth = WithdrawalAuthorization {
            asset: s.asset,
            amount: 100,
            account: trader,
            beneficiary: trader,
            nonce: 0,
            fee_withdrawal: 101,
        };
        let sig = signer.sign(&auth.hash(exchange));

        let err = s
            .manager
            .withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, exchange, s.fee_account, &auth, &sig,
            )
            .unwrap_err();
        assert!(matches!(err, CustodexError::InsufficientBalance { .. }));
        assert!(!s.manager.is_nonce_consumed(trader, 0));
    }

    #[test]
    fn no_time_lock_on_operator_path() {
        let signer = TestSigner::from_secret([0xa6u8; 32]);
        let trader = signer.address();
        // Deposited "just now" — the self-service path would be locked.
        let mut s = setup_with_custody(trader, 1000, 100);
        let exchange = s.vault;

        let auth = WithdrawalAuthorization {
            asset: s.asset,
            amount: 1000,
            account: trader,
            beneficiary: trader,
            nonce: 0,
            fee_withdrawal: 0,
        };
        let sig = signer.sign(&auth.hash(exchange));

        s.manager
            .withdraw(
                &mut s.bank, &mut s.ledger, &mut s.custody, exchange, s.fee_account, &auth, &sig,
            )
            .unwrap();
        assert_eq!(s.bank.balance_of(s.asset, trader), 1000);
    }
}
