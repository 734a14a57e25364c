//! Operator-assisted withdrawal authorization.
//!
//! The account signs the authorization hash off-chain and hands it to an
//! operator, who submits it on the account's behalf. Authorization is
//! cryptographic proof of intent, so no time-lock applies to this path.

use serde::{Deserialize, Serialize};

use crate::{Address, Asset, Hash32, PackedKeccak};

/// A user-signed authorization for the operator-assisted withdrawal path.
///
/// Replay key: (account, nonce) is consumed at most once. The operator
/// keeps `fee_withdrawal` units (routed to the fee account); the
/// beneficiary receives `amount - fee_withdrawal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalAuthorization {
    /// Asset being withdrawn.
    pub asset: Asset,
    /// Gross amount debited from the account's ledger balance.
    pub amount: u128,
    /// The account whose balance is debited (and whose signature
    /// authorizes the withdrawal).
    pub account: Address,
    /// Recipient of the external transfer.
    pub beneficiary: Address,
    /// Account-chosen nonce; consumed on execution.
    pub nonce: u64,
    /// Fee in `asset` units, deducted from `amount` and routed to the
    /// configured fee account.
    pub fee_withdrawal: u128,
}

impl WithdrawalAuthorization {
    /// Canonical authorization hash, bound to the exchange instance.
    ///
    /// Packed layout: `(exchange, asset, amount, account, beneficiary,
    /// nonce)`. The fee is the operator's parameter, not part of what
    /// the account signed.
    #[must_use]
    pub fn hash(&self, exchange: Address) -> Hash32 {
        PackedKeccak::new()
            .address(exchange)
            .asset(self.asset)
            .uint(self.amount)
            .address(self.account)
            .address(self.beneficiary)
            .uint64(self.nonce)
            .finalize()
    }
}
