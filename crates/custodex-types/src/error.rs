//! Error types for the Custodex custodial exchange vault.
//!
//! All errors use the `CX_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Admin / authorization errors
//! - 2xx: Balance / arithmetic errors
//! - 3xx: Deposit / external transfer errors
//! - 4xx: Withdrawal errors
//! - 5xx: Signature errors
//! - 6xx: Trade settlement errors
//!
//! Every error is terminal for the call that raised it: the vault never
//! retries internally, and a failed call leaves the ledger untouched.

use thiserror::Error;

use crate::{Asset, BlockHeight, Hash32};

/// Central error enum for all Custodex operations.
#[derive(Debug, Error)]
pub enum CustodexError {
    // =================================================================
    // Admin / Authorization Errors (1xx)
    // =================================================================
    /// A privileged operation was invoked by a non-admin account.
    #[error("CX_ERR_100: Unauthorized: caller lacks the required privilege")]
    Unauthorized,

    // =================================================================
    // Balance / Arithmetic Errors (2xx)
    // =================================================================
    /// Not enough custodied balance to perform the operation.
    #[error("CX_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    /// An addition or multiplication would exceed the representable range.
    #[error("CX_ERR_201: Arithmetic overflow")]
    ArithmeticOverflow,

    // =================================================================
    // Deposit / External Transfer Errors (3xx)
    // =================================================================
    /// The external asset contract rejected a transfer.
    #[error("CX_ERR_300: External transfer failed for {asset}: {reason}")]
    TransferFailed { asset: Asset, reason: String },

    // =================================================================
    // Withdrawal Errors (4xx)
    // =================================================================
    /// The time-locked withdrawal path was used before the security
    /// period since the caller's last deposit elapsed.
    #[error("CX_ERR_400: Security period not elapsed: unlocks at block {unlock_at}, now {now}")]
    SecurityPeriodNotElapsed {
        unlock_at: BlockHeight,
        now: BlockHeight,
    },

    /// The (account, nonce) pair of a withdrawal authorization was
    /// already consumed.
    #[error("CX_ERR_401: Withdrawal replay: nonce {nonce} already consumed")]
    WithdrawalReplay { nonce: u64 },

    // =================================================================
    // Signature Errors (5xx)
    // =================================================================
    /// Signature recovery failed or the recovered signer does not match
    /// the expected account.
    #[error("CX_ERR_500: Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    // =================================================================
    // Trade Settlement Errors (6xx)
    // =================================================================
    /// The order's expiry height has been reached.
    #[error("CX_ERR_600: Order expired at block {expires}, now {now}")]
    OrderExpired {
        expires: BlockHeight,
        now: BlockHeight,
    },

    /// The trade amount would push the order's cumulative fill past
    /// `amount_sell`.
    #[error("CX_ERR_601: Order overfilled: {order_hash}")]
    OrderOverfilled { order_hash: Hash32 },

    /// The (taker, trade_nonce) pair was already consumed.
    #[error("CX_ERR_602: Trade replay: nonce {nonce} already consumed")]
    TradeReplay { nonce: u64 },

    /// Custody conservation invariant violated — critical safety alert.
    #[error("CX_ERR_603: Custody invariant violation: {reason}")]
    CustodyInvariantViolation { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CustodexError>;
