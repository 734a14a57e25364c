//! # custodex-exchange
//!
//! **Operations plane**: deposits, dual withdrawal paths, dual-signature
//! trade settlement, and the admin surface of a Custodex instance.
//!
//! ## Architecture
//!
//! 1. **AdminRegistry**: capability map gating privileged operations
//! 2. **DepositGateway**: pulls external funds into custody, arms the
//!    withdrawal time-lock
//! 3. **WithdrawalManager**: time-locked self-service path + signed
//!    operator-assisted path
//! 4. **TradeSettlementEngine**: verifies maker/taker signatures and
//!    settles partial fills atomically
//! 5. **Exchange**: the facade wiring everything over one
//!    [`custodex_ledger::BalanceLedger`] and an [`AssetBackend`]
//!
//! ## Custody Flow
//!
//! ```text
//! deposit:   AssetBackend.transfer_from() → BalanceLedger.credit()
//! withdraw:  BalanceLedger.debit() → AssetBackend.transfer()
//! trade:     SignatureVerifier → BalanceLedger.commit(batch)
//! ```
//!
//! Ledger debits always commit before the external transfer call
//! (checks-effects-interactions), so reentrant callbacks can only see
//! the already-reduced balance.

pub mod admin;
pub mod asset_backend;
pub mod block_clock;
pub mod deposit;
pub mod exchange;
pub mod nonce_registry;
pub mod settlement;
pub mod withdrawal;

pub use admin::AdminRegistry;
pub use asset_backend::{AssetBackend, MockAssetBank};
pub use block_clock::BlockClock;
pub use deposit::DepositGateway;
pub use exchange::Exchange;
pub use nonce_registry::NonceRegistry;
pub use settlement::{SettlementReceipt, TradeSettlementEngine};
pub use withdrawal::WithdrawalManager;
