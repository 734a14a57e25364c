//! # custodex-ledger
//!
//! **Accounting plane**: the balance ledger, deposit time-lock markers,
//! and the custody conservation checker.
//!
//! ## Architecture
//!
//! 1. **BalanceLedger**: (account, asset) → amount with checked
//!    arithmetic and atomic batch commits
//! 2. **DepositMarkers**: rolling last-deposit height per account,
//!    gating the time-locked withdrawal path
//! 3. **CustodyTracker**: per-asset deposits/withdrawals since genesis,
//!    verifying Σ balances == deposits - withdrawals
//!
//! No I/O and no authorization logic here — the exchange facade
//! authorizes every mutation before it reaches this crate.

pub mod balance_ledger;
pub mod custody;
pub mod deposit_marker;

pub use balance_ledger::{BalanceLedger, LedgerBatch};
pub use custody::CustodyTracker;
pub use deposit_marker::{DepositMarkers, LockState};
