//! # custodex-types
//!
//! Shared types, errors, and configuration for the **Custodex**
//! custodial exchange vault.
//!
//! This crate is the leaf dependency of the workspace — every other
//! crate depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`Asset`], [`Hash32`], [`BlockHeight`]
//! - **Order model**: [`Order`]
//! - **Trade model**: [`Trade`]
//! - **Withdrawal model**: [`WithdrawalAuthorization`]
//! - **Signatures**: [`SignatureBytes`], the packed [`PackedKeccak`] hasher
//! - **Configuration**: [`ExchangeConfig`]
//! - **Errors**: [`CustodexError`] with `CX_ERR_` prefix codes

pub mod config;
pub mod constants;
pub mod error;
pub mod hashing;
pub mod ids;
pub mod order;
pub mod signature;
pub mod trade;
pub mod withdrawal;

// Re-export all primary types at crate root for ergonomic imports:
//   use custodex_types::{Order, Trade, Address, ...};

pub use config::*;
pub use error::*;
pub use hashing::*;
pub use ids::*;
pub use order::*;
pub use signature::*;
pub use trade::*;
pub use withdrawal::*;

// Constants are accessed via `custodex_types::constants::FOO`
// (not re-exported to avoid name collisions).
