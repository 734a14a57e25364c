//! # custodex-crypto
//!
//! **SignatureVerifier**: secp256k1 ECDSA signer recovery for the
//! Custodex exchange vault.
//!
//! Signed messages are packed Keccak-256 digests (built in
//! `custodex-types::hashing`) whose first field is always the exchange
//! instance's own address. This crate recovers the signer from the
//! digest and a (v, r, s) signature, and never panics on malformed
//! input — everything bad is [`custodex_types::CustodexError::InvalidSignature`].
//!
//! The `test-helpers` feature exposes [`TestSigner`] for producing valid
//! signatures in tests.

pub mod recover;

#[cfg(any(test, feature = "test-helpers"))]
pub mod signer;

pub use recover::{address_from_pubkey, recover_signer, verify_signer};

#[cfg(any(test, feature = "test-helpers"))]
pub use signer::TestSigner;
