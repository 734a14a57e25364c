//! Core identifiers used throughout Custodex.
//!
//! Accounts, asset contracts and the exchange instance itself are all
//! addressed by 20-byte identifiers derived from secp256k1 public keys
//! (or assigned by the host network for contracts). Message digests are
//! 32-byte Keccak-256 hashes.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account or contract identifier.
///
/// The all-zero address is reserved: it never corresponds to a real
/// signer, so signature recovery treats it as invalid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The reserved all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the reserved zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Short hex form for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// Identifier of a fungible asset held in custody.
///
/// Wraps the asset contract's [`Address`]. The zero address is the
/// sentinel for the host network's native currency, which has no
/// contract of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Asset(pub Address);

impl Asset {
    /// Sentinel for the native currency.
    pub const NATIVE: Self = Self(Address::ZERO);

    #[must_use]
    pub fn contract(contract: Address) -> Self {
        Self(contract)
    }

    /// Whether this asset is the native-currency sentinel.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ---------------------------------------------------------------------------
// Hash32
// ---------------------------------------------------------------------------

/// A 32-byte Keccak-256 digest (order hashes, trade hashes, withdrawal
/// authorization hashes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Host-network block height. Monotonically non-decreasing.
pub type BlockHeight = u64;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    /// Random address for unit tests. **Never use in production.**
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Asset {
    /// Random token asset for unit tests.
    #[must_use]
    pub fn random_token() -> Self {
        loop {
            let asset = Self(Address::random());
            if !asset.is_native() {
                return asset;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_is_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address([1u8; 20]).is_zero());
    }

    #[test]
    fn native_sentinel_is_zero_address() {
        assert!(Asset::NATIVE.is_native());
        assert_eq!(Asset::NATIVE.address(), Address::ZERO);
    }

    #[test]
    fn token_asset_is_not_native() {
        let asset = Asset::contract(Address([7u8; 20]));
        assert!(!asset.is_native());
    }

    #[test]
    fn address_display_is_hex() {
        let addr = Address([0xab; 20]);
        let s = addr.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 42);
    }

    #[test]
    fn native_displays_as_native() {
        assert_eq!(Asset::NATIVE.to_string(), "native");
    }

    #[test]
    fn random_addresses_differ() {
        assert_ne!(Address::random(), Address::random());
    }

    #[test]
    fn serde_roundtrips() {
        let addr = Address::random();
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);

        let hash = Hash32([9u8; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        let back: Hash32 = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, back);
    }
}
