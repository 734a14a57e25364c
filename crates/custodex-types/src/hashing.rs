//! Tightly packed Keccak-256 message hashing.
//!
//! Every signed message in Custodex (order, trade, withdrawal
//! authorization) is the Keccak-256 digest of a tightly packed encoding:
//! addresses contribute their raw 20 bytes, integer fields contribute a
//! 32-byte big-endian word. The exchange instance's own address is always
//! the first packed field, so a signature produced for one instance can
//! never be replayed against another.

use sha3::{Digest, Keccak256};

use crate::{Address, Asset, Hash32};

/// Incremental builder for tightly packed Keccak-256 digests.
///
/// Field order matters: callers must pack fields in the canonical order
/// defined by the message type being hashed.
pub struct PackedKeccak {
    hasher: Keccak256,
}

impl PackedKeccak {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: Keccak256::new(),
        }
    }

    /// Pack a 20-byte address.
    #[must_use]
    pub fn address(mut self, addr: Address) -> Self {
        self.hasher.update(addr.as_bytes());
        self
    }

    /// Pack an asset identifier (its contract address; the native
    /// sentinel packs as the zero address).
    #[must_use]
    pub fn asset(self, asset: Asset) -> Self {
        self.address(asset.address())
    }

    /// Pack an amount as a 32-byte big-endian word.
    #[must_use]
    pub fn uint(mut self, value: u128) -> Self {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&value.to_be_bytes());
        self.hasher.update(word);
        self
    }

    /// Pack a block height or nonce as a 32-byte big-endian word.
    #[must_use]
    pub fn uint64(self, value: u64) -> Self {
        self.uint(u128::from(value))
    }

    /// Pack a 32-byte digest (used when a trade hash chains onto an
    /// order hash).
    #[must_use]
    pub fn hash32(mut self, hash: Hash32) -> Self {
        self.hasher.update(hash.as_bytes());
        self
    }

    /// Finish and return the digest.
    #[must_use]
    pub fn finalize(self) -> Hash32 {
        Hash32(self.hasher.finalize().into())
    }
}

impl Default for PackedKeccak {
    fn default() -> Self {
        Self::new()
    }
}

/// Keccak-256 of an arbitrary byte slice.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash32(hasher.finalize().into())
}
