//! Signed trade model.
//!
//! A trade is the taker's signed commitment to fill part (or all) of a
//! maker's order. Its hash chains onto the order hash, so a taker
//! signature covers exactly one (order, amount, nonce) combination.

use serde::{Deserialize, Serialize};

use crate::{Address, Hash32, PackedKeccak};

/// A taker's commitment to fill `amount` units of an order's
/// `amount_sell`.
///
/// Replay key: (taker, trade_nonce) is consumed at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Hash of the order being filled.
    pub order_hash: Hash32,
    /// Fill amount, in units of the order's `amount_sell`.
    pub amount: u128,
    /// The account that signed this trade.
    pub taker: Address,
    /// Taker-chosen nonce; consumed on settlement.
    pub trade_nonce: u64,
}

impl Trade {
    /// Canonical trade hash.
    ///
    /// Packed layout: `(order_hash, amount, taker, trade_nonce)`. The
    /// exchange identity is already bound in via `order_hash`.
    #[must_use]
    pub fn hash(&self) -> Hash32 {
        PackedKeccak::new()
            .hash32(self.order_hash)
            .uint(self.amount)
            .address(self.taker)
            .uint64(self.trade_nonce)
            .finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trade() -> Trade {
        Trade {
            order_hash: Hash32([5u8; 32]),
            amount: 500,
            taker: Address([3u8; 20]),
            trade_nonce: 0,
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let trade = make_trade();
        assert_eq!(trade.hash(), trade.hash());
    }

    #[test]
    fn hash_differs_by_amount() {
        let a = make_trade();
        let mut b = a;
        b.amount = 501;
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn hash_chains_on_order_hash() {
        let a = make_trade();
        let mut b = a;
        b.order_hash = Hash32([6u8; 32]);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn serde_roundtrip() {
        let trade = make_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, back);
    }
}
