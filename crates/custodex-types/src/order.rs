//! Signed order model.
//!
//! An order is constructed and signed off-chain by its maker; the vault
//! only ever sees it when a taker submits a trade against it. The order's
//! identity is its packed Keccak-256 hash, which binds it to a specific
//! exchange instance.

use serde::{Deserialize, Serialize};

use crate::{Address, Asset, BlockHeight, Hash32, PackedKeccak};

/// An off-chain negotiated order: the maker offers `amount_sell` of
/// `token_sell` in exchange for `amount_buy` of `token_buy`.
///
/// The cumulative fill state is **not** part of the order itself — it is
/// owned by the settlement engine, keyed by [`Order::hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The account that signed this order.
    pub maker: Address,
    /// Asset the maker wants to receive.
    pub token_buy: Asset,
    /// Total amount of `token_buy` wanted for the full order.
    pub amount_buy: u128,
    /// Asset the maker is selling.
    pub token_sell: Asset,
    /// Total amount of `token_sell` offered.
    pub amount_sell: u128,
    /// Block height after which the order is dead; zero means no expiry.
    pub expires: BlockHeight,
    /// Maker-chosen nonce; (maker, nonce) identifies a distinct order.
    pub nonce: u64,
    /// Fee in `token_buy` units deducted from the maker's proceeds.
    pub fee_make: u128,
    /// Fee in `token_sell` units deducted from the taker's proceeds.
    pub fee_take: u128,
}

impl Order {
    /// Canonical order hash, bound to the exchange instance.
    ///
    /// Packed layout: `(exchange, token_buy, amount_buy, token_sell,
    /// amount_sell, expires, nonce, maker)`.
    #[must_use]
    pub fn hash(&self, exchange: Address) -> Hash32 {
        PackedKeccak::new()
            .address(exchange)
            .asset(self.token_buy)
            .uint(self.amount_buy)
            .asset(self.token_sell)
            .uint(self.amount_sell)
            .uint64(self.expires)
            .uint64(self.nonce)
            .address(self.maker)
            .finalize()
    }

    /// Whether the order is expired at the given height. An `expires`
    /// of zero means the order never expires.
    #[must_use]
    pub fn is_expired(&self, now: BlockHeight) -> bool {
        self.expires != 0 && now >= self.expires
    }
}
