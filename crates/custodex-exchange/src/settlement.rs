//! Trade settlement engine.
//!
//! Settles an off-chain negotiated trade: verifies the maker's and the
//! taker's signatures, checks expiry, fill state, and replay, computes
//! the proportional buy amount and fees, and applies the resulting
//! ledger mutations atomically. There is no pending intermediate state —
//! settlement is all-or-nothing within a single call.
//!
//! The engine owns the cumulative fill counter per order hash and the
//! taker nonce registry; both persist forever (consumed state is
//! permanent replay protection).

use std::collections::HashMap;

use custodex_crypto::verify_signer;
use custodex_ledger::{BalanceLedger, LedgerBatch};
use custodex_types::{
    Address, BlockHeight, CustodexError, Hash32, Order, Result, SignatureBytes, Trade,
};

use crate::nonce_registry::NonceRegistry;

/// Outcome of a settled trade, for callers that want to log or audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementReceipt {
    /// Hash of the (partially) filled order.
    pub order_hash: Hash32,
    /// Hash of the taker's trade commitment.
    pub trade_hash: Hash32,
    /// Units of `token_sell` that moved maker → taker (gross).
    pub amount: u128,
    /// Units of `token_buy` that moved taker → maker (gross).
    pub buy_amount: u128,
    /// Cumulative fill of the order after this trade.
    pub filled: u128,
}

/// Verifies and settles signed trades against signed orders.
pub struct TradeSettlementEngine {
    /// Cumulative fill (of `amount_sell`) per order hash. Initialized
    /// to zero on first reference, monotonically increasing.
    filled: HashMap<Hash32, u128>,
    /// Consumed (taker, trade_nonce) pairs.
    consumed: NonceRegistry,
}

impl TradeSettlementEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            filled: HashMap::new(),
            consumed: NonceRegistry::new(),
        }
    }

    /// Settle `amount` units of the order's `amount_sell` for `taker`.
    ///
    /// Validation order: signatures, expiry, fill state, replay,
    /// arithmetic, fee bounds, then the atomic ledger batch. Any
    /// failure leaves every piece of state untouched.
    ///
    /// # Errors
    /// - `InvalidSignature` if either recovered signer mismatches
    /// - `OrderExpired` if the order's expiry height has been reached
    /// - `OrderOverfilled` if the fill would exceed `amount_sell`
    /// - `TradeReplay` if (taker, trade_nonce) was already consumed
    /// - `ArithmeticOverflow` if the proportional computation overflows
    /// - `InsufficientBalance` if a fee exceeds the gross proceeds or
    ///   either party's custodied balance is short
    #[allow(clippy::too_many_arguments)]
    pub fn execute_trade(
        &mut self,
        ledger: &mut BalanceLedger,
        exchange: Address,
        fee_account: Address,
        now: BlockHeight,
        order: &Order,
        amount: u128,
        taker: Address,
        trade_nonce: u64,
        maker_signature: &SignatureBytes,
        taker_signature: &SignatureBytes,
    ) -> Result<SettlementReceipt> {
        // 1. Canonical hashes, bound to this exchange instance.
        let order_hash = order.hash(exchange);
        let trade = Trade {
            order_hash,
            amount,
            taker,
            trade_nonce,
        };
        let trade_hash = trade.hash();

        // 2. Both parties must have signed exactly these hashes.
        verify_signer(&order_hash, maker_signature, order.maker)?;
        verify_signer(&trade_hash, taker_signature, taker)?;

        // 3. Expiry.
        if order.is_expired(now) {
            return Err(CustodexError::OrderExpired {
                expires: order.expires,
                now,
            });
        }

        // 4. Fill state. An order selling nothing has nothing to fill.
        let filled = self.filled.get(&order_hash).copied().unwrap_or(0);
        let new_filled = filled
            .checked_add(amount)
            .ok_or(CustodexError::ArithmeticOverflow)?;
        if order.amount_sell == 0 || new_filled > order.amount_sell {
            return Err(CustodexError::OrderOverfilled { order_hash });
        }

        // 5. Replay.
        if self.consumed.is_consumed(taker, trade_nonce) {
            return Err(CustodexError::TradeReplay { nonce: trade_nonce });
        }

        // 6. Proportional buy amount. Truncating division — the
        //    rounding direction slightly favors the maker.
        let buy_amount = amount
            .checked_mul(order.amount_buy)
            .ok_or(CustodexError::ArithmeticOverflow)?
            / order.amount_sell;

        // 7. Fees come out of each party's gross proceeds.
        if order.fee_make > buy_amount {
            return Err(CustodexError::InsufficientBalance {
                needed: order.fee_make,
                available: buy_amount,
            });
        }
        if order.fee_take > amount {
            return Err(CustodexError::InsufficientBalance {
                needed: order.fee_take,
                available: amount,
            });
        }

        // 8. The atomic mutation set. A short debit aborts the whole
        //    batch with no partial state.
        let batch = LedgerBatch::new()
            .debit(order.maker, order.token_sell, amount)
            .credit(taker, order.token_sell, amount - order.fee_take)
            .credit(fee_account, order.token_sell, order.fee_take)
            .debit(taker, order.token_buy, buy_amount)
            .credit(order.maker, order.token_buy, buy_amount - order.fee_make)
            .credit(fee_account, order.token_buy, order.fee_make);
        ledger.commit(&batch)?;

        // 9. Consume fill capacity and the taker nonce.
        self.filled.insert(order_hash, new_filled);
        self.consumed.consume(taker, trade_nonce);

        tracing::info!(
            maker = %order.maker.short(),
            taker = %taker.short(),
            %order_hash,
            amount,
            buy_amount,
            filled = new_filled,
            "trade settled"
        );

        Ok(SettlementReceipt {
            order_hash,
            trade_hash,
            amount,
            buy_amount,
            filled: new_filled,
        })
    }

    /// Cumulative fill of an order; orders never seen read as zero.
    #[must_use]
    pub fn filled(&self, order_hash: Hash32) -> u128 {
        self.filled.get(&order_hash).copied().unwrap_or(0)
    }

    /// Whether a taker nonce has been consumed.
    #[must_use]
    pub fn is_nonce_consumed(&self, taker: Address, trade_nonce: u64) -> bool {
        self.consumed.is_consumed(taker, trade_nonce)
    }
}

impl Default for TradeSettlementEngine {
    fn default() -> Self {
        Self::new()
    }
}
