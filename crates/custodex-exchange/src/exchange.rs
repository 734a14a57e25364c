//! Exchange facade — the instance's public surface.
//!
//! Wires the admin registry, deposit gateway, withdrawal manager, and
//! settlement engine over one balance ledger, one custody tracker, the
//! host block clock, and a generic [`AssetBackend`]. Each top-level
//! operation runs to completion or leaves no trace; `&mut self`
//! ownership makes calls strictly sequential, so correctness holds
//! under any serialization the host picks.
//!
//! `caller` parameters model the host's authenticated call sender.

use custodex_ledger::{BalanceLedger, CustodyTracker};
use custodex_types::{
    Address, Asset, BlockHeight, ExchangeConfig, Hash32, Order, Result, SignatureBytes,
    WithdrawalAuthorization,
};

use crate::admin::AdminRegistry;
use crate::asset_backend::AssetBackend;
use crate::block_clock::BlockClock;
use crate::deposit::DepositGateway;
use crate::settlement::{SettlementReceipt, TradeSettlementEngine};
use crate::withdrawal::WithdrawalManager;

/// One custodial exchange instance.
pub struct Exchange<B: AssetBackend> {
    config: ExchangeConfig,
    admin: AdminRegistry,
    ledger: BalanceLedger,
    custody: CustodyTracker,
    gateway: DepositGateway,
    withdrawals: WithdrawalManager,
    settlement: TradeSettlementEngine,
    clock: BlockClock,
    backend: B,
}

impl<B: AssetBackend> Exchange<B> {
    /// Create an instance from its config and external asset backend.
    #[must_use]
    pub fn new(config: ExchangeConfig, backend: B) -> Self {
        let admin = AdminRegistry::new(config.owner);
        Self {
            config,
            admin,
            ledger: BalanceLedger::new(),
            custody: CustodyTracker::new(),
            gateway: DepositGateway::new(),
            withdrawals: WithdrawalManager::new(),
            settlement: TradeSettlementEngine::new(),
            clock: BlockClock::default(),
            backend,
        }
    }

    // ------------------------------------------------------------------
    // Admin configuration
    // ------------------------------------------------------------------

    /// Point fees at a new account. Admin only.
    pub fn set_fee_account(&mut self, caller: Address, account: Address) -> Result<()> {
        self.admin.require_admin(caller)?;
        self.config.fee_account = account;
        Ok(())
    }

    /// Grant or revoke the admin flag. Owner only.
    pub fn set_admin(&mut self, caller: Address, account: Address, enabled: bool) -> Result<()> {
        self.admin.set_admin(caller, account, enabled)
    }

    /// Change the withdrawal security period. Admin only.
    pub fn set_withdrawal_security_period(
        &mut self,
        caller: Address,
        blocks: BlockHeight,
    ) -> Result<()> {
        self.admin.require_admin(caller)?;
        self.config.withdrawal_security_period = blocks;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Deposits
    // ------------------------------------------------------------------

    /// Deposit pre-approved external tokens.
    pub fn deposit_token(&mut self, caller: Address, asset: Asset, amount: u128) -> Result<()> {
        self.gateway.deposit_token(
            &mut self.backend,
            &mut self.ledger,
            &mut self.custody,
            self.config.identity,
            caller,
            asset,
            amount,
            self.clock.height(),
        )
    }

    /// Deposit attached native currency.
    pub fn deposit_native(&mut self, caller: Address, value: u128) -> Result<()> {
        self.gateway.deposit_native(
            &mut self.backend,
            &mut self.ledger,
            &mut self.custody,
            self.config.identity,
            caller,
            value,
            self.clock.height(),
        )
    }

    // ------------------------------------------------------------------
    // Withdrawals
    // ------------------------------------------------------------------

    /// Time-locked self-withdrawal.
    pub fn security_withdraw(
        &mut self,
        caller: Address,
        asset: Asset,
        amount: u128,
    ) -> Result<()> {
        self.withdrawals.security_withdraw(
            &mut self.backend,
            &mut self.ledger,
            &mut self.custody,
            self.gateway.markers(),
            caller,
            asset,
            amount,
            self.clock.height(),
            self.config.withdrawal_security_period,
        )
    }

    /// Operator-assisted withdrawal against a user-signed
    /// authorization. The submitting operator must be admin.
    pub fn withdraw(
        &mut self,
        caller: Address,
        auth: &WithdrawalAuthorization,
        signature: &SignatureBytes,
    ) -> Result<()> {
        self.admin.require_admin(caller)?;
        self.withdrawals.withdraw(
            &mut self.backend,
            &mut self.ledger,
            &mut self.custody,
            self.config.identity,
            self.config.fee_account,
            auth,
            signature,
        )
    }

    // ------------------------------------------------------------------
    // Trade settlement
    // ------------------------------------------------------------------

    /// Settle a dual-signed trade against an order.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_trade(
        &mut self,
        order: &Order,
        amount: u128,
        taker: Address,
        trade_nonce: u64,
        maker_signature: &SignatureBytes,
        taker_signature: &SignatureBytes,
    ) -> Result<SettlementReceipt> {
        self.settlement.execute_trade(
            &mut self.ledger,
            self.config.identity,
            self.config.fee_account,
            self.clock.height(),
            order,
            amount,
            taker,
            trade_nonce,
            maker_signature,
            taker_signature,
        )
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Custodied balance of (account, asset).
    #[must_use]
    pub fn balance_of(&self, account: Address, asset: Asset) -> u128 {
        self.ledger.balance_of(account, asset)
    }

    /// Cumulative fill of an order hash.
    #[must_use]
    pub fn filled(&self, order_hash: Hash32) -> u128 {
        self.settlement.filled(order_hash)
    }

    /// This instance's identity address (the first field of every
    /// signed-message hash).
    #[must_use]
    pub fn identity(&self) -> Address {
        self.config.identity
    }

    #[must_use]
    pub fn fee_account(&self) -> Address {
        self.config.fee_account
    }

    #[must_use]
    pub fn withdrawal_security_period(&self) -> BlockHeight {
        self.config.withdrawal_security_period
    }

    #[must_use]
    pub fn is_admin(&self, account: Address) -> bool {
        self.admin.is_admin(account)
    }

    /// Verify the custody conservation invariant for an asset.
    pub fn verify_custody(&self, asset: Asset) -> Result<()> {
        self.custody.verify(asset, self.ledger.total_held(asset))
    }

    /// The external asset backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access, for host-side setup (minting, approvals).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Current host block height.
    #[must_use]
    pub fn block_height(&self) -> BlockHeight {
        self.clock.height()
    }

    /// Advance the host clock (the host mines blocks; tests call this
    /// directly).
    pub fn advance_blocks(&mut self, blocks: BlockHeight) {
        self.clock.advance(blocks);
    }
}
