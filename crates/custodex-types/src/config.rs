//! Configuration for a Custodex exchange instance.

use serde::{Deserialize, Serialize};

use crate::{Address, BlockHeight, constants};

/// Runtime configuration of one exchange instance.
///
/// The fee account and security period are mutable through the admin
/// surface; the identity and owner are fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// This instance's own address. First field of every signed-message
    /// hash, which is what prevents cross-instance signature replay.
    pub identity: Address,
    /// The account that deployed the instance; implicitly admin and the
    /// only account allowed to grant or revoke the admin flag.
    pub owner: Address,
    /// Where withdrawal and trade fees are credited.
    pub fee_account: Address,
    /// Minimum blocks since an account's last deposit before the
    /// time-locked withdrawal path opens.
    pub withdrawal_security_period: BlockHeight,
}

impl ExchangeConfig {
    /// Config with the default security period.
    #[must_use]
    pub fn new(identity: Address, owner: Address, fee_account: Address) -> Self {
        Self {
            identity,
            owner,
            fee_account,
            withdrawal_security_period: constants::DEFAULT_WITHDRAWAL_SECURITY_PERIOD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_period() {
        let cfg = ExchangeConfig::new(
            Address([1u8; 20]),
            Address([2u8; 20]),
            Address([3u8; 20]),
        );
        assert_eq!(
            cfg.withdrawal_security_period,
            constants::DEFAULT_WITHDRAWAL_SECURITY_PERIOD
        );
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = ExchangeConfig::new(
            Address([1u8; 20]),
            Address([2u8; 20]),
            Address([3u8; 20]),
        );
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ExchangeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.identity, back.identity);
        assert_eq!(cfg.fee_account, back.fee_account);
        assert_eq!(
            cfg.withdrawal_security_period,
            back.withdrawal_security_period
        );
    }
}
