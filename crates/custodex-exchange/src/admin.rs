//! Admin capability registry.
//!
//! A simple capability map (account → flag) checked at the entry of
//! privileged operations. The owner is fixed at construction, is
//! implicitly admin, and is the only account that may grant or revoke
//! the admin flag.

use std::collections::HashMap;

use custodex_types::{Address, CustodexError, Result};

/// Tracks which accounts hold the admin capability.
pub struct AdminRegistry {
    owner: Address,
    admins: HashMap<Address, bool>,
}

impl AdminRegistry {
    /// Create a registry owned by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            admins: HashMap::new(),
        }
    }

    /// The fixed owner account.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Whether `account` holds the admin capability.
    #[must_use]
    pub fn is_admin(&self, account: Address) -> bool {
        account == self.owner || self.admins.get(&account).copied().unwrap_or(false)
    }

    /// Grant or revoke the admin flag. Owner only.
    ///
    /// # Errors
    /// Returns `Unauthorized` if `caller` is not the owner.
    pub fn set_admin(&mut self, caller: Address, account: Address, enabled: bool) -> Result<()> {
        if caller != self.owner {
            return Err(CustodexError::Unauthorized);
        }
        self.admins.insert(account, enabled);
        Ok(())
    }

    /// Guard a privileged operation.
    ///
    /// # Errors
    /// Returns `Unauthorized` if `caller` is not an admin.
    pub fn require_admin(&self, caller: Address) -> Result<()> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(CustodexError::Unauthorized)
        }
    }
}
