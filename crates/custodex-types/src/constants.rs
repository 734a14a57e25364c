//! System-wide constants for the Custodex exchange vault.

use crate::BlockHeight;

/// Default withdrawal security period in blocks. Admins may override it
/// per instance via `set_withdrawal_security_period`.
pub const DEFAULT_WITHDRAWAL_SECURITY_PERIOD: BlockHeight = 20_000;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of a Keccak-256 digest in bytes.
pub const HASH_LEN: usize = 32;

/// Length of an ECDSA signature scalar (r or s) in bytes.
pub const SIGNATURE_SCALAR_LEN: usize = 32;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Custodex";
