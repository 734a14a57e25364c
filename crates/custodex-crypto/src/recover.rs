//! secp256k1 ECDSA signer recovery.
//!
//! Pure functions, no state. Given a 32-byte message digest and a
//! (v, r, s)-form signature, recover the 20-byte signer address: the low
//! 20 bytes of the Keccak-256 digest of the uncompressed public key
//! (prefix byte stripped).
//!
//! Every malformed input — bad recovery id, out-of-range scalars, a
//! point that fails to recover, or the reserved zero address as output —
//! maps to [`CustodexError::InvalidSignature`]. Recovery never panics.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use custodex_types::{Address, CustodexError, Hash32, Result, SignatureBytes};

/// Recover the signer address of `hash` from a (v, r, s) signature.
pub fn recover_signer(hash: &Hash32, signature: &SignatureBytes) -> Result<Address> {
    let recovery_id = parse_recovery_id(signature.v)?;

    let sig = Signature::from_scalars(signature.r, signature.s)
        .map_err(|_| invalid("signature scalars out of range"))?;

    let key = VerifyingKey::recover_from_prehash(hash.as_bytes(), &sig, recovery_id)
        .map_err(|_| invalid("public key recovery failed"))?;

    let signer = address_from_pubkey(&key);
    if signer.is_zero() {
        return Err(invalid("recovered the reserved zero address"));
    }
    Ok(signer)
}

/// Recover the signer and require it to be `expected`.
pub fn verify_signer(
    hash: &Hash32,
    signature: &SignatureBytes,
    expected: Address,
) -> Result<()> {
    let signer = recover_signer(hash, signature)?;
    if signer != expected {
        return Err(invalid("signer does not match the expected account"));
    }
    Ok(())
}

/// Derive the 20-byte address of a secp256k1 public key.
#[must_use]
pub fn address_from_pubkey(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    // Keccak-256 of the 64-byte key, skipping the 0x04 prefix.
    let mut hasher = Keccak256::new();
    hasher.update(&point.as_bytes()[1..]);
    let digest = hasher.finalize();

    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    Address(address)
}

/// Parse the `v` component: 0/1 raw, or 27/28 in the legacy convention.
fn parse_recovery_id(v: u8) -> Result<RecoveryId> {
    let raw = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(invalid("recovery id must be 0, 1, 27, or 28")),
    };
    RecoveryId::try_from(raw).map_err(|_| invalid("recovery id out of range"))
}

fn invalid(reason: &str) -> CustodexError {
    CustodexError::InvalidSignature {
        reason: reason.to_string(),
    }
}
