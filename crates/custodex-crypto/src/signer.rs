//! Deterministic signing helper for tests. **Never use in production.**
//!
//! Real orders and withdrawal authorizations are signed by off-chain
//! wallets; this helper stands in for them so unit and integration tests
//! can produce valid (v, r, s) signatures.

use k256::ecdsa::SigningKey;

use custodex_types::{Address, Hash32, SignatureBytes};

use crate::recover::address_from_pubkey;

/// A test-only secp256k1 keypair that signs prehashed messages in the
/// (v, r, s) wire form the vault verifies.
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Build a signer from fixed secret bytes. Panics on an invalid
    /// scalar (all-zero or >= the curve order), which fixed test vectors
    /// never are.
    #[must_use]
    pub fn from_secret(secret: [u8; 32]) -> Self {
        let key = SigningKey::from_bytes(&secret.into()).expect("test secret must be a valid scalar");
        Self { key }
    }

    /// Random signer for property-style tests.
    #[must_use]
    pub fn random() -> Self {
        loop {
            let secret: [u8; 32] = rand::random();
            if let Ok(key) = SigningKey::from_bytes(&secret.into()) {
                return Self { key };
            }
        }
    }

    /// The 20-byte address this signer's signatures recover to.
    #[must_use]
    pub fn address(&self) -> Address {
        address_from_pubkey(self.key.verifying_key())
    }

    /// Sign a prehashed message. Emits the legacy `v = 27 + recovery_id`
    /// convention used by off-chain signing tooling.
    #[must_use]
    pub fn sign(&self, hash: &Hash32) -> SignatureBytes {
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash.as_bytes())
            .expect("prehash signing cannot fail for a valid key");

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        SignatureBytes::new(27 + recovery_id.to_byte(), r, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_secret_is_deterministic() {
        let a = TestSigner::from_secret([0x01u8; 32]);
        let b = TestSigner::from_secret([0x01u8; 32]);
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn different_secrets_different_addresses() {
        let a = TestSigner::from_secret([0x01u8; 32]);
        let b = TestSigner::from_secret([0x02u8; 32]);
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn random_signers_differ() {
        assert_ne!(TestSigner::random().address(), TestSigner::random().address());
    }

    #[test]
    fn v_is_legacy_convention() {
        let signer = TestSigner::from_secret([0x03u8; 32]);
        let sig = signer.sign(&Hash32([0x09u8; 32]));
        assert!(sig.v == 27 || sig.v == 28);
    }
}
