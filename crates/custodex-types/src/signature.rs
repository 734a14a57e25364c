//! Wire form of an ECDSA signature.

use serde::{Deserialize, Serialize};

/// A secp256k1 ECDSA signature in (v, r, s) component form, as produced
/// by off-chain signing tooling.
///
/// `v` is the recovery identifier: 0/1 raw, or 27/28 in the legacy
/// convention. Anything else is rejected at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBytes {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl SignatureBytes {
    #[must_use]
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let sig = SignatureBytes::new(27, [1u8; 32], [2u8; 32]);
        let json = serde_json::to_string(&sig).unwrap();
        let back: SignatureBytes = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }
}
