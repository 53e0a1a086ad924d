// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::{hex, Address, Signature, B256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{RegCcipError, Result};

/// A recoverable secp256k1 signature over a permit digest.
///
/// Exposes the `(v, r, s)` split that `permit(...)` and
/// `transferTokensWithPermit(...)` take as separate arguments, with `v` in
/// the 27/28 form Solidity's `ecrecover` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature(Signature);

impl PermitSignature {
    pub fn new(signature: Signature) -> Self {
        Self(signature)
    }

    /// The `r` component as a 32-byte word.
    pub fn r(&self) -> B256 {
        B256::from(self.0.r())
    }

    /// The `s` component as a 32-byte word.
    pub fn s(&self) -> B256 {
        B256::from(self.0.s())
    }

    /// Recovery id as 27 or 28.
    pub fn v(&self) -> u8 {
        27 + self.0.v() as u8
    }

    /// 65-byte `r ‖ s ‖ v` serialization.
    pub fn as_bytes(&self) -> [u8; 65] {
        self.0.as_bytes()
    }

    pub fn inner(&self) -> &Signature {
        &self.0
    }

    /// Recovers the address that produced this signature over `digest`.
    pub fn recover(&self, digest: &B256) -> Result<Address> {
        self.0
            .recover_address_from_prehash(digest)
            .map_err(|e| RegCcipError::Signing(format!("signature recovery failed: {e}")))
    }
}

impl From<Signature> for PermitSignature {
    fn from(signature: Signature) -> Self {
        Self(signature)
    }
}

impl fmt::Display for PermitSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_prefixed(self.as_bytes()))
    }
}

impl FromStr for PermitSignature {
    type Err = RegCcipError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        let signature = Signature::from_raw(&bytes)
            .map_err(|e| RegCcipError::Signing(format!("malformed signature: {e}")))?;
        Ok(Self(signature))
    }
}

impl Serialize for PermitSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PermitSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn sample() -> PermitSignature {
        PermitSignature::new(Signature::new(U256::from(1), U256::from(2), true))
    }

    #[test]
    fn test_components() {
        let signature = sample();
        assert_eq!(signature.r(), B256::with_last_byte(1));
        assert_eq!(signature.s(), B256::with_last_byte(2));
        assert_eq!(signature.v(), 28);
        assert_eq!(signature.as_bytes()[64], 28);
    }

    #[test]
    fn test_hex_round_trip_through_serde() {
        let signature = sample();
        let json = serde_json::to_string(&signature).unwrap();
        assert!(json.starts_with("\"0x"));
        assert_eq!(json.len(), 2 + 2 + 130);

        let parsed: PermitSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_rejects_short_input() {
        assert!("0xdeadbeef".parse::<PermitSignature>().is_err());
    }
}
