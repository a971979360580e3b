use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// An issuer's account identifier on the external ledger.
///
/// Derived deterministically from the issuer's ed25519 public key: the
/// BLAKE3 digest of the key, truncated to its final 20 bytes. The same key
/// always produces the same address, so an address printed by one node can
/// be re-derived and checked by any other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 20]);

impl AccountAddress {
    /// Derive an address from an ed25519 public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"certify-account-v1:");
        hasher.update(public_key);
        let digest = hasher.finalize();
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&digest.as_bytes()[12..]);
        Self(addr)
    }

    /// Create from raw 20 bytes. Use `from_public_key()` for production code.
    pub fn from_raw(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex representation.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from a hex string. The `0x` prefix is optional.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress(0x{}…)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let key = [42u8; 32];
        assert_eq!(
            AccountAddress::from_public_key(&key),
            AccountAddress::from_public_key(&key)
        );
    }

    #[test]
    fn different_keys_produce_different_addresses() {
        let a = AccountAddress::from_public_key(&[1; 32]);
        let b = AccountAddress::from_public_key(&[2; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn hex_roundtrip() {
        let addr = AccountAddress::from_raw([0xee; 20]);
        let hex = addr.to_hex();
        assert_eq!(hex.len(), 42);
        assert_eq!(AccountAddress::from_hex(&hex).unwrap(), addr);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = AccountAddress::from_hex(&format!("0x{}", hex::encode([0u8; 32]))).unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 20,
                actual: 32
            }
        );
    }

    #[test]
    fn serde_roundtrip() {
        let addr = AccountAddress::from_public_key(&[9; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        let parsed: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, parsed);
    }
}
