use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

macro_rules! fixed_hash {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Byte length of the hash.
            pub const SIZE: usize = $len;

            /// The all-zero hash.
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Wrap raw bytes in wire (little-endian) order.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Copy from a slice, which must be exactly `SIZE` bytes.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
                let arr: [u8; $len] = bytes.try_into().map_err(|_| TypeError::InvalidLength {
                    expected: $len,
                    actual: bytes.len(),
                })?;
                Ok(Self(arr))
            }

            /// Raw bytes in wire order.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns `true` if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Canonical `0x`-prefixed string. Bytes are reversed so the
            /// most significant byte comes first.
            pub fn to_hex_string(&self) -> String {
                let mut reversed = self.0;
                reversed.reverse();
                format!("0x{}", hex::encode(reversed))
            }

            /// Parse the canonical form. The `0x` prefix is optional.
            pub fn from_hex_string(s: &str) -> Result<Self, TypeError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
                bytes.reverse();
                Self::from_slice(&bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex_string())
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex_string(s)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(hash: $name) -> Self {
                hash.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex_string(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_hash!(
    /// 160-bit hash identifying a script or account (`hash160` of a script).
    UInt160,
    20
);

fixed_hash!(
    /// 256-bit hash identifying a transaction, block, or asset.
    UInt256,
    32
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_string_is_reversed_and_prefixed() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xab;
        let hash = UInt160::from_bytes(bytes);
        let s = hash.to_hex_string();
        assert!(s.starts_with("0x"));
        assert!(s.ends_with("ab"));
        assert_eq!(s.len(), 2 + 40);
    }

    #[test]
    fn hex_roundtrip() {
        let hash = UInt256::from_bytes([7u8; 32]);
        let parsed: UInt256 = hash.to_hex_string().parse().unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let hash = UInt160::from_bytes([3u8; 20]);
        let bare = hash.to_hex_string().trim_start_matches("0x").to_string();
        assert_eq!(UInt160::from_hex_string(&bare).unwrap(), hash);
    }

    #[test]
    fn wrong_length_rejected() {
        let err = UInt256::from_slice(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn invalid_hex_rejected() {
        assert!(matches!(
            UInt160::from_hex_string("0xzz"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn ordering_is_byte_lexicographic() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        a[0] = 1;
        b[1] = 1;
        // First wire byte dominates.
        assert!(UInt256::from_bytes(b) < UInt256::from_bytes(a));
    }

    #[test]
    fn serde_uses_string_form() {
        let hash = UInt160::from_bytes([0x11; 20]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex_string()));
        let parsed: UInt160 = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn zero_is_default() {
        assert!(UInt256::default().is_zero());
        assert_eq!(UInt256::zero(), UInt256::default());
    }
}
