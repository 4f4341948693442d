use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Compressed secp256r1 public key (`0x02`/`0x03` prefix + 32-byte X).
///
/// Ordering is byte-lexicographic over the compressed form, which is the
/// order validator keys occupy in storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    pub const SIZE: usize = 33;

    /// Build from the compressed encoding, checking the prefix byte.
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, TypeError> {
        match bytes[0] {
            0x02 | 0x03 => Ok(Self(bytes)),
            other => Err(TypeError::InvalidPublicKey(other)),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; 33] = bytes.try_into().map_err(|_| TypeError::InvalidLength {
            expected: Self::SIZE,
            actual: bytes.len(),
        })?;
        Self::from_bytes(arr)
    }

    /// Build from a prefix byte and the X coordinate.
    pub fn from_parts(prefix: u8, x: [u8; 32]) -> Result<Self, TypeError> {
        let mut bytes = [0u8; 33];
        bytes[0] = prefix;
        bytes[1..].copy_from_slice(&x);
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    pub fn prefix(&self) -> u8 {
        self.0[0]
    }

    /// The 32-byte X coordinate.
    pub fn x(&self) -> [u8; 32] {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.0[1..]);
        x
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
