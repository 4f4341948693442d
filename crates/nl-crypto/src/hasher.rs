use nl_types::{UInt160, UInt256};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Protocol hash functions.
pub struct Hasher;

impl Hasher {
    /// Single SHA-256.
    pub fn sha256(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    /// Double SHA-256, the identifier hash for transactions and blocks.
    pub fn hash256(data: &[u8]) -> UInt256 {
        let first = Sha256::digest(data);
        UInt256::from_bytes(Sha256::digest(first).into())
    }

    /// RIPEMD-160 over SHA-256, the identifier hash for scripts.
    pub fn hash160(data: &[u8]) -> UInt160 {
        let first = Sha256::digest(data);
        UInt160::from_bytes(Ripemd160::digest(first).into())
    }

    /// Verify that data produces the expected 256-bit identifier.
    pub fn verify_hash256(data: &[u8], expected: &UInt256) -> bool {
        Self::hash256(data) == *expected
    }
}
