use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid public key prefix: 0x{0:02x}")]
    InvalidPublicKey(u8),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
