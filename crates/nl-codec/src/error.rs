use nl_types::{TypeError, UInt256};
use thiserror::Error;

/// Malformed wire input.
///
/// Every variant is fatal to the decode call that produced it: the bytes are
/// permanently invalid and no partially built entity is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("declared length {length} exceeds maximum {max}")]
    LengthTooLarge { length: u64, max: u64 },

    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    #[error("unknown {kind} discriminant: 0x{value:02x}")]
    UnknownDiscriminant { kind: &'static str, value: u8 },

    #[error("{kind} discriminant mismatch: expected 0x{expected:02x}, got 0x{actual:02x}")]
    DiscriminantMismatch {
        kind: &'static str,
        expected: u8,
        actual: u8,
    },

    #[error("unsupported {kind} version: {version}")]
    InvalidVersion { kind: &'static str, version: u8 },

    #[error("duplicate entries: distinct {distinct}, total {total}")]
    DuplicateEntries { distinct: usize, total: usize },

    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: UInt256, actual: UInt256 },

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("nesting depth exceeds {0}")]
    NestingTooDeep(usize),

    #[error("invalid field value: {0}")]
    InvalidValue(String),
}

impl From<TypeError> for CodecError {
    fn from(err: TypeError) -> Self {
        CodecError::InvalidValue(err.to_string())
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
