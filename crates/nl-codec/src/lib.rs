//! Binary wire codec for the ledger core.
//!
//! The format is not self-describing: every entity writes its fields in a
//! fixed order and its reader consumes them in exactly that order. Variable
//! length data is prefixed with a compact varint (`0xFD`/`0xFE`/`0xFF` escape
//! bytes followed by a little-endian u16/u32/u64, shortest form only), and every declared length
//! or count is checked against a caller-supplied maximum *before* any body
//! byte is consumed.
//!
//! # Components
//!
//! - [`BinaryReader`] -- cursor over an immutable byte slice
//! - [`BinaryWriter`] -- append-only buffer mirroring every reader method
//! - [`Serializable`] -- the wire contract every ledger entity implements
//! - [`size`] -- byte-length helpers matching the writer
//! - [`json`] -- transport-safe string renderers for hashes, amounts, buffers

pub mod error;
pub mod json;
pub mod reader;
pub mod serializable;
pub mod size;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::BinaryReader;
pub use serializable::Serializable;
pub use writer::BinaryWriter;

/// Default upper bound for array counts and byte-string lengths.
pub const DEFAULT_MAX_LENGTH: usize = 0x0100_0000;
