//! Transport-safe renderers used by every entity's JSON form.
//!
//! Hashes render as `0x`-prefixed, byte-reversed hex; amounts as decimal
//! strings; opaque buffers as plain lowercase hex. Raw binary never appears
//! in JSON.

use nl_types::{Fixed8, PublicKey, UInt160, UInt256};

pub fn write_uint160(value: &UInt160) -> String {
    value.to_hex_string()
}

pub fn write_uint256(value: &UInt256) -> String {
    value.to_hex_string()
}

pub fn write_fixed8(value: Fixed8) -> String {
    value.to_decimal_string()
}

pub fn write_public_key(value: &PublicKey) -> String {
    value.to_hex()
}

pub fn write_buffer(value: &[u8]) -> String {
    hex::encode(value)
}
