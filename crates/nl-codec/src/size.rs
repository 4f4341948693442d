//! Byte-length helpers. Each function returns exactly what the matching
//! [`BinaryWriter`](crate::BinaryWriter) method appends.

pub const UINT8: usize = 1;
pub const BOOL: usize = 1;
pub const UINT16: usize = 2;
pub const UINT32: usize = 4;
pub const UINT64: usize = 8;
pub const FIXED8: usize = 8;
pub const UINT160: usize = 20;
pub const UINT256: usize = 32;
pub const PUBLIC_KEY: usize = 33;
pub const SIGNATURE: usize = 64;

/// Encoded length of a compact varint.
pub fn var_uint(value: u64) -> usize {
    if value < 0xFD {
        1
    } else if value <= 0xFFFF {
        3
    } else if value <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

pub fn var_bytes(bytes: &[u8]) -> usize {
    var_uint(bytes.len() as u64) + bytes.len()
}

pub fn var_string(value: &str) -> usize {
    var_bytes(value.as_bytes())
}

/// Encoded length of a count-prefixed array.
pub fn vec<T>(items: &[T], element_size: impl Fn(&T) -> usize) -> usize {
    var_uint(items.len() as u64) + items.iter().map(element_size).sum::<usize>()
}
