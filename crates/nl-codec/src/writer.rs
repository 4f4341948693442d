use nl_types::{Fixed8, PublicKey, UInt160, UInt256};

/// Append-only byte buffer mirroring [`BinaryReader`](crate::BinaryReader).
///
/// Writes are infallible: entities validate their limits at construction, so
/// anything reaching the writer is already well-formed.
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and return the bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u16_le(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u32_le(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i64_le(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_fixed8(&mut self, value: Fixed8) {
        self.write_i64_le(value.raw());
    }

    pub fn write_uint160(&mut self, value: &UInt160) {
        self.write_bytes(value.as_bytes());
    }

    pub fn write_uint256(&mut self, value: &UInt256) {
        self.write_bytes(value.as_bytes());
    }

    pub fn write_public_key(&mut self, value: &PublicKey) {
        self.write_bytes(value.as_bytes());
    }

    /// Encode a compact varint.
    pub fn write_var_uint(&mut self, value: u64) {
        if value < 0xFD {
            self.write_u8(value as u8);
        } else if value <= 0xFFFF {
            self.write_u8(0xFD);
            self.write_u16_le(value as u16);
        } else if value <= 0xFFFF_FFFF {
            self.write_u8(0xFE);
            self.write_u32_le(value as u32);
        } else {
            self.write_u8(0xFF);
            self.write_u64_le(value);
        }
    }

    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_var_uint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    /// Write a count-prefixed array.
    pub fn write_vec<T>(&mut self, items: &[T], mut write_element: impl FnMut(&mut Self, &T)) {
        self.write_var_uint(items.len() as u64);
        for item in items {
            write_element(self, item);
        }
    }
}
