use nl_types::{Fixed8, PublicKey, UInt160, UInt256};

use crate::error::{CodecError, CodecResult};

/// Cursor over an immutable byte buffer.
///
/// Every read advances the cursor. A failed read leaves the reader in an
/// unspecified position; callers abandon the whole decode on error.
#[derive(Debug)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail if any input is left unread.
    pub fn ensure_exhausted(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> CodecResult<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(CodecError::UnexpectedEof {
                needed: 1,
                remaining: 0,
            })
    }

    /// Read a raw span of `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::UnexpectedEof {
                needed: len,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Only `0x00` and `0x01` are accepted so that values re-encode exactly.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidValue(format!("boolean byte 0x{other:02x}"))),
        }
    }

    pub fn read_u16_le(&mut self) -> CodecResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> CodecResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64_le(&mut self) -> CodecResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_fixed8(&mut self) -> CodecResult<Fixed8> {
        Ok(Fixed8::from_raw(self.read_i64_le()?))
    }

    pub fn read_uint160(&mut self) -> CodecResult<UInt160> {
        Ok(UInt160::from_bytes(self.read_array()?))
    }

    pub fn read_uint256(&mut self) -> CodecResult<UInt256> {
        Ok(UInt256::from_bytes(self.read_array()?))
    }

    pub fn read_public_key(&mut self) -> CodecResult<PublicKey> {
        Ok(PublicKey::from_bytes(self.read_array()?)?)
    }

    /// Read a compact varint and check it against `max`.
    ///
    /// Only the shortest encoding of a value is accepted, so every decoded
    /// entity re-encodes to the bytes it was read from.
    pub fn read_var_uint(&mut self, max: u64) -> CodecResult<u64> {
        let (value, min) = match self.read_u8()? {
            0xFD => (u64::from(self.read_u16_le()?), 0xFD),
            0xFE => (u64::from(self.read_u32_le()?), 0x1_0000),
            0xFF => (self.read_u64_le()?, 0x1_0000_0000),
            small => (u64::from(small), 0),
        };
        if value < min {
            return Err(CodecError::InvalidValue(format!(
                "non-canonical varint encoding of {value}"
            )));
        }
        if value > max {
            return Err(CodecError::LengthTooLarge { length: value, max });
        }
        Ok(value)
    }

    /// Read a varint length prefix bounded by `max`, as a `usize`.
    fn read_length(&mut self, max: usize) -> CodecResult<usize> {
        let len = self.read_var_uint(max as u64)?;
        usize::try_from(len).map_err(|_| CodecError::LengthTooLarge {
            length: len,
            max: max as u64,
        })
    }

    /// Read a length-prefixed byte string of at most `max` bytes.
    pub fn read_var_bytes(&mut self, max: usize) -> CodecResult<Vec<u8>> {
        let len = self.read_length(max)?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string of at most `max` bytes.
    ///
    /// The declared length is checked before the body is touched.
    pub fn read_var_string(&mut self, max: usize) -> CodecResult<String> {
        let bytes = self.read_var_bytes(max)?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Read a count-prefixed array of at most `max` elements.
    pub fn read_vec<T>(
        &mut self,
        max: usize,
        mut read_element: impl FnMut(&mut Self) -> CodecResult<T>,
    ) -> CodecResult<Vec<T>> {
        let count = self.read_length(max)?;
        // Every element takes at least one byte; never trust the count for
        // the allocation.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(read_element(self)?);
        }
        Ok(items)
    }
}
