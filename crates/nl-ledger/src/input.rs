use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_types::UInt256;
use serde::Serialize;

use crate::json::{JsonContext, SerializableJson};

/// Reference to an output of a prior transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Input {
    pub hash: UInt256,
    pub index: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputJson {
    pub txid: String,
    pub vout: u16,
}

impl Input {
    /// Wire size: 32-byte hash + 2-byte index.
    pub const SIZE: usize = size::UINT256 + size::UINT16;

    pub fn new(hash: UInt256, index: u16) -> Self {
        Self { hash, index }
    }
}

impl Serializable for Input {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_uint256(&self.hash);
        writer.write_u16_le(self.index);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let hash = reader.read_uint256()?;
        let index = reader.read_u16_le()?;
        Ok(Self { hash, index })
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

impl SerializableJson for Input {
    type Json = InputJson;

    fn serialize_json(&self, _context: &JsonContext<'_>) -> InputJson {
        InputJson {
            txid: json::write_uint256(&self.hash),
            vout: self.index,
        }
    }
}
