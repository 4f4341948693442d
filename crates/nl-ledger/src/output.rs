use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_types::{Fixed8, UInt160, UInt256};
use serde::Serialize;

/// A transfer of `value` units of `asset` to the script hash `address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Output {
    pub asset: UInt256,
    pub value: Fixed8,
    pub address: UInt160,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputJson {
    pub n: u16,
    pub asset: String,
    pub value: String,
    pub address: String,
}

impl Output {
    pub const SIZE: usize = size::UINT256 + size::FIXED8 + size::UINT160;

    pub fn new(asset: UInt256, value: Fixed8, address: UInt160) -> Self {
        Self {
            asset,
            value,
            address,
        }
    }

    /// JSON form; `n` is the output's position within its transaction.
    pub fn serialize_json(&self, n: u16) -> OutputJson {
        OutputJson {
            n,
            asset: json::write_uint256(&self.asset),
            value: json::write_fixed8(self.value),
            address: json::write_uint160(&self.address),
        }
    }
}

impl Serializable for Output {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_uint256(&self.asset);
        writer.write_fixed8(self.value);
        writer.write_uint160(&self.address);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let asset = reader.read_uint256()?;
        let value = reader.read_fixed8()?;
        let address = reader.read_uint160()?;
        Ok(Self {
            asset,
            value,
            address,
        })
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}
