use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_ledger::{JsonContext, SerializableJson};

use super::{read_header, ConsensusMessageJson, ConsensusMessageType, SIGNATURE_SIZE};

/// A validator's signature over the proposed block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrepareResponse {
    view_number: u8,
    signature: [u8; SIGNATURE_SIZE],
}

impl PrepareResponse {
    pub fn new(view_number: u8, signature: [u8; SIGNATURE_SIZE]) -> Self {
        Self {
            view_number,
            signature,
        }
    }

    pub fn view_number(&self) -> u8 {
        self.view_number
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.signature
    }
}

impl Serializable for PrepareResponse {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_u8(ConsensusMessageType::PrepareResponse.to_byte());
        writer.write_u8(self.view_number);
        writer.write_bytes(&self.signature);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let view_number = read_header(reader, ConsensusMessageType::PrepareResponse)?;
        let signature = reader.read_array()?;
        Ok(Self::new(view_number, signature))
    }

    fn size(&self) -> usize {
        size::UINT8 * 2 + size::SIGNATURE
    }
}

impl SerializableJson for PrepareResponse {
    type Json = ConsensusMessageJson;

    fn serialize_json(&self, _context: &JsonContext<'_>) -> ConsensusMessageJson {
        let mut json =
            ConsensusMessageJson::header(ConsensusMessageType::PrepareResponse, self.view_number);
        json.signature = Some(json::write_buffer(&self.signature));
        json
    }
}
