use nl_codec::{size, BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_ledger::{JsonContext, SerializableJson};

use super::{read_header, ConsensusMessageJson, ConsensusMessageType};

/// Vote to move the round to `new_view_number`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeView {
    view_number: u8,
    new_view_number: u8,
}

impl ChangeView {
    pub fn new(view_number: u8, new_view_number: u8) -> Self {
        Self {
            view_number,
            new_view_number,
        }
    }

    pub fn view_number(&self) -> u8 {
        self.view_number
    }

    pub fn new_view_number(&self) -> u8 {
        self.new_view_number
    }
}

impl Serializable for ChangeView {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_u8(ConsensusMessageType::ChangeView.to_byte());
        writer.write_u8(self.view_number);
        writer.write_u8(self.new_view_number);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let view_number = read_header(reader, ConsensusMessageType::ChangeView)?;
        let new_view_number = reader.read_u8()?;
        Ok(Self::new(view_number, new_view_number))
    }

    fn size(&self) -> usize {
        size::UINT8 * 3
    }
}

impl SerializableJson for ChangeView {
    type Json = ConsensusMessageJson;

    fn serialize_json(&self, _context: &JsonContext<'_>) -> ConsensusMessageJson {
        let mut json = ConsensusMessageJson::header(ConsensusMessageType::ChangeView, self.view_number);
        json.new_view_number = Some(self.new_view_number);
        json
    }
}
