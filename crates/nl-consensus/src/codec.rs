use nl_codec::{BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_ledger::{JsonContext, SerializableJson};

use crate::message::{
    ChangeView, ConsensusMessage, ConsensusMessageJson, ConsensusMessageType, PrepareRequest,
    PrepareResponse,
};

/// Dispatch codec for consensus messages, keyed on the leading type byte.
pub struct ConsensusCodec;

impl ConsensusCodec {
    /// Encode a message as `type | view_number | body`.
    pub fn encode(msg: &ConsensusMessage) -> Vec<u8> {
        msg.serialize_wire()
    }

    /// Decode one complete message. Trailing bytes are rejected.
    pub fn decode(data: &[u8]) -> CodecResult<ConsensusMessage> {
        ConsensusMessage::deserialize_wire(data)
    }
}

impl Serializable for ConsensusMessage {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        match self {
            ConsensusMessage::ChangeView(msg) => msg.write_wire(writer),
            ConsensusMessage::PrepareRequest(msg) => msg.write_wire(writer),
            ConsensusMessage::PrepareResponse(msg) => msg.write_wire(writer),
        }
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let message_type = ConsensusMessageType::from_byte(reader.peek_u8()?)?;
        tracing::trace!(message_type = message_type.name(), "decoding consensus message");
        Ok(match message_type {
            ConsensusMessageType::ChangeView => ChangeView::read_wire(reader)?.into(),
            ConsensusMessageType::PrepareRequest => PrepareRequest::read_wire(reader)?.into(),
            ConsensusMessageType::PrepareResponse => PrepareResponse::read_wire(reader)?.into(),
        })
    }

    fn size(&self) -> usize {
        match self {
            ConsensusMessage::ChangeView(msg) => msg.size(),
            ConsensusMessage::PrepareRequest(msg) => msg.size(),
            ConsensusMessage::PrepareResponse(msg) => msg.size(),
        }
    }
}

impl SerializableJson for ConsensusMessage {
    type Json = ConsensusMessageJson;

    fn serialize_json(&self, context: &JsonContext<'_>) -> ConsensusMessageJson {
        match self {
            ConsensusMessage::ChangeView(msg) => msg.serialize_json(context),
            ConsensusMessage::PrepareRequest(msg) => msg.serialize_json(context),
            ConsensusMessage::PrepareResponse(msg) => msg.serialize_json(context),
        }
    }
}
