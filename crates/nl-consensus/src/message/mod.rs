mod change_view;
mod prepare_request;
mod prepare_response;

pub use change_view::ChangeView;
pub use prepare_request::PrepareRequest;
pub use prepare_response::PrepareResponse;

use nl_codec::{BinaryReader, CodecError, CodecResult};
use serde::Serialize;

/// Length of a consensus signature.
pub const SIGNATURE_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsensusMessageType {
    ChangeView,
    PrepareRequest,
    PrepareResponse,
}

impl ConsensusMessageType {
    pub fn to_byte(self) -> u8 {
        match self {
            Self::ChangeView => 0x00,
            Self::PrepareRequest => 0x20,
            Self::PrepareResponse => 0x21,
        }
    }

    pub fn from_byte(value: u8) -> CodecResult<Self> {
        match value {
            0x00 => Ok(Self::ChangeView),
            0x20 => Ok(Self::PrepareRequest),
            0x21 => Ok(Self::PrepareResponse),
            value => Err(CodecError::UnknownDiscriminant {
                kind: "consensus message type",
                value,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ChangeView => "ChangeView",
            Self::PrepareRequest => "PrepareRequest",
            Self::PrepareResponse => "PrepareResponse",
        }
    }
}

/// Read `type` and `view_number`, requiring `expected`. Returns the view.
pub(crate) fn read_header(
    reader: &mut BinaryReader<'_>,
    expected: ConsensusMessageType,
) -> CodecResult<u8> {
    let actual = ConsensusMessageType::from_byte(reader.read_u8()?)?;
    if actual != expected {
        return Err(CodecError::DiscriminantMismatch {
            kind: "consensus message type",
            expected: expected.to_byte(),
            actual: actual.to_byte(),
        });
    }
    reader.read_u8()
}

/// One dBFT round message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsensusMessage {
    ChangeView(ChangeView),
    PrepareRequest(PrepareRequest),
    PrepareResponse(PrepareResponse),
}

impl ConsensusMessage {
    pub fn message_type(&self) -> ConsensusMessageType {
        match self {
            Self::ChangeView(_) => ConsensusMessageType::ChangeView,
            Self::PrepareRequest(_) => ConsensusMessageType::PrepareRequest,
            Self::PrepareResponse(_) => ConsensusMessageType::PrepareResponse,
        }
    }

    pub fn view_number(&self) -> u8 {
        match self {
            Self::ChangeView(msg) => msg.view_number(),
            Self::PrepareRequest(msg) => msg.view_number(),
            Self::PrepareResponse(msg) => msg.view_number(),
        }
    }
}

impl From<ChangeView> for ConsensusMessage {
    fn from(msg: ChangeView) -> Self {
        Self::ChangeView(msg)
    }
}

impl From<PrepareRequest> for ConsensusMessage {
    fn from(msg: PrepareRequest) -> Self {
        Self::PrepareRequest(msg)
    }
}

impl From<PrepareResponse> for ConsensusMessage {
    fn from(msg: PrepareResponse) -> Self {
        Self::PrepareResponse(msg)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsensusMessageJson {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub view_number: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_view_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_consensus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hashes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miner_transaction: Option<nl_ledger::TransactionJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ConsensusMessageJson {
    pub(crate) fn header(message_type: ConsensusMessageType, view_number: u8) -> Self {
        Self {
            message_type: message_type.name(),
            view_number,
            new_view_number: None,
            nonce: None,
            next_consensus: None,
            transaction_hashes: None,
            miner_transaction: None,
            signature: None,
        }
    }
}
