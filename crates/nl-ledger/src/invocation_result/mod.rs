//! Outcome of running a script in the VM: `Halt` with the result stack, or
//! `Fault` with an error message.

mod base;
mod fault;
mod halt;

pub use base::{InvocationResultBase, InvocationResultJson};
pub use fault::InvocationResultError;
pub use halt::InvocationResultSuccess;

use nl_codec::{BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};

use crate::json::{JsonContext, SerializableJson};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VmState {
    Halt,
    Fault,
}

impl VmState {
    pub fn to_byte(self) -> u8 {
        match self {
            VmState::Halt => 0x01,
            VmState::Fault => 0x02,
        }
    }

    pub fn from_byte(value: u8) -> CodecResult<Self> {
        match value {
            0x01 => Ok(VmState::Halt),
            0x02 => Ok(VmState::Fault),
            value => Err(CodecError::UnknownDiscriminant {
                kind: "vm state",
                value,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VmState::Halt => "HALT",
            VmState::Fault => "FAULT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvocationResult {
    Halt(InvocationResultSuccess),
    Fault(InvocationResultError),
}

impl InvocationResult {
    pub fn state(&self) -> VmState {
        match self {
            InvocationResult::Halt(_) => VmState::Halt,
            InvocationResult::Fault(_) => VmState::Fault,
        }
    }

    pub fn base(&self) -> &InvocationResultBase {
        match self {
            InvocationResult::Halt(result) => result.base(),
            InvocationResult::Fault(result) => result.base(),
        }
    }
}

impl Serializable for InvocationResult {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        match self {
            InvocationResult::Halt(result) => result.write_wire(writer),
            InvocationResult::Fault(result) => result.write_wire(writer),
        }
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        match VmState::from_byte(reader.peek_u8()?)? {
            VmState::Halt => Ok(InvocationResult::Halt(InvocationResultSuccess::read_wire(reader)?)),
            VmState::Fault => Ok(InvocationResult::Fault(InvocationResultError::read_wire(reader)?)),
        }
    }

    fn size(&self) -> usize {
        match self {
            InvocationResult::Halt(result) => result.size(),
            InvocationResult::Fault(result) => result.size(),
        }
    }
}

impl SerializableJson for InvocationResult {
    type Json = InvocationResultJson;

    fn serialize_json(&self, context: &JsonContext<'_>) -> InvocationResultJson {
        let mut json = self.base().json(context, self.state());
        if let InvocationResult::Fault(result) = self {
            json.message = Some(result.message().to_string());
        }
        json
    }
}

impl From<InvocationResultSuccess> for InvocationResult {
    fn from(result: InvocationResultSuccess) -> Self {
        InvocationResult::Halt(result)
    }
}

impl From<InvocationResultError> for InvocationResult {
    fn from(result: InvocationResultError) -> Self {
        InvocationResult::Fault(result)
    }
}
