use nl_codec::{
    json, size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable,
    DEFAULT_MAX_LENGTH,
};
use nl_types::Fixed8;
use serde::Serialize;

use super::VmState;
use crate::contract_parameter::{ContractParameter, ContractParameterJson};
use crate::json::{JsonContext, SerializableJson};

/// Fields common to every invocation result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationResultBase {
    pub gas_consumed: Fixed8,
    pub gas_cost: Fixed8,
    pub stack: Vec<ContractParameter>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvocationResultJson {
    pub state: &'static str,
    pub gas_consumed: String,
    pub gas_cost: String,
    pub stack: Vec<ContractParameterJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InvocationResultBase {
    /// Read the state byte and the shared fields, requiring `expected`.
    pub(crate) fn read_with_state(
        reader: &mut BinaryReader<'_>,
        expected: VmState,
    ) -> CodecResult<Self> {
        let state = VmState::from_byte(reader.read_u8()?)?;
        if state != expected {
            return Err(CodecError::DiscriminantMismatch {
                kind: "vm state",
                expected: expected.to_byte(),
                actual: state.to_byte(),
            });
        }
        Ok(Self {
            gas_consumed: reader.read_fixed8()?,
            gas_cost: reader.read_fixed8()?,
            stack: reader.read_vec(DEFAULT_MAX_LENGTH, ContractParameter::read_wire)?,
        })
    }

    pub(crate) fn write_with_state(&self, writer: &mut BinaryWriter, state: VmState) {
        writer.write_u8(state.to_byte());
        writer.write_fixed8(self.gas_consumed);
        writer.write_fixed8(self.gas_cost);
        writer.write_vec(&self.stack, |w, item| item.write_wire(w));
    }

    pub(crate) fn wire_size(&self) -> usize {
        size::UINT8 + size::FIXED8 * 2 + size::vec(&self.stack, |item| item.size())
    }

    pub(crate) fn json(&self, context: &JsonContext<'_>, state: VmState) -> InvocationResultJson {
        InvocationResultJson {
            state: state.name(),
            gas_consumed: json::write_fixed8(self.gas_consumed),
            gas_cost: json::write_fixed8(self.gas_cost),
            stack: self.stack.iter().map(|item| item.serialize_json(context)).collect(),
            message: None,
        }
    }
}
