use nl_codec::{size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};

use super::base::InvocationResultBase;
use super::VmState;

/// Script aborted; `message` describes why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationResultError {
    base: InvocationResultBase,
    message: String,
    size: usize,
}

impl InvocationResultError {
    pub const MAX_MESSAGE: usize = 1024;

    pub fn new(base: InvocationResultBase, message: String) -> CodecResult<Self> {
        if message.len() > Self::MAX_MESSAGE {
            return Err(CodecError::LengthTooLarge {
                length: message.len() as u64,
                max: Self::MAX_MESSAGE as u64,
            });
        }
        let size = base.wire_size() + size::var_string(&message);
        Ok(Self {
            base,
            message,
            size,
        })
    }

    pub fn base(&self) -> &InvocationResultBase {
        &self.base
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Serializable for InvocationResultError {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        self.base.write_with_state(writer, VmState::Fault);
        writer.write_var_string(&self.message);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let base = InvocationResultBase::read_with_state(reader, VmState::Fault)?;
        let message = reader.read_var_string(Self::MAX_MESSAGE)?;
        Self::new(base, message)
    }

    fn size(&self) -> usize {
        self.size
    }
}
