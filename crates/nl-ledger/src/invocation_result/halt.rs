use nl_codec::{BinaryReader, BinaryWriter, CodecResult, Serializable};

use super::base::InvocationResultBase;
use super::VmState;

/// Script ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationResultSuccess {
    base: InvocationResultBase,
    size: usize,
}

impl InvocationResultSuccess {
    pub fn new(base: InvocationResultBase) -> Self {
        let size = base.wire_size();
        Self { base, size }
    }

    pub fn base(&self) -> &InvocationResultBase {
        &self.base
    }
}

impl Serializable for InvocationResultSuccess {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        self.base.write_with_state(writer, VmState::Halt);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        Ok(Self::new(InvocationResultBase::read_with_state(reader, VmState::Halt)?))
    }

    fn size(&self) -> usize {
        self.size
    }
}
