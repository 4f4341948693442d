use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_crypto::Hasher;
use nl_types::UInt160;
use serde::Serialize;

use crate::json::{JsonContext, SerializableJson};

/// Invocation + verification script pair proving authorization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Witness {
    invocation: Vec<u8>,
    verification: Vec<u8>,
    size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WitnessJson {
    pub invocation: String,
    pub verification: String,
}

impl Witness {
    /// Maximum length of either script.
    pub const MAX_SCRIPT_SIZE: usize = 65_536;

    pub fn new(invocation: Vec<u8>, verification: Vec<u8>) -> CodecResult<Self> {
        for script in [&invocation, &verification] {
            if script.len() > Self::MAX_SCRIPT_SIZE {
                return Err(CodecError::LengthTooLarge {
                    length: script.len() as u64,
                    max: Self::MAX_SCRIPT_SIZE as u64,
                });
            }
        }
        let size = size::var_bytes(&invocation) + size::var_bytes(&verification);
        Ok(Self {
            invocation,
            verification,
            size,
        })
    }

    pub fn invocation(&self) -> &[u8] {
        &self.invocation
    }

    pub fn verification(&self) -> &[u8] {
        &self.verification
    }

    /// Hash of the verification script. The verifying account must match it.
    pub fn script_hash(&self) -> UInt160 {
        Hasher::hash160(&self.verification)
    }
}

impl Serializable for Witness {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_var_bytes(&self.invocation);
        writer.write_var_bytes(&self.verification);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let invocation = reader.read_var_bytes(Self::MAX_SCRIPT_SIZE)?;
        let verification = reader.read_var_bytes(Self::MAX_SCRIPT_SIZE)?;
        Self::new(invocation, verification)
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl SerializableJson for Witness {
    type Json = WitnessJson;

    fn serialize_json(&self, _context: &JsonContext<'_>) -> WitnessJson {
        WitnessJson {
            invocation: json::write_buffer(&self.invocation),
            verification: json::write_buffer(&self.verification),
        }
    }
}
