use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_types::{PublicKey, UInt160, UInt256};
use serde::Serialize;

use crate::json::{JsonContext, SerializableJson};

/// Payload carried by an [`Attribute`]; which variant is legal depends on the
/// usage byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeData {
    Hash(UInt256),
    PublicKey(PublicKey),
    Script(UInt160),
    Buffer(Vec<u8>),
}

/// Payload class implied by a usage byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UsageClass {
    Hash,
    PublicKey,
    Script,
    /// One-byte length prefix.
    ShortBuffer,
    /// Varint length prefix.
    Buffer,
}

const CONTRACT_HASH: u8 = 0x00;
const ECDH02: u8 = 0x02;
const ECDH03: u8 = 0x03;
const SCRIPT: u8 = 0x20;
const VOTE: u8 = 0x30;
const DESCRIPTION_URL: u8 = 0x81;
const DESCRIPTION: u8 = 0x90;
const HASH1: u8 = 0xa1;
const HASH15: u8 = 0xaf;
const REMARK: u8 = 0xf0;

fn usage_class(usage: u8) -> Option<UsageClass> {
    match usage {
        CONTRACT_HASH | VOTE | HASH1..=HASH15 => Some(UsageClass::Hash),
        ECDH02 | ECDH03 => Some(UsageClass::PublicKey),
        SCRIPT => Some(UsageClass::Script),
        DESCRIPTION_URL => Some(UsageClass::ShortBuffer),
        DESCRIPTION | REMARK..=0xff => Some(UsageClass::Buffer),
        _ => None,
    }
}

fn usage_name(usage: u8) -> String {
    match usage {
        CONTRACT_HASH => "ContractHash".into(),
        ECDH02 => "ECDH02".into(),
        ECDH03 => "ECDH03".into(),
        SCRIPT => "Script".into(),
        VOTE => "Vote".into(),
        DESCRIPTION_URL => "DescriptionUrl".into(),
        DESCRIPTION => "Description".into(),
        HASH1..=HASH15 => format!("Hash{}", usage - HASH1 + 1),
        REMARK => "Remark".into(),
        other => format!("Remark{}", other - REMARK),
    }
}

/// Typed transaction attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    usage: u8,
    data: AttributeData,
    size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeJson {
    pub usage: String,
    pub data: String,
}

impl Attribute {
    /// Maximum attributes carried by one transaction.
    pub const MAX_PER_TRANSACTION: usize = 16;
    pub const MAX_DESCRIPTION_URL: usize = 255;
    pub const MAX_BUFFER: usize = 65_535;

    /// Build an attribute, checking that `data` fits `usage`.
    pub fn new(usage: u8, data: AttributeData) -> CodecResult<Self> {
        let class = usage_class(usage).ok_or(CodecError::UnknownDiscriminant {
            kind: "attribute usage",
            value: usage,
        })?;
        let fits = match (class, &data) {
            (UsageClass::Hash, AttributeData::Hash(_)) => true,
            (UsageClass::PublicKey, AttributeData::PublicKey(key)) => key.prefix() == usage,
            (UsageClass::Script, AttributeData::Script(_)) => true,
            (UsageClass::ShortBuffer, AttributeData::Buffer(buf)) => {
                check_len(buf.len(), Self::MAX_DESCRIPTION_URL)?;
                true
            }
            (UsageClass::Buffer, AttributeData::Buffer(buf)) => {
                check_len(buf.len(), Self::MAX_BUFFER)?;
                true
            }
            _ => false,
        };
        if !fits {
            return Err(CodecError::InvalidValue(format!(
                "attribute data does not match usage 0x{usage:02x}"
            )));
        }
        let size = size::UINT8
            + match &data {
                AttributeData::Hash(_) | AttributeData::PublicKey(_) => size::UINT256,
                AttributeData::Script(_) => size::UINT160,
                AttributeData::Buffer(buf) if usage == DESCRIPTION_URL => size::UINT8 + buf.len(),
                AttributeData::Buffer(buf) => size::var_bytes(buf),
            };
        Ok(Self { usage, data, size })
    }

    pub fn usage(&self) -> u8 {
        self.usage
    }

    pub fn data(&self) -> &AttributeData {
        &self.data
    }

    /// The script hash this attribute asks to be verified, if any.
    pub fn script_hash(&self) -> Option<UInt160> {
        match self.data {
            AttributeData::Script(hash) => Some(hash),
            _ => None,
        }
    }
}

fn check_len(len: usize, max: usize) -> CodecResult<()> {
    if len > max {
        return Err(CodecError::LengthTooLarge {
            length: len as u64,
            max: max as u64,
        });
    }
    Ok(())
}

impl Serializable for Attribute {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.usage);
        match &self.data {
            AttributeData::Hash(hash) => writer.write_uint256(hash),
            // The prefix byte is the usage; only X goes on the wire.
            AttributeData::PublicKey(key) => writer.write_bytes(&key.x()),
            AttributeData::Script(hash) => writer.write_uint160(hash),
            AttributeData::Buffer(buf) if self.usage == DESCRIPTION_URL => {
                writer.write_u8(buf.len() as u8);
                writer.write_bytes(buf);
            }
            AttributeData::Buffer(buf) => writer.write_var_bytes(buf),
        }
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let usage = reader.read_u8()?;
        let class = usage_class(usage).ok_or(CodecError::UnknownDiscriminant {
            kind: "attribute usage",
            value: usage,
        })?;
        let data = match class {
            UsageClass::Hash => AttributeData::Hash(reader.read_uint256()?),
            UsageClass::PublicKey => {
                AttributeData::PublicKey(PublicKey::from_parts(usage, reader.read_array()?)?)
            }
            UsageClass::Script => AttributeData::Script(reader.read_uint160()?),
            UsageClass::ShortBuffer => {
                let len = usize::from(reader.read_u8()?);
                AttributeData::Buffer(reader.read_bytes(len)?.to_vec())
            }
            UsageClass::Buffer => AttributeData::Buffer(reader.read_var_bytes(Self::MAX_BUFFER)?),
        };
        Self::new(usage, data)
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl SerializableJson for Attribute {
    type Json = AttributeJson;

    fn serialize_json(&self, _context: &JsonContext<'_>) -> AttributeJson {
        let data = match &self.data {
            AttributeData::Hash(hash) => json::write_uint256(hash),
            AttributeData::PublicKey(key) => json::write_public_key(key),
            AttributeData::Script(hash) => json::write_uint160(hash),
            AttributeData::Buffer(buf) => json::write_buffer(buf),
        };
        AttributeJson {
            usage: usage_name(self.usage),
            data,
        }
    }
}
