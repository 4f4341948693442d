//! Typed values left on the VM stack after an invocation.

use nl_codec::{
    json, size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable,
    DEFAULT_MAX_LENGTH,
};
use nl_types::{PublicKey, UInt160, UInt256};
use num_bigint::BigInt;
use serde::Serialize;

use crate::json::{JsonContext, SerializableJson};

/// VM integer kept as its little-endian two's-complement bytes.
///
/// Storing the raw bytes keeps non-minimal encodings (e.g. `[0x00]` for zero)
/// intact across a decode/encode cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VmInteger(Vec<u8>);

impl VmInteger {
    /// Maximum byte width of a VM integer.
    pub const MAX_SIZE: usize = 32;

    pub fn from_le_bytes(bytes: Vec<u8>) -> CodecResult<Self> {
        if bytes.len() > Self::MAX_SIZE {
            return Err(CodecError::LengthTooLarge {
                length: bytes.len() as u64,
                max: Self::MAX_SIZE as u64,
            });
        }
        Ok(Self(bytes))
    }

    /// Minimal encoding of `value`. Zero encodes as the empty string.
    pub fn from_bigint(value: &BigInt) -> CodecResult<Self> {
        let bytes = if value.sign() == num_bigint::Sign::NoSign {
            Vec::new()
        } else {
            value.to_signed_bytes_le()
        };
        Self::from_le_bytes(bytes)
    }

    pub fn value(&self) -> BigInt {
        BigInt::from_signed_bytes_le(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<i64> for VmInteger {
    fn from(value: i64) -> Self {
        if value == 0 {
            return Self(Vec::new());
        }
        Self(BigInt::from(value).to_signed_bytes_le())
    }
}

/// Signature bytes, at most [`SignatureBytes::MAX_SIZE`] long.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SignatureBytes(Vec<u8>);

impl SignatureBytes {
    pub const MAX_SIZE: usize = size::SIGNATURE;

    pub fn new(bytes: Vec<u8>) -> CodecResult<Self> {
        if bytes.len() > Self::MAX_SIZE {
            return Err(CodecError::LengthTooLarge {
                length: bytes.len() as u64,
                max: Self::MAX_SIZE as u64,
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Items of an array parameter. Nesting depth and wire size are fixed when
/// the array is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterArray {
    items: Vec<ContractParameter>,
    depth: usize,
    size: usize,
}

impl ParameterArray {
    /// Fails with [`CodecError::NestingTooDeep`] when the array, counting
    /// itself, nests more than [`ContractParameter::MAX_DEPTH`] levels.
    pub fn new(items: Vec<ContractParameter>) -> CodecResult<Self> {
        let depth = 1 + items.iter().map(ContractParameter::depth).max().unwrap_or(0);
        if depth > ContractParameter::MAX_DEPTH {
            return Err(CodecError::NestingTooDeep(ContractParameter::MAX_DEPTH));
        }
        let size = size::vec(&items, |item| item.size());
        Ok(Self { items, depth, size })
    }

    pub fn items(&self) -> &[ContractParameter] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ContractParameter> {
        self.items
    }

    /// Array levels from here down, this one included.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractParameter {
    Signature(SignatureBytes),
    Boolean(bool),
    Integer(VmInteger),
    Hash160(UInt160),
    Hash256(UInt256),
    ByteArray(Vec<u8>),
    PublicKey(PublicKey),
    String(String),
    Array(ParameterArray),
    InteropInterface,
    Void,
}

/// JSON form: `{"type": ..., "value": ...}` with every payload rendered as a
/// string, except booleans and nested arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ContractParameterJson {
    Signature(String),
    Boolean(bool),
    Integer(String),
    Hash160(String),
    Hash256(String),
    ByteArray(String),
    PublicKey(String),
    String(String),
    Array(Vec<ContractParameterJson>),
    InteropInterface,
    Void,
}

impl ContractParameter {
    /// Deepest allowed array nesting.
    pub const MAX_DEPTH: usize = 16;

    pub fn signature(bytes: Vec<u8>) -> CodecResult<Self> {
        SignatureBytes::new(bytes).map(Self::Signature)
    }

    pub fn array(items: Vec<ContractParameter>) -> CodecResult<Self> {
        ParameterArray::new(items).map(Self::Array)
    }

    /// Array nesting below and including this value; zero for scalars.
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(array) => array.depth(),
            _ => 0,
        }
    }

    pub fn type_byte(&self) -> u8 {
        match self {
            Self::Signature(_) => 0x00,
            Self::Boolean(_) => 0x01,
            Self::Integer(_) => 0x02,
            Self::Hash160(_) => 0x03,
            Self::Hash256(_) => 0x04,
            Self::ByteArray(_) => 0x05,
            Self::PublicKey(_) => 0x06,
            Self::String(_) => 0x07,
            Self::Array(_) => 0x10,
            Self::InteropInterface => 0xF0,
            Self::Void => 0xFF,
        }
    }

    fn read_at(reader: &mut BinaryReader<'_>, depth: usize) -> CodecResult<Self> {
        let tag = reader.read_u8()?;
        Ok(match tag {
            0x00 => Self::Signature(SignatureBytes(reader.read_var_bytes(SignatureBytes::MAX_SIZE)?)),
            0x01 => Self::Boolean(reader.read_bool()?),
            0x02 => Self::Integer(VmInteger(reader.read_var_bytes(VmInteger::MAX_SIZE)?)),
            0x03 => Self::Hash160(reader.read_uint160()?),
            0x04 => Self::Hash256(reader.read_uint256()?),
            0x05 => Self::ByteArray(reader.read_var_bytes(DEFAULT_MAX_LENGTH)?),
            0x06 => Self::PublicKey(reader.read_public_key()?),
            0x07 => Self::String(reader.read_var_string(DEFAULT_MAX_LENGTH)?),
            0x10 => {
                if depth >= Self::MAX_DEPTH {
                    return Err(CodecError::NestingTooDeep(Self::MAX_DEPTH));
                }
                let items = reader.read_vec(DEFAULT_MAX_LENGTH, |r| Self::read_at(r, depth + 1))?;
                Self::Array(ParameterArray::new(items)?)
            }
            0xF0 => Self::InteropInterface,
            0xFF => Self::Void,
            value => {
                return Err(CodecError::UnknownDiscriminant {
                    kind: "contract parameter",
                    value,
                })
            }
        })
    }
}

impl Serializable for ContractParameter {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.type_byte());
        match self {
            Self::Signature(bytes) => writer.write_var_bytes(bytes.as_bytes()),
            Self::ByteArray(bytes) => writer.write_var_bytes(bytes),
            Self::Boolean(value) => writer.write_bool(*value),
            Self::Integer(value) => writer.write_var_bytes(value.as_bytes()),
            Self::Hash160(hash) => writer.write_uint160(hash),
            Self::Hash256(hash) => writer.write_uint256(hash),
            Self::PublicKey(key) => writer.write_public_key(key),
            Self::String(value) => writer.write_var_string(value),
            Self::Array(array) => writer.write_vec(array.items(), |w, item| item.write_wire(w)),
            Self::InteropInterface | Self::Void => {}
        }
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        Self::read_at(reader, 0)
    }

    fn size(&self) -> usize {
        size::UINT8
            + match self {
                Self::Signature(bytes) => size::var_bytes(bytes.as_bytes()),
                Self::ByteArray(bytes) => size::var_bytes(bytes),
                Self::Boolean(_) => size::BOOL,
                Self::Integer(value) => size::var_bytes(value.as_bytes()),
                Self::Hash160(_) => size::UINT160,
                Self::Hash256(_) => size::UINT256,
                Self::PublicKey(_) => size::PUBLIC_KEY,
                Self::String(value) => size::var_string(value),
                Self::Array(array) => array.size,
                Self::InteropInterface | Self::Void => 0,
            }
    }
}

impl SerializableJson for ContractParameter {
    type Json = ContractParameterJson;

    fn serialize_json(&self, context: &JsonContext<'_>) -> ContractParameterJson {
        match self {
            Self::Signature(bytes) => {
                ContractParameterJson::Signature(json::write_buffer(bytes.as_bytes()))
            }
            Self::Boolean(value) => ContractParameterJson::Boolean(*value),
            Self::Integer(value) => ContractParameterJson::Integer(value.value().to_string()),
            Self::Hash160(hash) => ContractParameterJson::Hash160(json::write_uint160(hash)),
            Self::Hash256(hash) => ContractParameterJson::Hash256(json::write_uint256(hash)),
            Self::ByteArray(bytes) => ContractParameterJson::ByteArray(json::write_buffer(bytes)),
            Self::PublicKey(key) => ContractParameterJson::PublicKey(json::write_public_key(key)),
            Self::String(value) => ContractParameterJson::String(value.clone()),
            Self::Array(array) => ContractParameterJson::Array(
                array.items().iter().map(|item| item.serialize_json(context)).collect(),
            ),
            Self::InteropInterface => ContractParameterJson::InteropInterface,
            Self::Void => ContractParameterJson::Void,
        }
    }
}
