use nl_codec::{size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_crypto::Hasher;
use nl_types::UInt256;
use serde::Serialize;

use super::TransactionType;
use crate::attribute::{Attribute, AttributeJson};
use crate::input::{Input, InputJson};
use crate::json::{JsonContext, SerializableJson};
use crate::output::{Output, OutputJson};
use crate::witness::{Witness, WitnessJson};

/// Upper bound on inputs, outputs, and witnesses per transaction.
pub const MAX_ENTRIES: usize = 65_536;

/// Fields shared by every transaction variant, before sealing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionParts {
    pub version: u8,
    pub attributes: Vec<Attribute>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub scripts: Vec<Witness>,
}

impl TransactionParts {
    /// Write the hashed portion: header, exclusive fields, attributes,
    /// inputs, outputs. Scripts are excluded.
    pub fn write_unsigned(
        &self,
        tx_type: TransactionType,
        writer: &mut BinaryWriter,
        exclusive: impl FnOnce(&mut BinaryWriter),
    ) {
        writer.write_u8(tx_type.to_byte());
        writer.write_u8(self.version);
        exclusive(writer);
        writer.write_vec(&self.attributes, |w, attr| attr.write_wire(w));
        writer.write_vec(&self.inputs, |w, input| input.write_wire(w));
        writer.write_vec(&self.outputs, |w, output| output.write_wire(w));
    }

    /// Read everything after the exclusive fields.
    pub(crate) fn read_tail(version: u8, reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let attributes = reader.read_vec(Attribute::MAX_PER_TRANSACTION, Attribute::read_wire)?;
        let inputs = reader.read_vec(MAX_ENTRIES, Input::read_wire)?;
        let outputs = reader.read_vec(MAX_ENTRIES, Output::read_wire)?;
        let scripts = reader.read_vec(MAX_ENTRIES, Witness::read_wire)?;
        Ok(Self {
            version,
            attributes,
            inputs,
            outputs,
            scripts,
        })
    }
}

/// Read `type` and `version`, requiring `expected` and `version <= max_version`.
pub(crate) fn read_header(
    reader: &mut BinaryReader<'_>,
    expected: TransactionType,
    max_version: u8,
) -> CodecResult<u8> {
    let actual = TransactionType::from_byte(reader.read_u8()?)?;
    if actual != expected {
        return Err(CodecError::DiscriminantMismatch {
            kind: "transaction type",
            expected: expected.to_byte(),
            actual: actual.to_byte(),
        });
    }
    let version = reader.read_u8()?;
    check_version(expected, version, max_version)?;
    Ok(version)
}

pub(crate) fn check_version(tx_type: TransactionType, version: u8, max: u8) -> CodecResult<()> {
    if version > max {
        tracing::debug!(tx_type = tx_type.name(), version, max, "transaction version out of range");
        return Err(CodecError::InvalidVersion {
            kind: tx_type.name(),
            version,
        });
    }
    Ok(())
}

/// Sealed transaction core: shared fields plus the hash and size derived
/// from them at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionBase {
    tx_type: TransactionType,
    parts: TransactionParts,
    hash: UInt256,
    size: usize,
}

impl TransactionBase {
    /// Seal `parts`, hashing the unsigned form produced with `exclusive`.
    pub(crate) fn seal(
        tx_type: TransactionType,
        parts: TransactionParts,
        exclusive: impl Fn(&mut BinaryWriter),
    ) -> CodecResult<Self> {
        if parts.attributes.len() > Attribute::MAX_PER_TRANSACTION {
            return Err(CodecError::LengthTooLarge {
                length: parts.attributes.len() as u64,
                max: Attribute::MAX_PER_TRANSACTION as u64,
            });
        }
        let mut writer = BinaryWriter::new();
        parts.write_unsigned(tx_type, &mut writer, &exclusive);
        let hash = Hasher::hash256(writer.as_bytes());
        let size = writer.len() + size::vec(&parts.scripts, |script| script.size());
        Ok(Self {
            tx_type,
            parts,
            hash,
            size,
        })
    }

    pub(crate) fn write_wire(&self, writer: &mut BinaryWriter, exclusive: impl FnOnce(&mut BinaryWriter)) {
        self.parts.write_unsigned(self.tx_type, writer, exclusive);
        writer.write_vec(&self.parts.scripts, |w, script| script.write_wire(w));
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn version(&self) -> u8 {
        self.parts.version
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.parts.attributes
    }

    pub fn inputs(&self) -> &[Input] {
        &self.parts.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.parts.outputs
    }

    pub fn scripts(&self) -> &[Witness] {
        &self.parts.scripts
    }

    /// Double-SHA256 of the unsigned serialization.
    pub fn hash(&self) -> UInt256 {
        self.hash
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn parts(&self) -> &TransactionParts {
        &self.parts
    }

    /// JSON fields common to all variants. Variant-specific fields are left
    /// unset for the caller to fill.
    pub(crate) fn json(&self, context: &JsonContext<'_>, sys_fee: String) -> TransactionJson {
        TransactionJson {
            txid: self.hash.to_hex_string(),
            size: self.size,
            tx_type: self.tx_type.name(),
            version: self.parts.version,
            attributes: self
                .parts
                .attributes
                .iter()
                .map(|attr| attr.serialize_json(context))
                .collect(),
            vin: self
                .parts
                .inputs
                .iter()
                .map(|input| input.serialize_json(context))
                .collect(),
            vout: self
                .parts
                .outputs
                .iter()
                .enumerate()
                .map(|(n, output)| output.serialize_json(n as u16))
                .collect(),
            scripts: self
                .parts
                .scripts
                .iter()
                .map(|script| script.serialize_json(context))
                .collect(),
            sys_fee,
            nonce: None,
            claims: None,
            script: None,
            gas: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionJson {
    pub txid: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub tx_type: &'static str,
    pub version: u8,
    pub attributes: Vec<AttributeJson>,
    pub vin: Vec<InputJson>,
    pub vout: Vec<OutputJson>,
    pub scripts: Vec<WitnessJson>,
    pub sys_fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<InputJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
}
