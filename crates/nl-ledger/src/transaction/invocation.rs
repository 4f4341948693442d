use std::collections::BTreeSet;

use nl_codec::{BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_types::{Fixed8, UInt160};

use super::base::{check_version, read_header, TransactionBase, TransactionParts};
use super::TransactionType;
use crate::error::{VerifyError, VerifyResult};
use crate::traits::LedgerLookup;
use crate::verify::{self, VerifyOptions};

/// Runs a script in the VM, paying `gas` for execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationTransaction {
    base: TransactionBase,
    script: Vec<u8>,
    gas: Fixed8,
}

fn write_exclusive(writer: &mut BinaryWriter, version: u8, script: &[u8], gas: Fixed8) {
    writer.write_var_bytes(script);
    if version >= 1 {
        writer.write_fixed8(gas);
    }
}

impl InvocationTransaction {
    pub const MAX_VERSION: u8 = 1;
    pub const MAX_SCRIPT_SIZE: usize = 65_536;

    /// Version 0 carries no gas field; `gas` must then be zero.
    pub fn new(parts: TransactionParts, script: Vec<u8>, gas: Fixed8) -> CodecResult<Self> {
        check_version(TransactionType::Invocation, parts.version, Self::MAX_VERSION)?;
        if script.len() > Self::MAX_SCRIPT_SIZE {
            return Err(CodecError::LengthTooLarge {
                length: script.len() as u64,
                max: Self::MAX_SCRIPT_SIZE as u64,
            });
        }
        let version = parts.version;
        if version == 0 && !gas.is_zero() {
            return Err(CodecError::InvalidValue(
                "version 0 invocation cannot carry gas".into(),
            ));
        }
        let base = TransactionBase::seal(TransactionType::Invocation, parts, |w| {
            write_exclusive(w, version, &script, gas)
        })?;
        Ok(Self { base, script, gas })
    }

    pub fn base(&self) -> &TransactionBase {
        &self.base
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn gas(&self) -> Fixed8 {
        self.gas
    }

    pub async fn script_hashes_for_verifying(
        &self,
        lookup: &dyn LedgerLookup,
    ) -> VerifyResult<BTreeSet<UInt160>> {
        verify::base_script_hashes(&self.base, lookup).await
    }

    pub async fn verify(
        &self,
        lookup: &dyn LedgerLookup,
        options: &VerifyOptions<'_>,
    ) -> VerifyResult<()> {
        if self.gas.is_negative() {
            return Err(VerifyError::failed("negative gas"));
        }
        if !self.gas.is_whole() {
            return Err(VerifyError::failed("gas must be a whole number of tokens"));
        }
        verify::verify_base(&self.base, self.script_hashes_for_verifying(lookup), options).await
    }
}

impl Serializable for InvocationTransaction {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        let version = self.base.version();
        self.base
            .write_wire(writer, |w| write_exclusive(w, version, &self.script, self.gas));
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let version = read_header(reader, TransactionType::Invocation, Self::MAX_VERSION)?;
        let script = reader.read_var_bytes(Self::MAX_SCRIPT_SIZE)?;
        let gas = if version >= 1 {
            reader.read_fixed8()?
        } else {
            Fixed8::ZERO
        };
        let parts = TransactionParts::read_tail(version, reader)?;
        Self::new(parts, script, gas)
    }

    fn size(&self) -> usize {
        self.base.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLookup;

    fn invocation(version: u8, gas: Fixed8) -> InvocationTransaction {
        InvocationTransaction::new(
            TransactionParts {
                version,
                ..TransactionParts::default()
            },
            vec![0x51, 0x66],
            gas,
        )
        .unwrap()
    }

    #[test]
    fn gas_only_written_from_version_one() {
        let v0 = invocation(0, Fixed8::ZERO);
        let v1 = invocation(1, Fixed8::ZERO);
        assert_eq!(v1.size(), v0.size() + 8);
        assert_eq!(v0.serialize_wire().len(), v0.size());
        assert_eq!(v1.serialize_wire().len(), v1.size());
    }

    #[test]
    fn oversized_script_rejected_before_body() {
        // Prefix declares 65537 bytes.
        let bytes = [0xD1, 0x01, 0xFE, 0x01, 0x00, 0x01, 0x00];
        assert!(matches!(
            InvocationTransaction::deserialize_wire(&bytes),
            Err(CodecError::LengthTooLarge { length: 65_537, .. })
        ));
    }

    #[tokio::test]
    async fn gas_rules() {
        let lookup = InMemoryLookup::new();
        let options = VerifyOptions::default();
        invocation(1, Fixed8::from_whole(2).unwrap())
            .verify(&lookup, &options)
            .await
            .unwrap();
        assert!(invocation(1, Fixed8::from_raw(-Fixed8::ONE))
            .verify(&lookup, &options)
            .await
            .is_err());
        assert_eq!(
            invocation(1, Fixed8::from_raw(150_000_000))
                .verify(&lookup, &options)
                .await
                .unwrap_err(),
            VerifyError::failed("gas must be a whole number of tokens")
        );
    }
}
