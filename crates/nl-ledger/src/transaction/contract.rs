use std::collections::BTreeSet;

use nl_codec::{BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_types::UInt160;

use super::base::{check_version, read_header, TransactionBase, TransactionParts};
use super::TransactionType;
use crate::error::VerifyResult;
use crate::traits::LedgerLookup;
use crate::verify::{self, VerifyOptions};

/// Plain asset transfer. No exclusive fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractTransaction {
    base: TransactionBase,
}

impl ContractTransaction {
    pub const MAX_VERSION: u8 = 0;

    pub fn new(parts: TransactionParts) -> CodecResult<Self> {
        check_version(TransactionType::Contract, parts.version, Self::MAX_VERSION)?;
        let base = TransactionBase::seal(TransactionType::Contract, parts, |_| {})?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &TransactionBase {
        &self.base
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
        verify::verify_base(&self.base, self.script_hashes_for_verifying(lookup), options).await
    }
}

impl Serializable for ContractTransaction {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        self.base.write_wire(writer, |_| {});
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let version = read_header(reader, TransactionType::Contract, Self::MAX_VERSION)?;
        let parts = TransactionParts::read_tail(version, reader)?;
        Self::new(parts)
    }

    fn size(&self) -> usize {
        self.base.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_codec::CodecError;

    #[test]
    fn version_one_is_malformed_on_the_wire() {
        let mut bytes = ContractTransaction::new(TransactionParts::default())
            .unwrap()
            .serialize_wire();
        bytes[1] = 1;
        assert_eq!(
            ContractTransaction::deserialize_wire(&bytes).unwrap_err(),
            CodecError::InvalidVersion {
                kind: "ContractTransaction",
                version: 1
            }
        );
    }
}
