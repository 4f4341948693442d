use std::collections::BTreeSet;

use nl_codec::{BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_types::UInt160;

use super::base::{check_version, read_header, TransactionBase, TransactionParts};
use super::TransactionType;
use crate::error::VerifyResult;
use crate::traits::LedgerLookup;
use crate::verify::{self, VerifyOptions};

/// Block reward transaction; the first transaction of every block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerTransaction {
    base: TransactionBase,
    nonce: u32,
}

impl MinerTransaction {
    pub const MAX_VERSION: u8 = 0;

    pub fn new(parts: TransactionParts, nonce: u32) -> CodecResult<Self> {
        check_version(TransactionType::Miner, parts.version, Self::MAX_VERSION)?;
        let base = TransactionBase::seal(TransactionType::Miner, parts, |w| w.write_u32_le(nonce))?;
        Ok(Self { base, nonce })
    }

    pub fn base(&self) -> &TransactionBase {
        &self.base
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
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

impl Serializable for MinerTransaction {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        self.base.write_wire(writer, |w| w.write_u32_le(self.nonce));
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let version = read_header(reader, TransactionType::Miner, Self::MAX_VERSION)?;
        let nonce = reader.read_u32_le()?;
        let parts = TransactionParts::read_tail(version, reader)?;
        Self::new(parts, nonce)
    }

    fn size(&self) -> usize {
        self.base.size()
    }
}
