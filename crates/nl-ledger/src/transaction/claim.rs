use std::collections::{BTreeSet, HashSet};

use futures::future::try_join_all;
use nl_codec::{size, BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_types::UInt160;

use super::base::{check_version, read_header, TransactionBase, TransactionParts, MAX_ENTRIES};
use super::{Transaction, TransactionType};
use crate::error::{VerifyError, VerifyResult};
use crate::input::Input;
use crate::traits::LedgerLookup;
use crate::verify::{self, VerifyOptions};

/// Claims the utility token generated by previously spent outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimTransaction {
    base: TransactionBase,
    claims: Vec<Input>,
}

fn write_claims(writer: &mut BinaryWriter, claims: &[Input]) {
    writer.write_vec(claims, |w, claim| claim.write_wire(w));
}

impl ClaimTransaction {
    pub const MAX_VERSION: u8 = 0;

    pub fn new(parts: TransactionParts, claims: Vec<Input>) -> CodecResult<Self> {
        check_version(TransactionType::Claim, parts.version, Self::MAX_VERSION)?;
        let base = TransactionBase::seal(TransactionType::Claim, parts, |w| write_claims(w, &claims))?;
        Ok(Self { base, claims })
    }

    pub fn base(&self) -> &TransactionBase {
        &self.base
    }

    pub fn claims(&self) -> &[Input] {
        &self.claims
    }

    /// Base hashes plus the owners of every claimed output.
    pub async fn script_hashes_for_verifying(
        &self,
        lookup: &dyn LedgerLookup,
    ) -> VerifyResult<BTreeSet<UInt160>> {
        let (mut hashes, claimed) = futures::try_join!(
            verify::base_script_hashes(&self.base, lookup),
            async {
                try_join_all(self.claims.iter().map(|claim| lookup.get_output(claim)))
                    .await
                    .map_err(VerifyError::from)
            },
        )?;
        hashes.extend(claimed.iter().map(|output| output.address));
        Ok(hashes)
    }

    pub async fn verify(
        &self,
        lookup: &dyn LedgerLookup,
        options: &VerifyOptions<'_>,
    ) -> VerifyResult<()> {
        self.verify_claims(options)?;
        verify::verify_base(&self.base, self.script_hashes_for_verifying(lookup), options).await
    }

    fn verify_claims(&self, options: &VerifyOptions<'_>) -> VerifyResult<()> {
        if self.claims.is_empty() {
            return Err(VerifyError::failed("claim transaction has no claims"));
        }
        let distinct: HashSet<&Input> = self.claims.iter().collect();
        if distinct.len() != self.claims.len() {
            return Err(VerifyError::failed("duplicate claims"));
        }
        for other in options.others(self.base.hash()) {
            if let Transaction::Claim(other) = other {
                if other.claims.iter().any(|claim| distinct.contains(claim)) {
                    return Err(VerifyError::failed(format!(
                        "claim already pending in {}",
                        other.base.hash()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Serializable for ClaimTransaction {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        self.base.write_wire(writer, |w| write_claims(w, &self.claims));
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let version = read_header(reader, TransactionType::Claim, Self::MAX_VERSION)?;
        let claims = reader.read_vec(MAX_ENTRIES, Input::read_wire)?;
        let parts = TransactionParts::read_tail(version, reader)?;
        Self::new(parts, claims)
    }

    fn size(&self) -> usize {
        self.base.size()
    }
}
