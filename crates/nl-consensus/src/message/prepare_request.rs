use std::collections::HashSet;

use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_ledger::{JsonContext, MinerTransaction, SerializableJson};
use nl_types::{UInt160, UInt256};

use super::{read_header, ConsensusMessageJson, ConsensusMessageType, SIGNATURE_SIZE};

/// Upper bound on transaction hashes in one proposal.
pub const MAX_TRANSACTION_HASHES: usize = 0x1_0000;

/// The speaker's block proposal.
///
/// `transaction_hashes` are pairwise distinct and the first one is the hash
/// of the embedded miner transaction. Both hold for every constructed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrepareRequest {
    view_number: u8,
    nonce: u64,
    next_consensus: UInt160,
    transaction_hashes: Vec<UInt256>,
    miner_transaction: MinerTransaction,
    signature: [u8; SIGNATURE_SIZE],
    size: usize,
}

fn check_distinct(hashes: &[UInt256]) -> CodecResult<()> {
    let distinct = hashes.iter().collect::<HashSet<_>>().len();
    if distinct != hashes.len() {
        tracing::debug!(distinct, total = hashes.len(), "prepare request repeats a transaction hash");
        return Err(CodecError::DuplicateEntries {
            distinct,
            total: hashes.len(),
        });
    }
    Ok(())
}

fn check_linkage(hashes: &[UInt256], miner_transaction: &MinerTransaction) -> CodecResult<()> {
    let expected = miner_transaction.base().hash();
    match hashes.first() {
        Some(first) if *first == expected => Ok(()),
        first => {
            let actual = first.copied().unwrap_or_default();
            tracing::debug!(%expected, %actual, "prepare request miner transaction not linked");
            Err(CodecError::HashMismatch { expected, actual })
        }
    }
}

impl PrepareRequest {
    pub fn new(
        view_number: u8,
        nonce: u64,
        next_consensus: UInt160,
        transaction_hashes: Vec<UInt256>,
        miner_transaction: MinerTransaction,
        signature: [u8; SIGNATURE_SIZE],
    ) -> CodecResult<Self> {
        if transaction_hashes.len() > MAX_TRANSACTION_HASHES {
            return Err(CodecError::LengthTooLarge {
                length: transaction_hashes.len() as u64,
                max: MAX_TRANSACTION_HASHES as u64,
            });
        }
        check_distinct(&transaction_hashes)?;
        check_linkage(&transaction_hashes, &miner_transaction)?;
        let size = size::UINT8 * 2
            + size::UINT64
            + size::UINT160
            + size::vec(&transaction_hashes, |_| size::UINT256)
            + miner_transaction.size()
            + size::SIGNATURE;
        Ok(Self {
            view_number,
            nonce,
            next_consensus,
            transaction_hashes,
            miner_transaction,
            signature,
            size,
        })
    }

    pub fn view_number(&self) -> u8 {
        self.view_number
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn next_consensus(&self) -> UInt160 {
        self.next_consensus
    }

    pub fn transaction_hashes(&self) -> &[UInt256] {
        &self.transaction_hashes
    }

    pub fn miner_transaction(&self) -> &MinerTransaction {
        &self.miner_transaction
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.signature
    }
}

impl Serializable for PrepareRequest {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        writer.write_u8(ConsensusMessageType::PrepareRequest.to_byte());
        writer.write_u8(self.view_number);
        writer.write_u64_le(self.nonce);
        writer.write_uint160(&self.next_consensus);
        writer.write_vec(&self.transaction_hashes, |w, hash| w.write_uint256(hash));
        self.miner_transaction.write_wire(writer);
        writer.write_bytes(&self.signature);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let view_number = read_header(reader, ConsensusMessageType::PrepareRequest)?;
        let nonce = reader.read_u64_le()?;
        let next_consensus = reader.read_uint160()?;
        let transaction_hashes = reader.read_vec(MAX_TRANSACTION_HASHES, |r| r.read_uint256())?;
        check_distinct(&transaction_hashes)?;
        let miner_transaction = MinerTransaction::read_wire(reader)?;
        check_linkage(&transaction_hashes, &miner_transaction)?;
        let signature = reader.read_array()?;
        Self::new(
            view_number,
            nonce,
            next_consensus,
            transaction_hashes,
            miner_transaction,
            signature,
        )
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl SerializableJson for PrepareRequest {
    type Json = ConsensusMessageJson;

    fn serialize_json(&self, context: &JsonContext<'_>) -> ConsensusMessageJson {
        let mut out =
            ConsensusMessageJson::header(ConsensusMessageType::PrepareRequest, self.view_number);
        out.nonce = Some(self.nonce.to_string());
        out.next_consensus = Some(json::write_uint160(&self.next_consensus));
        out.transaction_hashes = Some(
            self.transaction_hashes
                .iter()
                .map(json::write_uint256)
                .collect(),
        );
        out.miner_transaction = Some(
            nl_ledger::Transaction::Miner(self.miner_transaction.clone()).serialize_json(context),
        );
        out.signature = Some(json::write_buffer(&self.signature));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_ledger::TransactionParts;
    use proptest::prelude::*;

    fn miner(nonce: u32) -> MinerTransaction {
        MinerTransaction::new(TransactionParts::default(), nonce).unwrap()
    }

    fn hashes(miner: &MinerTransaction, extra: u8) -> Vec<UInt256> {
        let mut hashes = vec![miner.base().hash()];
        hashes.extend((1..=extra).map(|n| UInt256::from_bytes([n; 32])));
        hashes
    }

    /// Encode without going through the validating constructor.
    fn raw(hashes: &[UInt256], miner: &MinerTransaction) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_u8(0x20);
        writer.write_u8(0);
        writer.write_u64_le(42);
        writer.write_uint160(&UInt160::zero());
        writer.write_vec(hashes, |w, hash| w.write_uint256(hash));
        miner.write_wire(&mut writer);
        writer.write_bytes(&[0u8; SIGNATURE_SIZE]);
        writer.finish()
    }

    #[test]
    fn roundtrip_and_size() {
        let miner = miner(9);
        let msg = PrepareRequest::new(
            2,
            u64::MAX,
            UInt160::from_bytes([1; 20]),
            hashes(&miner, 3),
            miner,
            [7; SIGNATURE_SIZE],
        )
        .unwrap();
        let bytes = msg.serialize_wire();
        assert_eq!(bytes.len(), msg.size());
        assert_eq!(PrepareRequest::deserialize_wire(&bytes).unwrap(), msg);
    }

    #[test]
    fn linkage_mismatch_rejected() {
        let miner = miner(1);
        let mut list = hashes(&miner, 2);
        list.swap(0, 1);
        assert!(matches!(
            PrepareRequest::deserialize_wire(&raw(&list, &miner)),
            Err(CodecError::HashMismatch { .. })
        ));
    }

    #[test]
    fn empty_hash_list_rejected() {
        let miner = miner(1);
        assert_eq!(
            PrepareRequest::deserialize_wire(&raw(&[], &miner)).unwrap_err(),
            CodecError::HashMismatch {
                expected: miner.base().hash(),
                actual: UInt256::zero()
            }
        );
    }

    #[test]
    fn constructor_enforces_invariants() {
        let m = miner(1);
        let mut dup = hashes(&m, 1);
        dup.push(dup[1]);
        assert!(PrepareRequest::new(0, 0, UInt160::zero(), dup, m.clone(), [0; 64]).is_err());
        assert!(PrepareRequest::new(0, 0, UInt160::zero(), vec![], m, [0; 64]).is_err());
    }

    #[test]
    fn json_shape() {
        let settings = nl_ledger::ProtocolSettings::default();
        let m = miner(5);
        let msg = PrepareRequest::new(1, 10, UInt160::zero(), hashes(&m, 0), m.clone(), [0; 64]).unwrap();
        let value = serde_json::to_value(msg.serialize_json(&JsonContext::new(&settings))).unwrap();
        assert_eq!(value["type"], "PrepareRequest");
        assert_eq!(value["nonce"], "10");
        assert_eq!(value["transaction_hashes"][0], m.base().hash().to_hex_string());
        assert_eq!(value["miner_transaction"]["nonce"], 5);
    }

    proptest! {
        #[test]
        fn duplicate_at_any_position_rejected(extra in 1u8..8, from in 0usize..8, to in 0usize..9) {
            let m = miner(3);
            let mut list = hashes(&m, extra);
            let from = from % list.len();
            let to = to % (list.len() + 1);
            let dup = list[from];
            list.insert(to, dup);
            let total = list.len();
            prop_assert_eq!(
                PrepareRequest::deserialize_wire(&raw(&list, &m)).unwrap_err(),
                CodecError::DuplicateEntries { distinct: total - 1, total }
            );
        }
    }
}
