//! The closed transaction family.
//!
//! Every variant shares the layout
//! `type | version | exclusive | attributes | inputs | outputs | scripts`
//! and differs only in its exclusive fields, version bound, fee, and
//! verification rules. [`Transaction`] dispatches on the type byte.

mod base;
mod claim;
mod contract;
mod invocation;
mod issue;
mod miner;

pub use base::{TransactionBase, TransactionJson, TransactionParts, MAX_ENTRIES};
pub use claim::ClaimTransaction;
pub use contract::ContractTransaction;
pub use invocation::InvocationTransaction;
pub use issue::IssueTransaction;
pub use miner::MinerTransaction;

use std::collections::BTreeSet;

use nl_codec::{BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_types::{Fixed8, UInt160, UInt256};

use crate::attribute::Attribute;
use crate::error::{VerifyError, VerifyResult};
use crate::json::{JsonContext, SerializableJson};
use crate::settings::ProtocolSettings;
use crate::traits::LedgerLookup;
use crate::verify::VerifyOptions;
use crate::witness::Witness;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Miner,
    Issue,
    Claim,
    Contract,
    Invocation,
}

impl TransactionType {
    pub fn to_byte(self) -> u8 {
        match self {
            TransactionType::Miner => 0x00,
            TransactionType::Issue => 0x01,
            TransactionType::Claim => 0x02,
            TransactionType::Contract => 0x80,
            TransactionType::Invocation => 0xD1,
        }
    }

    pub fn from_byte(value: u8) -> CodecResult<Self> {
        match value {
            0x00 => Ok(TransactionType::Miner),
            0x01 => Ok(TransactionType::Issue),
            0x02 => Ok(TransactionType::Claim),
            0x80 => Ok(TransactionType::Contract),
            0xD1 => Ok(TransactionType::Invocation),
            value => Err(CodecError::UnknownDiscriminant {
                kind: "transaction type",
                value,
            }),
        }
    }

    /// Name used in the JSON `type` field.
    pub fn name(self) -> &'static str {
        match self {
            TransactionType::Miner => "MinerTransaction",
            TransactionType::Issue => "IssueTransaction",
            TransactionType::Claim => "ClaimTransaction",
            TransactionType::Contract => "ContractTransaction",
            TransactionType::Invocation => "InvocationTransaction",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    Miner(MinerTransaction),
    Issue(IssueTransaction),
    Claim(ClaimTransaction),
    Contract(ContractTransaction),
    Invocation(InvocationTransaction),
}

impl Transaction {
    pub fn base(&self) -> &TransactionBase {
        match self {
            Transaction::Miner(tx) => tx.base(),
            Transaction::Issue(tx) => tx.base(),
            Transaction::Claim(tx) => tx.base(),
            Transaction::Contract(tx) => tx.base(),
            Transaction::Invocation(tx) => tx.base(),
        }
    }

    pub fn tx_type(&self) -> TransactionType {
        self.base().tx_type()
    }

    pub fn hash(&self) -> UInt256 {
        self.base().hash()
    }

    /// Fee charged by the protocol for this transaction.
    pub fn system_fee(&self, settings: &ProtocolSettings) -> Fixed8 {
        match self {
            Transaction::Issue(tx) => tx.system_fee(settings),
            other => settings.system_fee(other.tx_type()),
        }
    }

    /// Script hashes whose witnesses must accompany this transaction, in
    /// witness order.
    pub async fn script_hashes_for_verifying(
        &self,
        lookup: &dyn LedgerLookup,
    ) -> VerifyResult<BTreeSet<UInt160>> {
        match self {
            Transaction::Miner(tx) => tx.script_hashes_for_verifying(lookup).await,
            Transaction::Issue(tx) => tx.script_hashes_for_verifying(lookup).await,
            Transaction::Claim(tx) => tx.script_hashes_for_verifying(lookup).await,
            Transaction::Contract(tx) => tx.script_hashes_for_verifying(lookup).await,
            Transaction::Invocation(tx) => tx.script_hashes_for_verifying(lookup).await,
        }
    }

    /// Run base and variant verification against `lookup` and the mempool in
    /// `options`.
    pub async fn verify(
        &self,
        lookup: &dyn LedgerLookup,
        options: &VerifyOptions<'_>,
    ) -> VerifyResult<()> {
        let result = match self {
            Transaction::Miner(tx) => tx.verify(lookup, options).await,
            Transaction::Issue(tx) => tx.verify(lookup, options).await,
            Transaction::Claim(tx) => tx.verify(lookup, options).await,
            Transaction::Contract(tx) => tx.verify(lookup, options).await,
            Transaction::Invocation(tx) => tx.verify(lookup, options).await,
        };
        if let Err(err) = &result {
            match err {
                VerifyError::VerificationFailed(reason) => {
                    tracing::warn!(hash = %self.hash(), tx_type = self.tx_type().name(), %reason, "transaction rejected");
                }
                VerifyError::Lookup(lookup_err) => {
                    tracing::debug!(hash = %self.hash(), error = %lookup_err, "verification lookup failed");
                }
            }
        }
        result
    }

    /// Same transaction with new witnesses. The hash is unchanged since
    /// scripts are not hashed.
    pub fn with_scripts(&self, scripts: Vec<Witness>) -> CodecResult<Self> {
        let mut parts = self.base().parts().clone();
        parts.scripts = scripts;
        self.with_parts(parts)
    }

    /// Same transaction with new attributes and a recomputed hash.
    pub fn with_attributes(&self, attributes: Vec<Attribute>) -> CodecResult<Self> {
        let mut parts = self.base().parts().clone();
        parts.attributes = attributes;
        self.with_parts(parts)
    }

    fn with_parts(&self, parts: TransactionParts) -> CodecResult<Self> {
        Ok(match self {
            Transaction::Miner(tx) => Transaction::Miner(MinerTransaction::new(parts, tx.nonce())?),
            Transaction::Issue(_) => Transaction::Issue(IssueTransaction::new(parts)?),
            Transaction::Claim(tx) => {
                Transaction::Claim(ClaimTransaction::new(parts, tx.claims().to_vec())?)
            }
            Transaction::Contract(_) => Transaction::Contract(ContractTransaction::new(parts)?),
            Transaction::Invocation(tx) => Transaction::Invocation(InvocationTransaction::new(
                parts,
                tx.script().to_vec(),
                tx.gas(),
            )?),
        })
    }
}

impl Serializable for Transaction {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        match self {
            Transaction::Miner(tx) => tx.write_wire(writer),
            Transaction::Issue(tx) => tx.write_wire(writer),
            Transaction::Claim(tx) => tx.write_wire(writer),
            Transaction::Contract(tx) => tx.write_wire(writer),
            Transaction::Invocation(tx) => tx.write_wire(writer),
        }
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let tx_type = TransactionType::from_byte(reader.peek_u8()?)?;
        Ok(match tx_type {
            TransactionType::Miner => Transaction::Miner(MinerTransaction::read_wire(reader)?),
            TransactionType::Issue => Transaction::Issue(IssueTransaction::read_wire(reader)?),
            TransactionType::Claim => Transaction::Claim(ClaimTransaction::read_wire(reader)?),
            TransactionType::Contract => {
                Transaction::Contract(ContractTransaction::read_wire(reader)?)
            }
            TransactionType::Invocation => {
                Transaction::Invocation(InvocationTransaction::read_wire(reader)?)
            }
        })
    }

    fn size(&self) -> usize {
        self.base().size()
    }
}

impl SerializableJson for Transaction {
    type Json = TransactionJson;

    fn serialize_json(&self, context: &JsonContext<'_>) -> TransactionJson {
        let sys_fee = nl_codec::json::write_fixed8(self.system_fee(context.settings));
        let mut json = self.base().json(context, sys_fee);
        match self {
            Transaction::Miner(tx) => json.nonce = Some(tx.nonce()),
            Transaction::Claim(tx) => {
                json.claims = Some(
                    tx.claims()
                        .iter()
                        .map(|claim| claim.serialize_json(context))
                        .collect(),
                )
            }
            Transaction::Invocation(tx) => {
                json.script = Some(nl_codec::json::write_buffer(tx.script()));
                if tx.base().version() >= 1 {
                    json.gas = Some(nl_codec::json::write_fixed8(tx.gas()));
                }
            }
            Transaction::Issue(_) | Transaction::Contract(_) => {}
        }
        json
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Transaction {
                fn from(tx: $ty) -> Self {
                    Transaction::$variant(tx)
                }
            }
        )*
    };
}

impl_from_variant! {
    Miner => MinerTransaction,
    Issue => IssueTransaction,
    Claim => ClaimTransaction,
    Contract => ContractTransaction,
    Invocation => InvocationTransaction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeData;
    use crate::input::Input;
    use crate::output::Output;
    use nl_types::PublicKey;
    use proptest::collection::vec as vec_of;
    use proptest::prelude::*;

    fn arb_attribute() -> impl Strategy<Value = Attribute> {
        prop_oneof![
            (prop_oneof![Just(0x00u8), Just(0x30), 0xa1u8..=0xaf], any::<[u8; 32]>()).prop_map(
                |(usage, hash)| {
                    Attribute::new(usage, AttributeData::Hash(UInt256::from_bytes(hash))).unwrap()
                }
            ),
            (0x02u8..=0x03, any::<[u8; 32]>()).prop_map(|(usage, x)| {
                let key = PublicKey::from_parts(usage, x).unwrap();
                Attribute::new(usage, AttributeData::PublicKey(key)).unwrap()
            }),
            any::<[u8; 20]>().prop_map(|hash| {
                Attribute::new(0x20, AttributeData::Script(UInt160::from_bytes(hash))).unwrap()
            }),
            vec_of(any::<u8>(), 0..=Attribute::MAX_DESCRIPTION_URL)
                .prop_map(|buf| Attribute::new(0x81, AttributeData::Buffer(buf)).unwrap()),
            (prop_oneof![Just(0x90u8), 0xf0u8..=0xff], vec_of(any::<u8>(), 0..300))
                .prop_map(|(usage, buf)| Attribute::new(usage, AttributeData::Buffer(buf)).unwrap()),
        ]
    }

    fn arb_input() -> impl Strategy<Value = Input> {
        (any::<[u8; 32]>(), any::<u16>()).prop_map(|(hash, index)| Input::new(UInt256::from_bytes(hash), index))
    }

    fn arb_parts(version: impl Strategy<Value = u8>) -> impl Strategy<Value = TransactionParts> {
        let output = (any::<[u8; 32]>(), any::<i64>(), any::<[u8; 20]>()).prop_map(
            |(asset, value, address)| {
                Output::new(
                    UInt256::from_bytes(asset),
                    Fixed8::from_raw(value),
                    UInt160::from_bytes(address),
                )
            },
        );
        let witness = (vec_of(any::<u8>(), 0..80), vec_of(any::<u8>(), 0..40))
            .prop_map(|(invocation, verification)| Witness::new(invocation, verification).unwrap());
        (
            version,
            vec_of(arb_attribute(), 0..=4),
            vec_of(arb_input(), 0..4),
            vec_of(output, 0..4),
            vec_of(witness, 0..3),
        )
            .prop_map(|(version, attributes, inputs, outputs, scripts)| TransactionParts {
                version,
                attributes,
                inputs,
                outputs,
                scripts,
            })
    }

    fn arb_transaction() -> impl Strategy<Value = Transaction> {
        prop_oneof![
            (arb_parts(Just(0)), any::<u32>()).prop_map(|(parts, nonce)| {
                Transaction::from(MinerTransaction::new(parts, nonce).unwrap())
            }),
            arb_parts(0u8..=1).prop_map(|parts| Transaction::from(IssueTransaction::new(parts).unwrap())),
            (arb_parts(Just(0)), vec_of(arb_input(), 0..4)).prop_map(|(parts, claims)| {
                Transaction::from(ClaimTransaction::new(parts, claims).unwrap())
            }),
            arb_parts(Just(0)).prop_map(|parts| Transaction::from(ContractTransaction::new(parts).unwrap())),
            (arb_parts(0u8..=1), vec_of(any::<u8>(), 0..100), any::<i64>()).prop_map(
                |(parts, script, gas)| {
                    let gas = if parts.version == 0 { Fixed8::ZERO } else { Fixed8::from_raw(gas) };
                    Transaction::from(InvocationTransaction::new(parts, script, gas).unwrap())
                }
            ),
        ]
    }

    proptest! {
        #[test]
        fn wire_roundtrip_any_variant(tx in arb_transaction()) {
            let bytes = tx.serialize_wire();
            prop_assert_eq!(bytes.len(), tx.size());
            let decoded = Transaction::deserialize_wire(&bytes).unwrap();
            prop_assert_eq!(decoded.hash(), tx.hash());
            prop_assert_eq!(decoded, tx);
        }
    }

    fn parts(version: u8) -> TransactionParts {
        TransactionParts {
            version,
            attributes: vec![Attribute::new(0x20, AttributeData::Script(UInt160::from_bytes([4; 20]))).unwrap()],
            inputs: vec![Input::new(UInt256::from_bytes([1; 32]), 1)],
            outputs: vec![Output::new(
                UInt256::from_bytes([2; 32]),
                Fixed8::from_whole(3).unwrap(),
                UInt160::from_bytes([3; 20]),
            )],
            scripts: vec![Witness::new(vec![0x40, 1, 2], vec![0x51]).unwrap()],
        }
    }

    fn all_variants() -> Vec<Transaction> {
        vec![
            MinerTransaction::new(parts(0), 0xDEAD_BEEF).unwrap().into(),
            IssueTransaction::new(parts(1)).unwrap().into(),
            ClaimTransaction::new(parts(0), vec![Input::new(UInt256::from_bytes([9; 32]), 0)])
                .unwrap()
                .into(),
            ContractTransaction::new(parts(0)).unwrap().into(),
            InvocationTransaction::new(parts(1), vec![0x00, 0x66], Fixed8::from_whole(1).unwrap())
                .unwrap()
                .into(),
            InvocationTransaction::new(parts(0), vec![0x61], Fixed8::ZERO)
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn dispatch_roundtrip_for_every_variant() {
        for tx in all_variants() {
            let bytes = tx.serialize_wire();
            assert_eq!(bytes.len(), tx.size(), "{:?}", tx.tx_type());
            let decoded = Transaction::deserialize_wire(&bytes).unwrap();
            assert_eq!(decoded, tx);
            assert_eq!(decoded.hash(), tx.hash());
        }
    }

    #[test]
    fn hash_excludes_scripts() {
        let tx: Transaction = ContractTransaction::new(parts(0)).unwrap().into();
        let resigned = tx.with_scripts(vec![]).unwrap();
        assert_eq!(resigned.hash(), tx.hash());
        assert!(resigned.size() < tx.size());

        let reattributed = tx.with_attributes(vec![]).unwrap();
        assert_ne!(reattributed.hash(), tx.hash());
    }

    #[test]
    fn unknown_type_is_malformed() {
        let mut bytes = ContractTransaction::new(parts(0)).unwrap().serialize_wire();
        bytes[0] = 0x42;
        assert_eq!(
            Transaction::deserialize_wire(&bytes).unwrap_err(),
            CodecError::UnknownDiscriminant {
                kind: "transaction type",
                value: 0x42
            }
        );
    }

    #[test]
    fn variant_decoder_rejects_other_type() {
        let bytes = ContractTransaction::new(parts(0)).unwrap().serialize_wire();
        assert!(matches!(
            MinerTransaction::deserialize_wire(&bytes),
            Err(CodecError::DiscriminantMismatch {
                expected: 0x00,
                actual: 0x80,
                ..
            })
        ));
    }

    #[test]
    fn version_bounds() {
        assert!(ContractTransaction::new(parts(1)).is_err());
        assert!(MinerTransaction::new(parts(1), 0).is_err());
        assert!(ClaimTransaction::new(parts(1), vec![]).is_err());
        assert!(InvocationTransaction::new(parts(2), vec![], Fixed8::ZERO).is_err());
    }

    #[test]
    fn too_many_attributes_rejected() {
        let mut p = parts(0);
        let attr = p.attributes[0].clone();
        p.attributes = vec![attr; Attribute::MAX_PER_TRANSACTION + 1];
        assert!(matches!(
            ContractTransaction::new(p),
            Err(CodecError::LengthTooLarge { .. })
        ));
    }

    #[test]
    fn padded_attribute_count_rejected() {
        let mut bytes = ContractTransaction::new(TransactionParts::default())
            .unwrap()
            .serialize_wire();
        assert_eq!(bytes, [0x80, 0x00, 0x00, 0x00, 0x00, 0x00]);
        bytes.splice(2..3, [0xFD, 0x00, 0x00]);
        assert!(matches!(
            Transaction::deserialize_wire(&bytes),
            Err(CodecError::InvalidValue(_))
        ));
    }

    #[test]
    fn json_shape() {
        let settings = ProtocolSettings::default();
        let context = JsonContext::new(&settings);
        let tx: Transaction = MinerTransaction::new(parts(0), 7).unwrap().into();
        let value = serde_json::to_value(tx.serialize_json(&context)).unwrap();
        assert_eq!(value["type"], "MinerTransaction");
        assert_eq!(value["nonce"], 7);
        assert_eq!(value["txid"], tx.hash().to_hex_string());
        assert_eq!(value["vout"][0]["value"], "3");
        assert_eq!(value["sys_fee"], "0");
        assert!(value.get("gas").is_none());
        assert_eq!(value["size"], tx.size());
    }
}
