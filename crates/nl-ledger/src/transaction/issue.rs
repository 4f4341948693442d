use std::collections::BTreeSet;
use std::fmt;

use futures::future::try_join_all;
use nl_codec::{BinaryReader, BinaryWriter, CodecResult, Serializable};
use nl_types::{Fixed8, UInt160, UInt256};
use tokio::sync::OnceCell;

use super::base::{check_version, read_header, TransactionBase, TransactionParts};
use super::TransactionType;
use crate::asset::Asset;
use crate::error::{VerifyError, VerifyResult};
use crate::output::Output;
use crate::settings::ProtocolSettings;
use crate::traits::LedgerLookup;
use crate::verify::{self, VerifyOptions};

/// Mints new units of registered assets.
///
/// The verifying script-hash set is resolved once per instance and reused.
/// The first lookup passed to [`script_hashes_for_verifying`] determines it.
///
/// [`script_hashes_for_verifying`]: IssueTransaction::script_hashes_for_verifying
pub struct IssueTransaction {
    base: TransactionBase,
    script_hashes: OnceCell<BTreeSet<UInt160>>,
}

impl IssueTransaction {
    pub const MAX_VERSION: u8 = 1;

    pub fn new(parts: TransactionParts) -> CodecResult<Self> {
        check_version(TransactionType::Issue, parts.version, Self::MAX_VERSION)?;
        let base = TransactionBase::seal(TransactionType::Issue, parts, |_| {})?;
        Ok(Self {
            base,
            script_hashes: OnceCell::new(),
        })
    }

    pub fn base(&self) -> &TransactionBase {
        &self.base
    }

    /// Free from version 1 on, and when only the governing and utility
    /// tokens are issued.
    pub fn system_fee(&self, settings: &ProtocolSettings) -> Fixed8 {
        if self.base.version() >= 1 {
            return Fixed8::ZERO;
        }
        let native_only = self.base.outputs().iter().all(|output| {
            output.asset == settings.governing_token || output.asset == settings.utility_token
        });
        if native_only {
            return Fixed8::ZERO;
        }
        settings.system_fee(TransactionType::Issue)
    }

    /// Base hashes plus the issuer of every asset this transaction mints.
    pub async fn script_hashes_for_verifying(
        &self,
        lookup: &dyn LedgerLookup,
    ) -> VerifyResult<BTreeSet<UInt160>> {
        let hashes = self
            .script_hashes
            .get_or_try_init(|| async {
                let minting = Minting::resolve(&self.base, lookup).await?;
                Ok::<_, VerifyError>(minting.script_hashes(&self.base))
            })
            .await?;
        Ok(hashes.clone())
    }

    /// Runs the base stage, then the supply check. Referenced outputs and
    /// minted assets are fetched once and shared by both.
    pub async fn verify(
        &self,
        lookup: &dyn LedgerLookup,
        options: &VerifyOptions<'_>,
    ) -> VerifyResult<()> {
        let minting = OnceCell::<Minting>::new();
        let script_hashes = async {
            let minting = minting
                .get_or_try_init(|| Minting::resolve(&self.base, lookup))
                .await?;
            let hashes = self
                .script_hashes
                .get_or_init(|| async { minting.script_hashes(&self.base) })
                .await;
            Ok::<_, VerifyError>(hashes.clone())
        };
        verify::verify_base(&self.base, script_hashes, options).await?;
        let minting = minting
            .get_or_try_init(|| Minting::resolve(&self.base, lookup))
            .await?;
        self.verify_issuance(minting, options)
    }

    /// Every minted asset must have supply left once pending mempool
    /// issuance is counted. Unlimited assets are skipped.
    fn verify_issuance(&self, minting: &Minting, options: &VerifyOptions<'_>) -> VerifyResult<()> {
        for mint in &minting.minted {
            if mint.asset.has_unlimited_supply() {
                continue;
            }
            let hash = mint.hash;
            let pending: i128 = options
                .others(self.base.hash())
                .flat_map(|tx| tx.base().outputs())
                .filter(|output| output.asset == hash)
                .map(|output| output.value.wide())
                .sum();
            let issued = mint.asset.available().wide() + pending;
            let remaining = mint.asset.amount().wide() - issued;
            if remaining < mint.amount {
                return Err(VerifyError::failed(format!(
                    "issue of {} exceeds remaining supply {} for asset {hash}",
                    Fixed8::from_raw(saturate(mint.amount)),
                    Fixed8::from_raw(saturate(remaining)),
                )));
            }
        }
        Ok(())
    }
}

/// Ledger state one verification pass needs: the spent outputs and every
/// asset with a negative net result.
struct Minting {
    references: Vec<Output>,
    minted: Vec<Mint>,
}

struct Mint {
    hash: UInt256,
    /// Units created, always positive.
    amount: i128,
    asset: Asset,
}

impl Minting {
    async fn resolve(base: &TransactionBase, lookup: &dyn LedgerLookup) -> VerifyResult<Self> {
        let references = verify::get_references(base, lookup).await?;
        let minted: Vec<(UInt256, i128)> = verify::results_from(base, &references)
            .into_iter()
            .filter(|(_, net)| *net < 0)
            .map(|(hash, net)| (hash, -net))
            .collect();
        let assets = try_join_all(minted.iter().map(|(hash, _)| lookup.get_asset(hash))).await?;
        let minted = minted
            .into_iter()
            .zip(assets)
            .map(|((hash, amount), asset)| Mint { hash, amount, asset })
            .collect();
        Ok(Self { references, minted })
    }

    fn script_hashes(&self, base: &TransactionBase) -> BTreeSet<UInt160> {
        let mut hashes = verify::script_hashes_from(base, &self.references);
        hashes.extend(self.minted.iter().map(|mint| mint.asset.issuer()));
        hashes
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

impl Clone for IssueTransaction {
    /// The clone starts with an empty script-hash cache.
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            script_hashes: OnceCell::new(),
        }
    }
}

impl PartialEq for IssueTransaction {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl Eq for IssueTransaction {}

impl fmt::Debug for IssueTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueTransaction")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Serializable for IssueTransaction {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        self.base.write_wire(writer, |_| {});
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let version = read_header(reader, TransactionType::Issue, Self::MAX_VERSION)?;
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
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::asset::tests::sample_parts;
    use crate::error::LookupError;
    use crate::input::Input;
    use crate::memory::InMemoryLookup;
    use crate::transaction::{ContractTransaction, Transaction};
    use crate::witness::Witness;
    use nl_codec::CodecError;
    use nl_crypto::Hasher;

    const ISSUER_SCRIPT: &[u8] = &[0x21, 0xac];

    fn token() -> UInt256 {
        UInt256::from_bytes([0x77; 32])
    }

    fn lookup_with(amount: i64, available: i64) -> InMemoryLookup {
        let lookup = InMemoryLookup::new();
        let mut asset = sample_parts(token(), amount, available);
        asset.issuer = Hasher::hash160(ISSUER_SCRIPT);
        lookup.insert_asset(Asset::new(asset).unwrap());
        lookup
    }

    fn output(tokens: i64) -> Output {
        Output::new(token(), Fixed8::from_whole(tokens).unwrap(), UInt160::from_bytes([1; 20]))
    }

    fn issue(tokens: i64, nonce_attr: u8) -> IssueTransaction {
        use crate::attribute::{Attribute, AttributeData};
        IssueTransaction::new(TransactionParts {
            version: 0,
            attributes: vec![Attribute::new(0xf0, AttributeData::Buffer(vec![nonce_attr])).unwrap()],
            inputs: vec![],
            outputs: vec![output(tokens)],
            scripts: vec![Witness::new(vec![0x40], ISSUER_SCRIPT.to_vec()).unwrap()],
        })
        .unwrap()
    }

    fn pending(tokens: i64) -> Transaction {
        ContractTransaction::new(TransactionParts {
            outputs: vec![output(tokens)],
            ..TransactionParts::default()
        })
        .unwrap()
        .into()
    }

    #[tokio::test]
    async fn issuance_limit_counts_mempool() {
        let lookup = lookup_with(100, 90);
        let pool = [pending(5)];
        let options = VerifyOptions::with_mempool(&pool);

        let over = issue(6, 1);
        assert!(matches!(
            over.verify(&lookup, &options).await,
            Err(VerifyError::VerificationFailed(_))
        ));

        let exact = issue(5, 2);
        exact.verify(&lookup, &options).await.unwrap();
    }

    #[tokio::test]
    async fn own_entry_in_mempool_not_double_counted() {
        let lookup = lookup_with(100, 90);
        let tx = issue(10, 1);
        let pool = [Transaction::from(tx.clone())];
        tx.verify(&lookup, &VerifyOptions::with_mempool(&pool))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unlimited_asset_always_passes() {
        let lookup = lookup_with(-1, 1_000_000);
        let pool = [pending(1_000)];
        issue(1_000_000, 1)
            .verify(&lookup, &VerifyOptions::with_mempool(&pool))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn issuer_must_witness() {
        let lookup = lookup_with(100, 0);
        let hashes = issue(1, 1).script_hashes_for_verifying(&lookup).await.unwrap();
        assert_eq!(hashes, BTreeSet::from([Hasher::hash160(ISSUER_SCRIPT)]));

        let unsigned = IssueTransaction::new(TransactionParts {
            outputs: vec![output(1)],
            ..TransactionParts::default()
        })
        .unwrap();
        assert!(unsigned
            .verify(&lookup, &VerifyOptions::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn script_hashes_are_cached() {
        let lookup = lookup_with(100, 0);
        let tx = issue(1, 1);
        let first = tx.script_hashes_for_verifying(&lookup).await.unwrap();
        // A lookup without the asset would fail if consulted again.
        let second = tx
            .script_hashes_for_verifying(&InMemoryLookup::new())
            .await
            .unwrap();
        assert_eq!(first, second);
        assert!(tx.clone().script_hashes_for_verifying(&InMemoryLookup::new()).await.is_err());
    }

    #[tokio::test]
    async fn concurrent_first_callers_agree() {
        let lookup = lookup_with(100, 0);
        let tx = issue(1, 1);
        let (a, b) = tokio::join!(
            tx.script_hashes_for_verifying(&lookup),
            tx.script_hashes_for_verifying(&lookup)
        );
        assert_eq!(a.unwrap(), b.unwrap());
    }

    /// Counts every read that reaches the wrapped lookup.
    #[derive(Default)]
    struct CountingLookup {
        inner: InMemoryLookup,
        outputs: AtomicUsize,
        assets: AtomicUsize,
    }

    #[async_trait]
    impl LedgerLookup for CountingLookup {
        async fn get_output(&self, input: &Input) -> Result<Output, LookupError> {
            self.outputs.fetch_add(1, Ordering::SeqCst);
            self.inner.get_output(input).await
        }

        async fn get_asset(&self, hash: &UInt256) -> Result<Asset, LookupError> {
            self.assets.fetch_add(1, Ordering::SeqCst);
            self.inner.get_asset(hash).await
        }
    }

    #[tokio::test]
    async fn verify_reads_each_record_once() {
        let issuer = Hasher::hash160(ISSUER_SCRIPT);
        let lookup = CountingLookup {
            inner: lookup_with(100, 0),
            ..CountingLookup::default()
        };
        let spent = Input::new(UInt256::from_bytes([0x31; 32]), 0);
        lookup.inner.insert_output(
            spent,
            Output::new(UInt256::from_bytes([0x11; 32]), Fixed8::from_raw(1), issuer),
        );
        let tx = IssueTransaction::new(TransactionParts {
            inputs: vec![spent],
            outputs: vec![output(3)],
            scripts: vec![Witness::new(vec![0x40], ISSUER_SCRIPT.to_vec()).unwrap()],
            ..TransactionParts::default()
        })
        .unwrap();

        tx.verify(&lookup, &VerifyOptions::default()).await.unwrap();
        assert_eq!(lookup.outputs.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.assets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cheap_checks_run_before_any_read() {
        let lookup = CountingLookup {
            inner: lookup_with(100, 0),
            ..CountingLookup::default()
        };
        let spent = Input::new(UInt256::from_bytes([0x31; 32]), 0);
        let tx = IssueTransaction::new(TransactionParts {
            inputs: vec![spent, spent],
            outputs: vec![output(3)],
            ..TransactionParts::default()
        })
        .unwrap();
        assert_eq!(
            tx.verify(&lookup, &VerifyOptions::default()).await.unwrap_err(),
            VerifyError::failed("duplicate inputs")
        );
        assert_eq!(lookup.outputs.load(Ordering::SeqCst), 0);
        assert_eq!(lookup.assets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn version_two_is_malformed() {
        let mut bytes = issue(1, 1).serialize_wire();
        bytes[1] = 2;
        assert_eq!(
            IssueTransaction::deserialize_wire(&bytes).unwrap_err(),
            CodecError::InvalidVersion {
                kind: "IssueTransaction",
                version: 2
            }
        );
        bytes[1] = 1;
        assert_eq!(IssueTransaction::deserialize_wire(&bytes).unwrap().base().version(), 1);
    }

    #[test]
    fn system_fee_rules() {
        let settings = ProtocolSettings::default();
        assert_eq!(issue(1, 1).system_fee(&settings), Fixed8::from_whole(500).unwrap());

        let native = IssueTransaction::new(TransactionParts {
            outputs: vec![Output::new(settings.utility_token, Fixed8::from_raw(1), UInt160::zero())],
            ..TransactionParts::default()
        })
        .unwrap();
        assert_eq!(native.system_fee(&settings), Fixed8::ZERO);

        let v1 = IssueTransaction::new(TransactionParts {
            version: 1,
            outputs: vec![output(1)],
            ..TransactionParts::default()
        })
        .unwrap();
        assert_eq!(v1.system_fee(&settings), Fixed8::ZERO);
    }
}
