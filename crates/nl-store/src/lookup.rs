use async_trait::async_trait;
use nl_codec::Serializable;
use nl_ledger::{Asset, Input, LedgerLookup, LookupError, Output};
use nl_types::UInt256;

use crate::error::{StoreError, StoreResult};
use crate::keys::StorageKey;
use crate::traits::KeyValueStore;

/// [`LedgerLookup`] over a [`KeyValueStore`]. Outputs live under
/// `output` keys and assets under `asset` keys, in their wire form.
pub struct StoreLookup<S> {
    store: S,
}

impl<S: KeyValueStore> StoreLookup<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn put_output(&self, input: &Input, output: &Output) -> StoreResult<()> {
        let key = StorageKey::Output {
            hash: input.hash,
            index: input.index,
        };
        self.store.put(key.serialize(), output.serialize_wire())
    }

    pub fn put_asset(&self, asset: &Asset) -> StoreResult<()> {
        let key = StorageKey::Asset(asset.hash());
        self.store.put(key.serialize(), asset.serialize_wire())
    }

    fn load<T: Serializable>(&self, key: &StorageKey) -> StoreResult<Option<T>> {
        let Some(bytes) = self.store.get(&key.serialize())? else {
            return Ok(None);
        };
        T::deserialize_wire(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }
}

#[async_trait]
impl<S: KeyValueStore> LedgerLookup for StoreLookup<S> {
    async fn get_output(&self, input: &Input) -> Result<Output, LookupError> {
        let key = StorageKey::Output {
            hash: input.hash,
            index: input.index,
        };
        self.load(&key)?.ok_or(LookupError::OutputNotFound {
            hash: input.hash,
            index: input.index,
        })
    }

    async fn get_asset(&self, hash: &UInt256) -> Result<Asset, LookupError> {
        self.load(&StorageKey::Asset(*hash))?
            .ok_or(LookupError::AssetNotFound(*hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryKeyValueStore;
    use nl_ledger::{
        AssetParts, AssetType, ContractTransaction, Transaction, TransactionParts, VerifyOptions, Witness,
    };
    use nl_types::{Fixed8, PublicKey, UInt160};

    fn lookup() -> StoreLookup<InMemoryKeyValueStore> {
        StoreLookup::new(InMemoryKeyValueStore::new())
    }

    fn asset(hash: UInt256) -> Asset {
        Asset::new(parts(hash)).unwrap()
    }

    fn parts(hash: UInt256) -> AssetParts {
        AssetParts {
            hash,
            asset_type: AssetType::Currency,
            name: "Coin".into(),
            amount: Fixed8::from_whole(1_000).unwrap(),
            available: Fixed8::ZERO,
            precision: 8,
            owner: PublicKey::from_parts(0x02, [1; 32]).unwrap(),
            admin: UInt160::zero(),
            issuer: UInt160::zero(),
            expiration: 0,
            is_frozen: false,
        }
    }

    #[tokio::test]
    async fn stored_records_are_decoded() {
        let lookup = lookup();
        let input = Input::new(UInt256::from_bytes([3; 32]), 1);
        let output = Output::new(UInt256::zero(), Fixed8::from_raw(10), UInt160::zero());
        lookup.put_output(&input, &output).unwrap();
        lookup.put_asset(&asset(UInt256::zero())).unwrap();

        assert_eq!(lookup.get_output(&input).await.unwrap(), output);
        assert_eq!(lookup.get_asset(&UInt256::zero()).await.unwrap().name(), "Coin");
    }

    #[tokio::test]
    async fn longest_asset_name_reads_back() {
        let lookup = lookup();
        let hash = UInt256::from_bytes([8; 32]);
        let mut long = parts(hash);
        long.name = "x".repeat(Asset::MAX_NAME);
        let long = Asset::new(long).unwrap();
        lookup.put_asset(&long).unwrap();
        assert_eq!(lookup.get_asset(&hash).await.unwrap(), long);

        let mut too_long = parts(hash);
        too_long.name.push_str(&"x".repeat(Asset::MAX_NAME));
        assert!(Asset::new(too_long).is_err());
    }

    #[tokio::test]
    async fn missing_keys_are_not_found() {
        let lookup = lookup();
        let input = Input::new(UInt256::zero(), 0);
        assert!(matches!(
            lookup.get_output(&input).await,
            Err(LookupError::OutputNotFound { index: 0, .. })
        ));
        assert!(matches!(
            lookup.get_asset(&UInt256::zero()).await,
            Err(LookupError::AssetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn corrupt_value_is_reported() {
        let lookup = lookup();
        let hash = UInt256::from_bytes([4; 32]);
        lookup
            .store()
            .put(StorageKey::Asset(hash).serialize(), vec![0x00, 0x01])
            .unwrap();
        assert!(matches!(
            lookup.get_asset(&hash).await,
            Err(LookupError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn verifies_against_stored_state() {
        let lookup = lookup();
        let input = Input::new(UInt256::from_bytes([3; 32]), 0);
        lookup
            .put_output(
                &input,
                &Output::new(UInt256::zero(), Fixed8::from_whole(2).unwrap(), UInt160::zero()),
            )
            .unwrap();
        let tx: Transaction = ContractTransaction::new(TransactionParts {
            inputs: vec![input],
            scripts: vec![Witness::new(vec![], vec![]).unwrap()],
            ..TransactionParts::default()
        })
        .unwrap()
        .into();
        tx.verify(&lookup, &VerifyOptions::default()).await.unwrap();
    }
}
