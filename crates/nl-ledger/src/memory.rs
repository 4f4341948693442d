use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use nl_types::UInt256;

use crate::asset::Asset;
use crate::error::LookupError;
use crate::input::Input;
use crate::output::Output;
use crate::traits::LedgerLookup;

/// In-memory ledger state for tests and embedding.
#[derive(Default)]
pub struct InMemoryLookup {
    inner: RwLock<LookupState>,
}

#[derive(Default)]
struct LookupState {
    outputs: HashMap<Input, Output>,
    assets: HashMap<UInt256, Asset>,
}

impl InMemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_output(&self, input: Input, output: Output) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.outputs.insert(input, output);
    }

    pub fn insert_asset(&self, asset: Asset) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.assets.insert(asset.hash(), asset);
    }

    pub fn output_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").outputs.len()
    }
}

#[async_trait]
impl LedgerLookup for InMemoryLookup {
    async fn get_output(&self, input: &Input) -> Result<Output, LookupError> {
        let state = self.inner.read().expect("lock poisoned");
        state
            .outputs
            .get(input)
            .copied()
            .ok_or(LookupError::OutputNotFound {
                hash: input.hash,
                index: input.index,
            })
    }

    async fn get_asset(&self, hash: &UInt256) -> Result<Asset, LookupError> {
        let state = self.inner.read().expect("lock poisoned");
        state
            .assets
            .get(hash)
            .cloned()
            .ok_or(LookupError::AssetNotFound(*hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::tests::sample_asset;
    use nl_types::{Fixed8, UInt160};

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let lookup = InMemoryLookup::new();
        let input = Input::new(UInt256::from_bytes([1; 32]), 0);
        assert_eq!(
            lookup.get_output(&input).await.unwrap_err(),
            LookupError::OutputNotFound {
                hash: input.hash,
                index: 0
            }
        );
        assert!(matches!(
            lookup.get_asset(&UInt256::zero()).await,
            Err(LookupError::AssetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn inserted_records_are_found() {
        let lookup = InMemoryLookup::new();
        let input = Input::new(UInt256::from_bytes([1; 32]), 2);
        let output = Output::new(UInt256::zero(), Fixed8::from_raw(5), UInt160::zero());
        lookup.insert_output(input, output);
        lookup.insert_asset(sample_asset(UInt256::zero(), 10, 0));

        assert_eq!(lookup.get_output(&input).await.unwrap(), output);
        assert_eq!(lookup.get_asset(&UInt256::zero()).await.unwrap().name(), "Test Token");
        assert_eq!(lookup.output_count(), 1);
    }
}
