use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::KeyValueStore;

/// In-memory, `BTreeMap`-based store for tests and embedding.
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> StoreResult<()> {
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StoreResult<bool> {
        let mut map = self.entries.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }

    fn scan(&self, lower: &[u8], upper: &[u8]) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>> {
        // BTreeMap::range panics on an inverted range.
        if lower >= upper {
            return Ok(Vec::new());
        }
        let map = self.entries.read().expect("lock poisoned");
        let entries: Vec<_> = map
            .range::<[u8], _>((Bound::Included(lower), Bound::Excluded(upper)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        tracing::trace!(
            lower = %hex::encode(lower),
            upper = %hex::encode(upper),
            count = entries.len(),
            "scanned key range"
        );
        Ok(entries)
    }
}
