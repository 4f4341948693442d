use crate::error::StoreResult;
use crate::keys::KeyRange;

/// Ordered byte-keyed store.
///
/// Keys compare lexicographically as unsigned bytes, which is the order the
/// [`keys`](crate::keys) encoding is built for.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Insert or overwrite.
    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> StoreResult<()>;

    /// Returns `true` if the key existed.
    fn delete(&self, key: &[u8]) -> StoreResult<bool>;

    /// All entries with `lower <= key < upper`, in key order. An empty or
    /// inverted range yields nothing.
    fn scan(&self, lower: &[u8], upper: &[u8]) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>>;

    fn scan_range(&self, range: &KeyRange) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>> {
        self.scan(&range.lower, &range.upper)
    }

    /// Default implementation calls `put()` for each entry.
    fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> StoreResult<()> {
        entries
            .into_iter()
            .try_for_each(|(key, value)| self.put(key, value))
    }
}
