//! Storage key space and key-value storage for the ledger core.
//!
//! # Components
//!
//! - [`keys`] -- order-preserving key encoding, range bounds, and diagnostic
//!   key strings
//! - [`KeyValueStore`] -- ordered `get`/`put`/`delete`/`scan` boundary
//! - [`InMemoryKeyValueStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`StoreLookup`] -- ledger lookups served from a key-value store
//!
//! # Design Rules
//!
//! 1. Key encoding is a pure function of the typed key.
//! 2. Encoded byte order matches field order, leftmost field first.
//! 3. A scan over `[lower, upper)` from any bound function returns exactly the
//!    keys the bound describes.

pub mod error;
pub mod keys;
pub mod lookup;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use keys::{KeyRange, StorageItemScope, StorageKey};
pub use lookup::StoreLookup;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
