use nl_codec::CodecError;
use nl_ledger::LookupError;

/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O or other failure in the storage backend.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored value failed to decode.
    #[error("corrupt value at {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: CodecError,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt { source, .. } => LookupError::Corrupt(source),
            other => LookupError::Backend(other.to_string()),
        }
    }
}
