use nl_codec::CodecError;
use nl_types::UInt256;

/// Failure of an external ledger-state lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("output not found: {hash}:{index}")]
    OutputNotFound { hash: UInt256, index: u16 },

    #[error("asset not found: {0}")]
    AssetNotFound(UInt256),

    /// I/O or timeout in the backing store. Safe to retry.
    #[error("lookup backend failure: {0}")]
    Backend(String),

    #[error("stored value is malformed: {0}")]
    Corrupt(#[from] CodecError),
}

/// Errors produced by transaction verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The transaction violates a ledger-state invariant and is rejected.
    #[error("verification failed: {0}")]
    VerificationFailed(String),

    /// A collaborator lookup failed; the transaction was not judged.
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

impl VerifyError {
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        VerifyError::VerificationFailed(reason.into())
    }

    /// Returns `true` if the caller may retry the same verification.
    pub fn is_retryable(&self) -> bool {
        matches!(self, VerifyError::Lookup(LookupError::Backend(_)))
    }
}

/// Result alias for verification.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors loading [`ProtocolSettings`](crate::settings::ProtocolSettings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
