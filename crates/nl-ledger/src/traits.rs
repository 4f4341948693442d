use async_trait::async_trait;
use nl_types::UInt256;

use crate::asset::Asset;
use crate::error::LookupError;
use crate::input::Input;
use crate::output::Output;

/// Read access to ledger state needed by transaction verification.
///
/// Implementations report I/O trouble as [`LookupError::Backend`] so callers
/// can tell a retryable failure from a missing record.
#[async_trait]
pub trait LedgerLookup: Send + Sync {
    /// The output an input spends.
    async fn get_output(&self, input: &Input) -> Result<Output, LookupError>;

    async fn get_asset(&self, hash: &UInt256) -> Result<Asset, LookupError>;
}
