//! Verification stages shared by every transaction variant.
//!
//! Verification never mutates anything. All ledger state comes from the
//! [`LedgerLookup`] and the mempool snapshot in [`VerifyOptions`], both
//! supplied by the caller. Lookups issued by one stage run concurrently and
//! the first failure wins.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::future::Future;

use futures::future::try_join_all;
use nl_types::{UInt160, UInt256};

use crate::error::{VerifyError, VerifyResult};
use crate::output::Output;
use crate::traits::LedgerLookup;
use crate::transaction::{Transaction, TransactionBase};
use crate::witness::Witness;

/// Per-call verification inputs beyond the ledger lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerifyOptions<'a> {
    /// Pending transactions. May include the transaction being verified;
    /// entries are told apart by hash.
    pub mempool: &'a [Transaction],
}

impl<'a> VerifyOptions<'a> {
    pub fn with_mempool(mempool: &'a [Transaction]) -> Self {
        Self { mempool }
    }

    /// Mempool entries other than the transaction with hash `own`.
    pub fn others(&self, own: UInt256) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.mempool.iter().filter(move |tx| tx.hash() != own)
    }
}

/// Base stage: duplicate and double-spend checks, then witness matching
/// against `script_hashes`.
pub(crate) async fn verify_base<F>(
    base: &TransactionBase,
    script_hashes: F,
    options: &VerifyOptions<'_>,
) -> VerifyResult<()>
where
    F: Future<Output = VerifyResult<BTreeSet<UInt160>>>,
{
    let inputs = base.inputs();
    let distinct: HashSet<_> = inputs.iter().collect();
    if distinct.len() != inputs.len() {
        return Err(VerifyError::failed("duplicate inputs"));
    }

    for other in options.others(base.hash()) {
        if other.base().inputs().iter().any(|input| distinct.contains(input)) {
            return Err(VerifyError::failed(format!(
                "input double spent by mempool transaction {}",
                other.hash()
            )));
        }
    }

    if base.outputs().iter().any(|output| output.value.raw() <= 0) {
        return Err(VerifyError::failed("output value must be positive"));
    }

    let hashes = script_hashes.await?;
    verify_scripts(&hashes, base.scripts())
}

/// Witnesses pair one-to-one with the sorted script hashes. An empty
/// verification script is resolved by the VM from the hash and is not
/// checked here.
pub(crate) fn verify_scripts(hashes: &BTreeSet<UInt160>, scripts: &[Witness]) -> VerifyResult<()> {
    if hashes.len() != scripts.len() {
        return Err(VerifyError::failed(format!(
            "expected {} witnesses, got {}",
            hashes.len(),
            scripts.len()
        )));
    }
    for (expected, witness) in hashes.iter().zip(scripts) {
        if !witness.verification().is_empty() && witness.script_hash() != *expected {
            return Err(VerifyError::failed(format!(
                "witness does not match script hash {expected}"
            )));
        }
    }
    Ok(())
}

/// Outputs referenced by `base`'s inputs, fetched concurrently.
pub async fn get_references(
    base: &TransactionBase,
    lookup: &dyn LedgerLookup,
) -> VerifyResult<Vec<Output>> {
    let outputs = try_join_all(base.inputs().iter().map(|input| lookup.get_output(input))).await?;
    Ok(outputs)
}

/// Net amount per asset: referenced inputs minus outputs. A negative entry
/// means the transaction creates that asset.
pub async fn get_transaction_results(
    base: &TransactionBase,
    lookup: &dyn LedgerLookup,
) -> VerifyResult<BTreeMap<UInt256, i128>> {
    let references = get_references(base, lookup).await?;
    Ok(results_from(base, &references))
}

/// [`get_transaction_results`] over already fetched `references`.
pub(crate) fn results_from(base: &TransactionBase, references: &[Output]) -> BTreeMap<UInt256, i128> {
    let mut results: BTreeMap<UInt256, i128> = BTreeMap::new();
    for output in references {
        *results.entry(output.asset).or_default() += output.value.wide();
    }
    for output in base.outputs() {
        *results.entry(output.asset).or_default() -= output.value.wide();
    }
    results
}

/// Script hashes every transaction must be witnessed by: the owners of the
/// spent outputs and any `Script` attributes.
pub async fn base_script_hashes(
    base: &TransactionBase,
    lookup: &dyn LedgerLookup,
) -> VerifyResult<BTreeSet<UInt160>> {
    let references = get_references(base, lookup).await?;
    Ok(script_hashes_from(base, &references))
}

pub(crate) fn script_hashes_from(base: &TransactionBase, references: &[Output]) -> BTreeSet<UInt160> {
    let mut hashes: BTreeSet<UInt160> = references.iter().map(|output| output.address).collect();
    hashes.extend(base.attributes().iter().filter_map(|attr| attr.script_hash()));
    hashes
}
