//! Ledger entities and transaction verification.
//!
//! This crate provides:
//! - Wire/JSON entities: `Input`, `Output`, `Attribute`, `Witness`, `Asset`,
//!   `ContractParameter`
//! - The closed `Transaction` family (Miner, Issue, Claim, Contract,
//!   Invocation) with hash and size sealed at construction
//! - The closed `InvocationResult` family (Halt, Fault)
//! - Async, side-effect-free verification against a `LedgerLookup`
//! - `InMemoryLookup` for tests and embedding
//! - `ProtocolSettings` loaded from TOML

pub mod asset;
pub mod attribute;
pub mod contract_parameter;
pub mod error;
pub mod input;
pub mod invocation_result;
pub mod json;
pub mod memory;
pub mod output;
pub mod settings;
pub mod traits;
pub mod transaction;
pub mod verify;
pub mod witness;

pub use asset::{Asset, AssetJson, AssetParts, AssetType};
pub use attribute::{Attribute, AttributeData, AttributeJson};
pub use contract_parameter::{
    ContractParameter, ContractParameterJson, ParameterArray, SignatureBytes, VmInteger,
};
pub use error::{LookupError, SettingsError, VerifyError, VerifyResult};
pub use input::{Input, InputJson};
pub use invocation_result::{
    InvocationResult, InvocationResultBase, InvocationResultError, InvocationResultJson,
    InvocationResultSuccess, VmState,
};
pub use json::{JsonContext, SerializableJson};
pub use memory::InMemoryLookup;
pub use output::{Output, OutputJson};
pub use settings::{ProtocolSettings, SystemFees, GOVERNING_TOKEN, UTILITY_TOKEN};
pub use traits::LedgerLookup;
pub use transaction::{
    ClaimTransaction, ContractTransaction, InvocationTransaction, IssueTransaction,
    MinerTransaction, Transaction, TransactionBase, TransactionJson, TransactionParts,
    TransactionType,
};
pub use verify::{get_transaction_results, VerifyOptions};
pub use witness::{Witness, WitnessJson};
