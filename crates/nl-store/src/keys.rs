//! Order-preserving storage key encoding.
//!
//! A key is a one-byte type prefix followed by its fields in declaration
//! order. Hashes and public keys are written raw, integers big-endian, and
//! variable byte strings escaped (`00` becomes `00 FF`) and terminated with
//! `00 01`. Byte order of encoded keys therefore matches field order, and
//! every partial key is a byte prefix of the full keys it covers.

use std::fmt;

use nl_ledger::Input;
use nl_types::{PublicKey, UInt160, UInt256};

/// One-byte key-space prefixes.
pub mod prefix {
    pub const ACCOUNT: u8 = 0x01;
    pub const ACCOUNT_UNCLAIMED: u8 = 0x02;
    pub const ACCOUNT_UNSPENT: u8 = 0x03;
    pub const ACTION: u8 = 0x04;
    pub const ASSET: u8 = 0x05;
    pub const BLOCK: u8 = 0x06;
    pub const BLOCK_DATA: u8 = 0x07;
    pub const HEADER: u8 = 0x08;
    pub const HEADER_INDEX: u8 = 0x09;
    pub const TRANSACTION: u8 = 0x0A;
    pub const OUTPUT: u8 = 0x0B;
    pub const TRANSACTION_DATA: u8 = 0x0C;
    pub const CONTRACT: u8 = 0x0D;
    pub const STORAGE_ITEM: u8 = 0x0E;
    pub const VALIDATOR: u8 = 0x0F;
    pub const INVOCATION_DATA: u8 = 0x10;
    pub const SETTINGS: u8 = 0x11;
    pub const VALIDATORS_COUNT: u8 = 0x12;
}

const ESCAPE: u8 = 0xFF;
const TERMINATOR: [u8; 2] = [0x00, 0x01];

/// Incremental key encoder.
#[derive(Debug)]
struct KeyBuilder(Vec<u8>);

impl KeyBuilder {
    fn new(prefix: u8) -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.push(prefix);
        Self(buf)
    }

    fn uint160(mut self, hash: &UInt160) -> Self {
        self.0.extend_from_slice(hash.as_bytes());
        self
    }

    fn uint256(mut self, hash: &UInt256) -> Self {
        self.0.extend_from_slice(hash.as_bytes());
        self
    }

    fn public_key(mut self, key: &PublicKey) -> Self {
        self.0.extend_from_slice(key.as_bytes());
        self
    }

    fn u16(mut self, value: u16) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u64(mut self, value: u64) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Escaped bytes without the terminator: the partial form used for
    /// prefix bounds.
    fn escaped(mut self, bytes: &[u8]) -> Self {
        for &byte in bytes {
            self.0.push(byte);
            if byte == 0x00 {
                self.0.push(ESCAPE);
            }
        }
        self
    }

    /// A complete variable-length field.
    fn var_bytes(self, bytes: &[u8]) -> Self {
        let mut builder = self.escaped(bytes);
        builder.0.extend_from_slice(&TERMINATOR);
        builder
    }

    fn finish(self) -> Vec<u8> {
        self.0
    }
}

/// Every typed record key in the key space.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Account(UInt160),
    AccountUnclaimed { hash: UInt160, input: Input },
    AccountUnspent { hash: UInt160, input: Input },
    Action { index: u64 },
    Asset(UInt256),
    Block(UInt256),
    BlockData(UInt256),
    Header(UInt256),
    Transaction(UInt256),
    Output { hash: UInt256, index: u16 },
    TransactionData(UInt256),
    Contract(UInt160),
    StorageItem { hash: UInt160, key: Vec<u8> },
    Validator(PublicKey),
    InvocationData(UInt256),
}

impl StorageKey {
    pub fn prefix(&self) -> u8 {
        match self {
            StorageKey::Account(_) => prefix::ACCOUNT,
            StorageKey::AccountUnclaimed { .. } => prefix::ACCOUNT_UNCLAIMED,
            StorageKey::AccountUnspent { .. } => prefix::ACCOUNT_UNSPENT,
            StorageKey::Action { .. } => prefix::ACTION,
            StorageKey::Asset(_) => prefix::ASSET,
            StorageKey::Block(_) => prefix::BLOCK,
            StorageKey::BlockData(_) => prefix::BLOCK_DATA,
            StorageKey::Header(_) => prefix::HEADER,
            StorageKey::Transaction(_) => prefix::TRANSACTION,
            StorageKey::Output { .. } => prefix::OUTPUT,
            StorageKey::TransactionData(_) => prefix::TRANSACTION_DATA,
            StorageKey::Contract(_) => prefix::CONTRACT,
            StorageKey::StorageItem { .. } => prefix::STORAGE_ITEM,
            StorageKey::Validator(_) => prefix::VALIDATOR,
            StorageKey::InvocationData(_) => prefix::INVOCATION_DATA,
        }
    }

    /// Name used in the diagnostic string form.
    pub fn name(&self) -> &'static str {
        match self {
            StorageKey::Account(_) => "account",
            StorageKey::AccountUnclaimed { .. } => "accountUnclaimed",
            StorageKey::AccountUnspent { .. } => "accountUnspent",
            StorageKey::Action { .. } => "action",
            StorageKey::Asset(_) => "asset",
            StorageKey::Block(_) => "block",
            StorageKey::BlockData(_) => "blockData",
            StorageKey::Header(_) => "header",
            StorageKey::Transaction(_) => "transaction",
            StorageKey::Output { .. } => "output",
            StorageKey::TransactionData(_) => "transactionData",
            StorageKey::Contract(_) => "contract",
            StorageKey::StorageItem { .. } => "storageItem",
            StorageKey::Validator(_) => "validator",
            StorageKey::InvocationData(_) => "invocationData",
        }
    }

    /// Encode to the ordered byte form.
    pub fn serialize(&self) -> Vec<u8> {
        let builder = KeyBuilder::new(self.prefix());
        match self {
            StorageKey::Account(hash) | StorageKey::Contract(hash) => builder.uint160(hash),
            StorageKey::AccountUnclaimed { hash, input }
            | StorageKey::AccountUnspent { hash, input } => builder
                .uint160(hash)
                .uint256(&input.hash)
                .u16(input.index),
            StorageKey::Action { index } => builder.u64(*index),
            StorageKey::Asset(hash)
            | StorageKey::Block(hash)
            | StorageKey::BlockData(hash)
            | StorageKey::Header(hash)
            | StorageKey::Transaction(hash)
            | StorageKey::TransactionData(hash)
            | StorageKey::InvocationData(hash) => builder.uint256(hash),
            StorageKey::Output { hash, index } => builder.uint256(hash).u16(*index),
            StorageKey::StorageItem { hash, key } => builder.uint160(hash).var_bytes(key),
            StorageKey::Validator(key) => builder.public_key(key),
        }
        .finish()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            StorageKey::Account(hash) | StorageKey::Contract(hash) => write!(f, "{name}:{hash}"),
            StorageKey::AccountUnclaimed { hash, input }
            | StorageKey::AccountUnspent { hash, input } => {
                write!(f, "{name}:{hash}:{}:{}", input.hash, input.index)
            }
            StorageKey::Action { index } => write!(f, "{name}:{index}"),
            StorageKey::Asset(hash)
            | StorageKey::Block(hash)
            | StorageKey::BlockData(hash)
            | StorageKey::Header(hash)
            | StorageKey::Transaction(hash)
            | StorageKey::TransactionData(hash)
            | StorageKey::InvocationData(hash) => write!(f, "{name}:{hash}"),
            StorageKey::Output { hash, index } => write!(f, "{name}:{hash}:{index}"),
            StorageKey::StorageItem { hash, key } => {
                write!(f, "{name}:{hash}:{}", hex::encode(key))
            }
            StorageKey::Validator(key) => write!(f, "{name}:{key}"),
        }
    }
}

/// Key of the header hash at `index`.
pub fn header_index_hash_key(index: u32) -> Vec<u8> {
    KeyBuilder::new(prefix::HEADER_INDEX).u32(index).finish()
}

pub fn header_index_hash_key_string(index: u32) -> String {
    format!("header-index:{index}")
}

pub const VALIDATORS_COUNT_KEY_STRING: &str = "validatorsCount";

pub fn validators_count_key() -> Vec<u8> {
    vec![prefix::VALIDATORS_COUNT]
}

pub fn max_header_hash_key() -> Vec<u8> {
    KeyBuilder::new(prefix::SETTINGS)
        .var_bytes(b"max-header-hash")
        .finish()
}

pub fn max_block_hash_key() -> Vec<u8> {
    KeyBuilder::new(prefix::SETTINGS)
        .var_bytes(b"max-block-hash")
        .finish()
}

/// Half-open byte range `[lower, upper)` covering every key that extends a
/// partial key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRange {
    pub lower: Vec<u8>,
    pub upper: Vec<u8>,
}

impl KeyRange {
    /// Range of all keys starting with `partial`.
    pub fn prefixed_by(partial: Vec<u8>) -> Self {
        let upper = successor(&partial);
        Self {
            lower: partial,
            upper,
        }
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.lower.as_slice() && key < self.upper.as_slice()
    }
}

/// Smallest byte string greater than every string starting with `partial`.
///
/// Partial keys always start with a type prefix below `0xFF`, so stripping
/// trailing `0xFF` bytes never empties them.
fn successor(partial: &[u8]) -> Vec<u8> {
    let mut out = partial.to_vec();
    while out.last() == Some(&0xFF) {
        out.pop();
    }
    if let Some(last) = out.last_mut() {
        *last += 1;
    }
    out
}

pub fn account_range() -> KeyRange {
    KeyRange::prefixed_by(vec![prefix::ACCOUNT])
}

pub fn validator_range() -> KeyRange {
    KeyRange::prefixed_by(vec![prefix::VALIDATOR])
}

/// Unspent inputs owned by `hash`.
pub fn account_unspent_range(hash: &UInt160) -> KeyRange {
    KeyRange::prefixed_by(KeyBuilder::new(prefix::ACCOUNT_UNSPENT).uint160(hash).finish())
}

/// Unclaimed inputs owned by `hash`.
pub fn account_unclaimed_range(hash: &UInt160) -> KeyRange {
    KeyRange::prefixed_by(KeyBuilder::new(prefix::ACCOUNT_UNCLAIMED).uint160(hash).finish())
}

/// Actions with `start <= index <= stop`. Either end may be open.
pub fn action_range(start: Option<u64>, stop: Option<u64>) -> KeyRange {
    let lower = match start {
        Some(start) => KeyBuilder::new(prefix::ACTION).u64(start).finish(),
        None => vec![prefix::ACTION],
    };
    let upper = match stop {
        Some(stop) => successor(&KeyBuilder::new(prefix::ACTION).u64(stop).finish()),
        None => successor(&[prefix::ACTION]),
    };
    KeyRange { lower, upper }
}

/// Selects a nested slice of the storage-item key space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageItemScope<'a> {
    All,
    Contract(UInt160),
    /// Items of one contract whose key starts with the given bytes.
    Prefix(UInt160, &'a [u8]),
}

pub fn storage_item_range(scope: StorageItemScope<'_>) -> KeyRange {
    let builder = KeyBuilder::new(prefix::STORAGE_ITEM);
    let partial = match scope {
        StorageItemScope::All => builder,
        StorageItemScope::Contract(hash) => builder.uint160(&hash),
        StorageItemScope::Prefix(hash, key_prefix) => builder.uint160(&hash).escaped(key_prefix),
    };
    KeyRange::prefixed_by(partial.finish())
}
