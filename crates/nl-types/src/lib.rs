//! Foundation types for the ledger core.
//!
//! Every other `nl-*` crate depends on `nl-types`. The types here are plain
//! immutable values: they are compared byte-for-byte and copied freely.
//!
//! # Key Types
//!
//! - [`UInt160`] -- 20-byte script/account hash
//! - [`UInt256`] -- 32-byte transaction/block/asset hash
//! - [`Fixed8`] -- exact fixed-point amount with 8 decimal places
//! - [`PublicKey`] -- compressed secp256r1 point (33 bytes)

pub mod error;
pub mod fixed8;
pub mod hash;
pub mod public_key;

pub use error::TypeError;
pub use fixed8::Fixed8;
pub use hash::{UInt160, UInt256};
pub use public_key::PublicKey;
