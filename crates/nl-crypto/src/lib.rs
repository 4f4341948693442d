//! Hashing primitives for the ledger core.
//!
//! Transaction, block, and asset identifiers are double SHA-256 digests of
//! their unsigned wire form. Script and account identifiers are `hash160`
//! digests (RIPEMD-160 over SHA-256) of a verification script.
//!
//! All crypto operations wrap established libraries.

pub mod hasher;

pub use hasher::Hasher;
