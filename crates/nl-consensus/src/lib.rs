//! dBFT consensus messages.
//!
//! Every message starts with `type | view_number`; [`ConsensusCodec`]
//! dispatches on the type byte. A [`PrepareRequest`] embeds the block's
//! miner transaction and is only constructible when its transaction hash
//! list is duplicate-free and starts with that transaction's hash.

pub mod codec;
pub mod message;

pub use codec::ConsensusCodec;
pub use message::{
    ChangeView, ConsensusMessage, ConsensusMessageJson, ConsensusMessageType, PrepareRequest,
    PrepareResponse, SIGNATURE_SIZE,
};
