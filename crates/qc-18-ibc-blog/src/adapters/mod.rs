//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the IBC Blog subsystem.

mod codec;
mod storage;
mod transport;

pub use codec::{BincodePacketCodec, JsonPacketCodec};
pub use storage::InMemoryKVStore;
pub use transport::InMemoryTransport;
