//! # Domain Value Objects
//!
//! Immutable value types shared between the lifecycle manager and the
//! transport gateway.

use serde::{Deserialize, Serialize};
use tracing::Span;

/// Block height on the counterparty chain, used for packet timeouts.
///
/// A zero height disables the height-based timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Height {
    /// Revision (chain upgrade epoch).
    pub revision_number: u64,
    /// Height within the revision.
    pub revision_height: u64,
}

impl Height {
    /// Create a new height.
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    /// The disabled timeout height.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Check if height-based timeout is disabled.
    pub fn is_zero(&self) -> bool {
        self.revision_number == 0 && self.revision_height == 0
    }
}

/// Opaque authorization token for a (port, channel) pair.
///
/// Issued by the transport; the lifecycle manager only passes it back.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelCapability {
    index: u64,
}

impl ChannelCapability {
    /// Create a capability with a transport-assigned index.
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    /// Transport-assigned index.
    pub fn index(&self) -> u64 {
        self.index
    }
}

/// Channel handshake state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelState {
    /// Handshake started locally.
    #[default]
    Init,
    /// Handshake started by counterparty.
    TryOpen,
    /// Ready for packets.
    Open,
    /// No more packets may be sent.
    Closed,
}

/// Channel delivery ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    /// Packets may be delivered in any order.
    #[default]
    Unordered,
    /// Packets are delivered in sequence order.
    Ordered,
}

/// Channel end as seen from this chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEnd {
    /// Handshake state.
    pub state: ChannelState,
    /// Delivery ordering.
    pub ordering: Order,
    /// Port on the counterparty chain.
    pub counterparty_port: String,
    /// Channel on the counterparty chain.
    pub counterparty_channel: String,
    /// Negotiated application version.
    pub version: String,
}

impl ChannelEnd {
    /// Check if packets may be sent on this channel.
    pub fn is_open(&self) -> bool {
        self.state == ChannelState::Open
    }
}

/// Execution context of the surrounding ledger runtime.
///
/// One operation runs to completion inside a context before the next begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Identifier of the chain executing the operation.
    pub chain_id: String,
    /// Height of the block being executed.
    pub block_height: u64,
    /// Block time in nanoseconds since epoch.
    pub block_time: u64,
}

impl ExecutionContext {
    /// Create a new context.
    pub fn new(chain_id: impl Into<String>, block_height: u64, block_time: u64) -> Self {
        Self {
            chain_id: chain_id.into(),
            block_height,
            block_time,
        }
    }

    /// Span carrying the chain and height for every event logged inside it.
    pub fn span(&self, operation: &'static str) -> Span {
        tracing::info_span!(
            "ibc_blog",
            op = operation,
            chain = %self.chain_id,
            height = self.block_height
        )
    }
}

/// Label identifying a remote chain endpoint, `"{port}-{channel}"`.
pub fn chain_label(port: &str, channel: &str) -> String {
    format!("{}-{}", port, channel)
}
