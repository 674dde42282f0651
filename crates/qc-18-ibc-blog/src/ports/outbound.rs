//! # Outbound Ports
//!
//! Traits for external dependencies (transport, storage, codec).
//!
//! The lifecycle manager runs inside one serialized execution context, so
//! none of these ports suspend. Implementations must still be `Send + Sync`
//! so a host can share them across its runtime.

use crate::domain::{
    BlogPacketData, ChannelCapability, ChannelEnd, CodecError, ExecutionContext, Height,
    IbcPostPacketAck, Sequence, StoreError, TransportError,
};

/// Packet handed to the transport for sending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundPacket {
    /// Port on this chain.
    pub source_port: String,
    /// Channel on this chain.
    pub source_channel: String,
    /// Counterparty height after which the packet expires (zero disables).
    pub timeout_height: Height,
    /// Counterparty time (ns) after which the packet expires (zero disables).
    pub timeout_timestamp: u64,
    /// Encoded `BlogPacketData`.
    pub data: Vec<u8>,
}

/// Transport gateway - outbound port.
///
/// Channel handshakes and delivery ordering live behind this trait.
pub trait TransportGateway: Send + Sync {
    /// Look up the capability the transport granted this module for a channel.
    fn resolve_channel_capability(&self, port: &str, channel: &str) -> Option<ChannelCapability>;

    /// Send a packet, returning its sequence on the source channel.
    fn send_packet(
        &self,
        ctx: &ExecutionContext,
        capability: &ChannelCapability,
        packet: OutboundPacket,
    ) -> Result<Sequence, TransportError>;

    /// Channel end for (port, channel).
    fn get_channel(&self, port: &str, channel: &str) -> Option<ChannelEnd>;

    /// Sequence the next send on (port, channel) will receive.
    fn get_next_sequence_send(&self, port: &str, channel: &str) -> Option<Sequence>;

    /// Begin closing a channel.
    fn close_channel_init(
        &self,
        ctx: &ExecutionContext,
        port: &str,
        channel: &str,
        capability: &ChannelCapability,
    ) -> Result<(), TransportError>;
}

/// Ordered set of puts applied atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    puts: Vec<(Vec<u8>, Vec<u8>)>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a put.
    pub fn put(mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        self.puts.push((key.into(), value.into()));
        self
    }

    /// Number of puts.
    pub fn len(&self) -> usize {
        self.puts.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.puts.is_empty()
    }

    /// Consume into (key, value) pairs.
    pub fn into_puts(self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.puts
    }
}

/// Result of a prefix scan, in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value persistence.
///
/// There is no delete: entity kinds are append-only.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Apply every put in the batch, or none of them.
    fn atomic_batch_write(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Iterate over keys with a prefix, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StoreError>;
}

/// Packet codec - outbound port.
///
/// Encoding must be canonical: the same value always yields identical bytes.
/// Decoding never panics on malformed input.
pub trait PacketCodec: Send + Sync {
    /// Encode a packet envelope.
    fn encode_packet(&self, packet: &BlogPacketData) -> Result<Vec<u8>, CodecError>;

    /// Decode a packet envelope.
    fn decode_packet(&self, bytes: &[u8]) -> Result<BlogPacketData, CodecError>;

    /// Encode a success acknowledgement payload.
    fn encode_ack(&self, ack: &IbcPostPacketAck) -> Result<Vec<u8>, CodecError>;

    /// Decode a success acknowledgement payload.
    fn decode_ack(&self, bytes: &[u8]) -> Result<IbcPostPacketAck, CodecError>;
}
