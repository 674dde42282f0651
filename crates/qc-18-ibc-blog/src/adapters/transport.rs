//! In-Memory Transport Adapter
//!
//! Implements `TransportGateway` for a single chain's end of its channels.
//! Sent packets queue in an outbox that a relayer drains.

use crate::domain::{
    ChannelCapability, ChannelEnd, ChannelState, ExecutionContext, Order, Packet, Sequence,
    TransportError,
};
use crate::ports::outbound::{OutboundPacket, TransportGateway};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::{debug, info};

type ChannelKey = (String, String);

#[derive(Clone, Debug)]
struct ChannelRecord {
    end: ChannelEnd,
    next_sequence_send: Sequence,
    capability: Option<ChannelCapability>,
}

/// In-memory transport gateway.
///
/// In production, the chain's core IBC handler plays this role.
pub struct InMemoryTransport {
    channels: RwLock<HashMap<ChannelKey, ChannelRecord>>,
    next_capability: Mutex<u64>,
    outbox: Mutex<Vec<Packet>>,
}

impl InMemoryTransport {
    /// Create a transport with no channels.
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            next_capability: Mutex::new(1),
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Open an ordered channel and grant its capability to the module.
    pub fn open_channel(
        &self,
        port: &str,
        channel: &str,
        counterparty_port: &str,
        counterparty_channel: &str,
        version: &str,
    ) -> ChannelCapability {
        let capability = {
            let mut next = self.next_capability.lock();
            let cap = ChannelCapability::new(*next);
            *next += 1;
            cap
        };

        let record = ChannelRecord {
            end: ChannelEnd {
                state: ChannelState::Open,
                ordering: Order::Ordered,
                counterparty_port: counterparty_port.to_string(),
                counterparty_channel: counterparty_channel.to_string(),
                version: version.to_string(),
            },
            next_sequence_send: 1,
            capability: Some(capability.clone()),
        };

        info!(
            "[qc-18] Opened channel {}/{} -> {}/{}",
            port, channel, counterparty_port, counterparty_channel
        );
        self.channels
            .write()
            .insert((port.to_string(), channel.to_string()), record);
        capability
    }

    /// Withdraw the module's capability for a channel.
    pub fn revoke_capability(&self, port: &str, channel: &str) {
        if let Some(record) = self
            .channels
            .write()
            .get_mut(&(port.to_string(), channel.to_string()))
        {
            record.capability = None;
        }
    }

    /// Drain packets sent since the last call, in send order.
    pub fn take_sent_packets(&self) -> Vec<Packet> {
        std::mem::take(&mut *self.outbox.lock())
    }

    /// Number of packets waiting in the outbox.
    pub fn pending_packets(&self) -> usize {
        self.outbox.lock().len()
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn authenticate(
    record: &ChannelRecord,
    capability: &ChannelCapability,
) -> Result<(), TransportError> {
    match &record.capability {
        Some(granted) if granted == capability => Ok(()),
        _ => Err(TransportError::InvalidCapability),
    }
}

impl TransportGateway for InMemoryTransport {
    fn resolve_channel_capability(&self, port: &str, channel: &str) -> Option<ChannelCapability> {
        self.channels
            .read()
            .get(&(port.to_string(), channel.to_string()))
            .and_then(|record| record.capability.clone())
    }

    fn send_packet(
        &self,
        ctx: &ExecutionContext,
        capability: &ChannelCapability,
        packet: OutboundPacket,
    ) -> Result<Sequence, TransportError> {
        let key = (packet.source_port.clone(), packet.source_channel.clone());
        let mut channels = self.channels.write();
        let record = channels
            .get_mut(&key)
            .ok_or_else(|| TransportError::ChannelNotFound {
                port: key.0.clone(),
                channel: key.1.clone(),
            })?;

        authenticate(record, capability)?;
        if !record.end.is_open() {
            return Err(TransportError::ChannelClosed {
                port: key.0.clone(),
                channel: key.1.clone(),
            });
        }

        let sequence = record.next_sequence_send;
        record.next_sequence_send += 1;

        let sent = Packet {
            sequence,
            source_port: packet.source_port,
            source_channel: packet.source_channel,
            destination_port: record.end.counterparty_port.clone(),
            destination_channel: record.end.counterparty_channel.clone(),
            data: packet.data,
            timeout_height: packet.timeout_height,
            timeout_timestamp: packet.timeout_timestamp,
        };

        debug!(
            "[qc-18] {} sent packet #{} on {}/{} ({} bytes)",
            ctx.chain_id,
            sequence,
            sent.source_port,
            sent.source_channel,
            sent.data.len()
        );
        self.outbox.lock().push(sent);
        Ok(sequence)
    }

    fn get_channel(&self, port: &str, channel: &str) -> Option<ChannelEnd> {
        self.channels
            .read()
            .get(&(port.to_string(), channel.to_string()))
            .map(|record| record.end.clone())
    }

    fn get_next_sequence_send(&self, port: &str, channel: &str) -> Option<Sequence> {
        self.channels
            .read()
            .get(&(port.to_string(), channel.to_string()))
            .map(|record| record.next_sequence_send)
    }

    fn close_channel_init(
        &self,
        ctx: &ExecutionContext,
        port: &str,
        channel: &str,
        capability: &ChannelCapability,
    ) -> Result<(), TransportError> {
        let mut channels = self.channels.write();
        let record = channels
            .get_mut(&(port.to_string(), channel.to_string()))
            .ok_or_else(|| TransportError::ChannelNotFound {
                port: port.to_string(),
                channel: channel.to_string(),
            })?;

        authenticate(record, capability)?;
        if record.end.state == ChannelState::Closed {
            return Err(TransportError::ChannelClosed {
                port: port.to_string(),
                channel: channel.to_string(),
            });
        }

        record.end.state = ChannelState::Closed;
        info!("[qc-18] {} closed channel {}/{}", ctx.chain_id, port, channel);
        Ok(())
    }
}
