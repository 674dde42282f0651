//! # Packet Lifecycle Implementation
//!
//! Implements the PacketLifecycleApi trait.
//!
//! Per packet, from the sending chain:
//!
//! ```text
//! Transmitted ──ack(result)──→ SentPost created
//!      │ ├─────ack(error)───→ logged, nothing stored
//!      │ └─────ack(unknown)─→ InvalidAcknowledgmentFormat
//!      └──────timeout───────→ TimedoutPost created
//! ```
//!
//! The transport invokes at most one of acknowledge/timeout per packet, and
//! at most once. Neither handler re-checks that.

use super::*;
use crate::domain::{
    Acknowledgement, AcknowledgementResponse, BlogPacketData, IbcPostPacketAck,
    IbcPostPacketData, Packet,
};
use crate::ports::outbound::OutboundPacket;
use tracing::{error, warn};

impl<T, KV, C> PacketLifecycleApi for PacketLifecycleService<T, KV, C>
where
    T: TransportGateway,
    KV: KeyValueStore,
    C: PacketCodec,
{
    fn transmit(
        &self,
        ctx: &ExecutionContext,
        data: &IbcPostPacketData,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
    ) -> Result<Sequence, BlogError> {
        let _span = ctx.span("transmit").entered();

        let capability = self
            .transport
            .resolve_channel_capability(source_port, source_channel)
            .ok_or_else(|| BlogError::CapabilityNotFound {
                port: source_port.to_string(),
                channel: source_channel.to_string(),
            })?;

        let bytes = self
            .codec
            .encode_packet(&BlogPacketData::IbcPostPacket(data.clone()))
            .map_err(|e| BlogError::Marshal(e.to_string()))?;

        let sequence = self.transport.send_packet(
            ctx,
            &capability,
            OutboundPacket {
                source_port: source_port.to_string(),
                source_channel: source_channel.to_string(),
                timeout_height,
                timeout_timestamp,
                data: bytes,
            },
        )?;

        info!(
            port = source_port,
            channel = source_channel,
            sequence,
            "[qc-18] 📤 Transmitted post '{}' from {}",
            data.title,
            data.creator
        );
        Ok(sequence)
    }

    fn on_recv(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        data: &IbcPostPacketData,
    ) -> Result<IbcPostPacketAck, BlogError> {
        let _span = ctx.span("recv").entered();

        if let Err(err) = validate_packet_data(data, &self.config) {
            warn!(
                sequence = packet.sequence,
                "[qc-18] Rejected packet from {}/{}: {}",
                packet.source_port,
                packet.source_channel,
                err
            );
            return Err(err.into());
        }

        let post_id = self.store.append(Post::new(
            data.title.as_str(),
            data.content.as_str(),
            data.creator.as_str(),
        ))?;

        info!(
            sequence = packet.sequence,
            post_id,
            "[qc-18] 📥 Stored post '{}' from {}/{}",
            data.title,
            packet.source_port,
            packet.source_channel
        );

        Ok(IbcPostPacketAck {
            post_id: post_id.to_string(),
        })
    }

    fn on_acknowledgement(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        data: &IbcPostPacketData,
        ack: &Acknowledgement,
    ) -> Result<(), BlogError> {
        let _span = ctx.span("acknowledge").entered();

        match ack.response() {
            Some(AcknowledgementResponse::Error(remote_error)) => {
                // Remote failure is terminal and leaves no record
                error!(
                    sequence = packet.sequence,
                    err = %remote_error,
                    "[qc-18] acknowledge recv error"
                );
                Ok(())
            }
            Some(AcknowledgementResponse::Result(result)) => {
                let packet_ack = self
                    .codec
                    .decode_ack(result)
                    .map_err(|e| BlogError::Unmarshal(format!("cannot unmarshal acknowledgment: {}", e)))?;

                info!(
                    sequence = packet.sequence,
                    post_id = %packet_ack.post_id,
                    "[qc-18] send post success"
                );

                self.store.append(SentPost::new(
                    packet_ack.post_id,
                    data.title.as_str(),
                    packet.destination_chain(),
                    data.creator.as_str(),
                ))?;
                Ok(())
            }
            None => Err(BlogError::InvalidAcknowledgmentFormat),
        }
    }

    fn on_timeout(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        data: &IbcPostPacketData,
    ) -> Result<(), BlogError> {
        let _span = ctx.span("timeout").entered();

        let chain = packet.destination_chain();
        warn!(
            sequence = packet.sequence,
            "[qc-18] ⏱ Post '{}' timed out before reaching {}",
            data.title,
            chain
        );

        self.store.append(TimedoutPost::new(
            data.title.as_str(),
            chain,
            data.creator.as_str(),
        ))?;
        Ok(())
    }
}
