//! # Router Callbacks
//!
//! Decodes raw packet bytes into the module envelope and dispatches to the
//! lifecycle operations.

use super::*;
use crate::domain::{Acknowledgement, BlogPacketData, IbcPostPacketData, Packet};
use crate::ports::inbound::BlogIbcModule;
use tracing::warn;

impl<T, KV, C> PacketLifecycleService<T, KV, C>
where
    T: TransportGateway,
    KV: KeyValueStore,
    C: PacketCodec,
{
    /// Decode a packet's envelope, accepting only post transfers.
    fn decode_post_packet(&self, packet: &Packet) -> Result<IbcPostPacketData, BlogError> {
        let envelope = self
            .codec
            .decode_packet(&packet.data)
            .map_err(|e| BlogError::Unmarshal(format!("cannot unmarshal packet: {}", e)))?;

        match envelope {
            BlogPacketData::IbcPostPacket(data) => Ok(data),
            BlogPacketData::NoData => Err(BlogError::UnknownPacket),
        }
    }

    fn handle_recv(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
    ) -> Result<Acknowledgement, BlogError> {
        let data = self.decode_post_packet(packet)?;
        let packet_ack = self.on_recv(ctx, packet, &data)?;

        // Encoding a single-string struct cannot fail for either codec
        let result = self
            .codec
            .encode_ack(&packet_ack)
            .map_err(|e| BlogError::Marshal(e.to_string()))?;
        Ok(Acknowledgement::success(result))
    }
}

impl<T, KV, C> BlogIbcModule for PacketLifecycleService<T, KV, C>
where
    T: TransportGateway,
    KV: KeyValueStore,
    C: PacketCodec,
{
    fn on_recv_packet(&self, ctx: &ExecutionContext, packet: &Packet) -> Acknowledgement {
        match self.handle_recv(ctx, packet) {
            Ok(ack) => ack,
            Err(err) => {
                warn!(
                    sequence = packet.sequence,
                    "[qc-18] Returning error acknowledgement: {}", err
                );
                Acknowledgement::error(format!("error handling packet: {}", err))
            }
        }
    }

    fn on_acknowledgement_packet(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        acknowledgement: &[u8],
    ) -> Result<(), BlogError> {
        let ack = Acknowledgement::from_bytes(acknowledgement).map_err(|e| {
            BlogError::Unmarshal(format!("cannot unmarshal packet acknowledgement: {}", e))
        })?;
        let data = self.decode_post_packet(packet)?;
        self.on_acknowledgement(ctx, packet, &data, &ack)
    }

    fn on_timeout_packet(&self, ctx: &ExecutionContext, packet: &Packet) -> Result<(), BlogError> {
        let data = self.decode_post_packet(packet)?;
        self.on_timeout(ctx, packet, &data)
    }
}
