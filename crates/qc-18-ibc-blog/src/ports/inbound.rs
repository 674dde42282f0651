//! # Inbound Ports
//!
//! What the IBC Blog subsystem exposes to the ledger runtime.

use crate::domain::{
    Acknowledgement, BlogError, ExecutionContext, Height, IbcPostPacketAck, IbcPostPacketData,
    Packet, Sequence,
};

/// Packet lifecycle API - inbound port.
///
/// One method per point where a packet's distributed state machine advances.
/// From the sending chain a packet moves
/// `Transmitted -> {Acknowledged-Success | Acknowledged-Error | Timed-Out}`;
/// the receiving chain either applies it or rejects it.
pub trait PacketLifecycleApi {
    /// Encode and send a post over (source_port, source_channel).
    ///
    /// No entity is created at transmit time.
    fn transmit(
        &self,
        ctx: &ExecutionContext,
        data: &IbcPostPacketData,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
    ) -> Result<Sequence, BlogError>;

    /// Apply a delivered post and build the success acknowledgement payload.
    ///
    /// A validation failure creates nothing and is returned as an error.
    fn on_recv(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        data: &IbcPostPacketData,
    ) -> Result<IbcPostPacketAck, BlogError>;

    /// Resolve a sent post from the counterparty's acknowledgement.
    fn on_acknowledgement(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        data: &IbcPostPacketData,
        ack: &Acknowledgement,
    ) -> Result<(), BlogError>;

    /// Resolve a sent post whose packet expired.
    fn on_timeout(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        data: &IbcPostPacketData,
    ) -> Result<(), BlogError>;
}

/// Router callbacks - inbound port.
///
/// Entry points the runtime's packet dispatcher calls with raw packet bytes.
pub trait BlogIbcModule {
    /// Handle a delivered packet. Errors become an error acknowledgement.
    fn on_recv_packet(&self, ctx: &ExecutionContext, packet: &Packet) -> Acknowledgement;

    /// Handle an acknowledgement relayed back for a packet this chain sent.
    fn on_acknowledgement_packet(
        &self,
        ctx: &ExecutionContext,
        packet: &Packet,
        acknowledgement: &[u8],
    ) -> Result<(), BlogError>;

    /// Handle the expiry of a packet this chain sent.
    fn on_timeout_packet(&self, ctx: &ExecutionContext, packet: &Packet) -> Result<(), BlogError>;
}
