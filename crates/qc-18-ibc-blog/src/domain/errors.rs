//! # Domain Errors
//!
//! Error types for the IBC Blog subsystem.
//!
//! Every error is returned to the invoking runtime, which decides whether the
//! surrounding transaction rolls back. Nothing here is retried internally.

use thiserror::Error;

/// Entity identifier assigned by the entity store.
pub type PostId = u64;

/// Packet sequence number assigned by the transport on send.
pub type Sequence = u64;

/// Module-level error taxonomy.
#[derive(Debug, Error)]
pub enum BlogError {
    /// The transport has not granted this channel to the module.
    #[error("Channel capability not found: {port}/{channel} (module does not own channel capability)")]
    CapabilityNotFound {
        /// Source port.
        port: String,
        /// Source channel.
        channel: String,
    },

    /// Outbound payload could not be encoded.
    #[error("Cannot marshal the packet: {0}")]
    Marshal(String),

    /// Inbound packet or acknowledgment could not be decoded.
    #[error("Cannot unmarshal: {0}")]
    Unmarshal(String),

    /// Inbound payload rejected on semantic grounds.
    #[error("Invalid packet data: {0}")]
    Validation(#[from] ValidationError),

    /// Counterparty sent an acknowledgment with an unrecognized outcome.
    #[error("Invalid acknowledgment format")]
    InvalidAcknowledgmentFormat,

    /// Packet envelope carries no known payload.
    #[error("Unrecognized blog packet type")]
    UnknownPacket,

    /// Transport gateway failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Entity store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Semantic validation failures for inbound payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field is empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Offending field name.
        field: &'static str,
    },

    /// Field exceeds its configured byte limit.
    #[error("{field} is {len} bytes, max {max}")]
    FieldTooLong {
        /// Offending field name.
        field: &'static str,
        /// Actual length in bytes.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Packet codec failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Serialization failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Input was malformed or truncated.
    #[error("decode error: {0}")]
    Decode(String),

    /// Input decoded but is not the canonical encoding of its value.
    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),
}

/// Entity store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io {
        /// Backend message.
        message: String,
    },

    /// Stored bytes failed to decode.
    #[error("KV store corruption: {message}")]
    Corruption {
        /// Decoder message.
        message: String,
    },

    /// Record failed to encode.
    #[error("Record serialization error: {message}")]
    Serialization {
        /// Encoder message.
        message: String,
    },
}

/// Transport gateway failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No channel end exists for (port, channel).
    #[error("Channel not found: {port}/{channel}")]
    ChannelNotFound {
        /// Port identifier.
        port: String,
        /// Channel identifier.
        channel: String,
    },

    /// Channel is not open.
    #[error("Channel closed: {port}/{channel}")]
    ChannelClosed {
        /// Port identifier.
        port: String,
        /// Channel identifier.
        channel: String,
    },

    /// Capability does not authenticate the channel.
    #[error("Invalid channel capability")]
    InvalidCapability,

    /// Any other send failure.
    #[error("Send failed: {0}")]
    Send(String),
}
