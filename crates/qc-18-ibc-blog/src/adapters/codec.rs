//! Packet Codec Adapters
//!
//! Implements `PacketCodec` over serde_json (default) and bincode.

use crate::domain::{BlogPacketData, CodecError, IbcPostPacketAck};
use crate::ports::outbound::PacketCodec;
use serde::{de::DeserializeOwned, Serialize};

/// JSON packet codec.
///
/// Struct fields serialize in declaration order, so output is canonical.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonPacketCodec;

impl JsonPacketCodec {
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

impl PacketCodec for JsonPacketCodec {
    fn encode_packet(&self, packet: &BlogPacketData) -> Result<Vec<u8>, CodecError> {
        Self::encode(packet)
    }

    fn decode_packet(&self, bytes: &[u8]) -> Result<BlogPacketData, CodecError> {
        Self::decode(bytes)
    }

    fn encode_ack(&self, ack: &IbcPostPacketAck) -> Result<Vec<u8>, CodecError> {
        Self::encode(ack)
    }

    fn decode_ack(&self, bytes: &[u8]) -> Result<IbcPostPacketAck, CodecError> {
        Self::decode(bytes)
    }
}

/// Bincode packet codec.
///
/// Rejects input that does not re-encode to the same bytes (trailing data).
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodePacketCodec;

impl BincodePacketCodec {
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: Serialize + DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
        let value: T =
            bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;

        // Anti-malleability: input must be the canonical encoding
        let canonical = Self::encode(&value)?;
        if canonical.as_slice() != bytes {
            return Err(CodecError::NonCanonical("trailing bytes after payload"));
        }
        Ok(value)
    }
}

impl PacketCodec for BincodePacketCodec {
    fn encode_packet(&self, packet: &BlogPacketData) -> Result<Vec<u8>, CodecError> {
        Self::encode(packet)
    }

    fn decode_packet(&self, bytes: &[u8]) -> Result<BlogPacketData, CodecError> {
        Self::decode(bytes)
    }

    fn encode_ack(&self, ack: &IbcPostPacketAck) -> Result<Vec<u8>, CodecError> {
        Self::encode(ack)
    }

    fn decode_ack(&self, bytes: &[u8]) -> Result<IbcPostPacketAck, CodecError> {
        Self::decode(bytes)
    }
}
