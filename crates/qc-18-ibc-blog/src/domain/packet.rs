//! # Packet Types
//!
//! Wire payloads exchanged between blog modules and the transport packet
//! that carries them.

use super::errors::{CodecError, Sequence};
use super::value_objects::{chain_label, Height};
use serde::{Deserialize, Serialize};

/// Post payload carried by an outbound packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcPostPacketData {
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Author address on the sending chain.
    pub creator: String,
}

impl IbcPostPacketData {
    /// Create a new payload.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            creator: creator.into(),
        }
    }
}

/// Success payload returned by the receiving module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcPostPacketAck {
    /// Identifier the receiver assigned to the stored post.
    pub post_id: String,
}

/// Request to send a post to another chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSendIbcPost {
    /// Author address on this chain.
    pub creator: String,
    /// Source port.
    pub port: String,
    /// Source channel.
    pub channel_id: String,
    /// Counterparty time (ns) after which the packet expires.
    pub timeout_timestamp: u64,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
}

impl MsgSendIbcPost {
    /// Payload this message transmits.
    pub fn packet_data(&self) -> IbcPostPacketData {
        IbcPostPacketData::new(&self.title, &self.content, &self.creator)
    }
}

/// Module packet envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogPacketData {
    /// Empty envelope.
    NoData,
    /// Post transfer.
    IbcPostPacket(IbcPostPacketData),
}

/// Packet as delivered by the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Send sequence on the source channel.
    pub sequence: Sequence,
    /// Port on the sending chain.
    pub source_port: String,
    /// Channel on the sending chain.
    pub source_channel: String,
    /// Port on the receiving chain.
    pub destination_port: String,
    /// Channel on the receiving chain.
    pub destination_channel: String,
    /// Encoded `BlogPacketData`.
    pub data: Vec<u8>,
    /// Receiving-chain height after which the packet expires.
    pub timeout_height: Height,
    /// Receiving-chain time (ns) after which the packet expires.
    pub timeout_timestamp: u64,
}

impl Packet {
    /// `"{port}-{channel}"` label of the receiving end.
    pub fn destination_chain(&self) -> String {
        chain_label(&self.destination_port, &self.destination_channel)
    }

    /// Check whether the packet expired at the given receiving-chain height/time.
    pub fn is_expired(&self, height: Height, time: u64) -> bool {
        let height_expired = !self.timeout_height.is_zero() && height >= self.timeout_height;
        let time_expired = self.timeout_timestamp != 0 && time >= self.timeout_timestamp;
        height_expired || time_expired
    }
}

/// Outcome carried by an acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcknowledgementResponse {
    /// Application success; bytes are an encoded `IbcPostPacketAck`.
    Result(Vec<u8>),
    /// Application failure message.
    Error(String),
}

/// Acknowledgement envelope relayed back to the sending chain.
///
/// `response` is `None` when the counterparty wrote an outcome tag this
/// module does not recognize.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    response: Option<AcknowledgementResponse>,
}

impl Acknowledgement {
    /// Success acknowledgement.
    pub fn success(result: Vec<u8>) -> Self {
        Self {
            response: Some(AcknowledgementResponse::Result(result)),
        }
    }

    /// Failure acknowledgement.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: Some(AcknowledgementResponse::Error(message.into())),
        }
    }

    /// Outcome, if recognized.
    pub fn response(&self) -> Option<&AcknowledgementResponse> {
        self.response.as_ref()
    }

    /// Check if this is a success acknowledgement.
    pub fn is_success(&self) -> bool {
        matches!(self.response, Some(AcknowledgementResponse::Result(_)))
    }

    /// Encode as `{"result": [...]}` or `{"error": "..."}`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        match &self.response {
            Some(response) => {
                serde_json::to_vec(response).map_err(|e| CodecError::Encode(e.to_string()))
            }
            None => Ok(b"{}".to_vec()),
        }
    }

    /// Decode acknowledgement bytes written by the counterparty.
    ///
    /// Malformed JSON is a decode error. A well-formed object with an
    /// unrecognized outcome yields an acknowledgement without a response.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
        if !value.is_object() {
            return Err(CodecError::Decode(
                "acknowledgement must be a JSON object".to_string(),
            ));
        }
        let response = serde_json::from_value::<AcknowledgementResponse>(value).ok();
        Ok(Self { response })
    }
}
