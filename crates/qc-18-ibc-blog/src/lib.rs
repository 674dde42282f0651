//! # QC-18 IBC Blog
//!
//! Cross-chain post transfer over an ordered packet transport.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Send a post to a remote chain and resolve its outcome back home:
//! - The receiving chain stores the post and acknowledges with its new id
//! - The sending chain records a `SentPost` on success
//! - Or a `TimedoutPost` if the packet expires first
//!
//! ## Packet Outcomes
//!
//! | Event (sending chain) | Store mutation |
//! |-----------------------|----------------|
//! | Acknowledgement: result | `SentPost` appended |
//! | Acknowledgement: error | none (logged) |
//! | Acknowledgement: unknown tag | none, `InvalidAcknowledgmentFormat` |
//! | Timeout | `TimedoutPost` appended |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-ibc-blog/
//! ├── config.rs        # BlogConfig
//! ├── domain/          # Post, SentPost, TimedoutPost, packets, errors
//! ├── ports/           # PacketLifecycleApi, BlogIbcModule, TransportGateway,
//! │                    # KeyValueStore, PacketCodec
//! ├── adapters/        # JSON/bincode codecs, in-memory store and transport
//! └── service/         # EntityStore, PacketLifecycleService
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use qc_18_ibc_blog::{BlogConfig, ExecutionContext, InMemoryBlogService, MsgSendIbcPost};
//!
//! let service = InMemoryBlogService::new_in_memory(BlogConfig::default());
//! service.transport().open_channel("blog", "channel-0", "blog", "channel-0", "blog-1");
//!
//! let ctx = ExecutionContext::new("chain-a", 1, 0);
//! let sequence = service.send_ibc_post(&ctx, &msg)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{BincodePacketCodec, InMemoryKVStore, InMemoryTransport, JsonPacketCodec};
pub use config::BlogConfig;
pub use domain::{
    chain_label, validate_packet_data, Acknowledgement, AcknowledgementResponse, BlogError,
    BlogPacketData, ChannelCapability, ChannelEnd, ChannelState, CodecError, ExecutionContext,
    Height, IbcPostPacketAck, IbcPostPacketData, MsgSendIbcPost, Order, Packet, Post, PostId,
    Record, RecordKind, SentPost, Sequence, StoreError, TimedoutPost, TransportError,
    ValidationError,
};
pub use ports::{
    BlogIbcModule, KeyValueStore, OutboundPacket, PacketCodec, PacketLifecycleApi,
    TransportGateway, WriteBatch,
};
pub use service::store::{EntityStore, KeyPrefix};
pub use service::{BlogDependencies, InMemoryBlogService, PacketLifecycleService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
