//! # Packet Lifecycle Service
//!
//! The main service implementing the IBC Blog API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `PacketLifecycleApi` (transmit, receive, acknowledge, timeout)
//! 2. Implements `BlogIbcModule` for the runtime's packet router
//! 3. Is the sole writer to the entity store
//! 4. Uses dependency injection for transport, storage and codec

mod handlers;
mod lifecycle;
pub mod store;

use crate::adapters::{InMemoryKVStore, InMemoryTransport, JsonPacketCodec};
use crate::config::BlogConfig;
use crate::domain::{
    validate_packet_data, BlogError, ChannelEnd, ExecutionContext, Height, MsgSendIbcPost, Post,
    PostId, RecordKind, SentPost, Sequence, StoreError, TimedoutPost,
};
use crate::ports::inbound::PacketLifecycleApi;
use crate::ports::outbound::{KeyValueStore, PacketCodec, TransportGateway};
use store::EntityStore;
use tracing::info;

/// The IBC Blog service.
pub struct PacketLifecycleService<T, KV, C>
where
    T: TransportGateway,
    KV: KeyValueStore,
    C: PacketCodec,
{
    /// Transport gateway for sends and channel lookups.
    pub(crate) transport: T,
    /// Append-only entity store.
    pub(crate) store: EntityStore<KV>,
    /// Packet codec, fixed at construction.
    pub(crate) codec: C,
    /// Module configuration.
    pub(crate) config: BlogConfig,
}

/// Dependencies for PacketLifecycleService
pub struct BlogDependencies<T, KV, C> {
    pub transport: T,
    pub kv_store: KV,
    pub codec: C,
}

/// Service wired to in-memory adapters.
pub type InMemoryBlogService =
    PacketLifecycleService<InMemoryTransport, InMemoryKVStore, JsonPacketCodec>;

impl<T, KV, C> PacketLifecycleService<T, KV, C>
where
    T: TransportGateway,
    KV: KeyValueStore,
    C: PacketCodec,
{
    /// Create a new service.
    pub fn new(deps: BlogDependencies<T, KV, C>, config: BlogConfig) -> Self {
        info!("[qc-18] Blog module bound to port '{}'", config.port_id);
        Self {
            transport: deps.transport,
            store: EntityStore::new(deps.kv_store),
            codec: deps.codec,
            config,
        }
    }

    /// Transport gateway.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Entity store.
    pub fn store(&self) -> &EntityStore<KV> {
        &self.store
    }

    /// Module configuration.
    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    // =========================================================================
    // Application request
    // =========================================================================

    /// Send a post to the chain at the other end of `msg.channel_id`.
    ///
    /// The payload is validated before anything is sent. Height-based
    /// timeout is disabled; only `msg.timeout_timestamp` applies.
    pub fn send_ibc_post(
        &self,
        ctx: &ExecutionContext,
        msg: &MsgSendIbcPost,
    ) -> Result<Sequence, BlogError> {
        let data = msg.packet_data();
        validate_packet_data(&data, &self.config)?;

        self.transmit(
            ctx,
            &data,
            &msg.port,
            &msg.channel_id,
            Height::zero(),
            msg.timeout_timestamp,
        )
    }

    // =========================================================================
    // Transport pass-throughs
    // =========================================================================

    /// Channel end for (port, channel).
    pub fn get_channel(&self, port: &str, channel: &str) -> Option<ChannelEnd> {
        self.transport.get_channel(port, channel)
    }

    /// Sequence the next send on (port, channel) will receive.
    pub fn get_next_sequence_send(&self, port: &str, channel: &str) -> Option<Sequence> {
        self.transport.get_next_sequence_send(port, channel)
    }

    /// Begin closing a channel the module owns.
    pub fn close_channel_init(
        &self,
        ctx: &ExecutionContext,
        port: &str,
        channel: &str,
    ) -> Result<(), BlogError> {
        let capability = self
            .transport
            .resolve_channel_capability(port, channel)
            .ok_or_else(|| BlogError::CapabilityNotFound {
                port: port.to_string(),
                channel: channel.to_string(),
            })?;
        self.transport
            .close_channel_init(ctx, port, channel, &capability)?;
        Ok(())
    }

    // =========================================================================
    // Store reads
    // =========================================================================

    /// Post by identifier.
    pub fn get_post(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        self.store.get(id)
    }

    /// Sent post by identifier.
    pub fn get_sent_post(&self, id: PostId) -> Result<Option<SentPost>, StoreError> {
        self.store.get(id)
    }

    /// Timed-out post by identifier.
    pub fn get_timedout_post(&self, id: PostId) -> Result<Option<TimedoutPost>, StoreError> {
        self.store.get(id)
    }

    /// All posts.
    pub fn all_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.store.all()
    }

    /// All sent posts.
    pub fn all_sent_posts(&self) -> Result<Vec<SentPost>, StoreError> {
        self.store.all()
    }

    /// All timed-out posts.
    pub fn all_timedout_posts(&self) -> Result<Vec<TimedoutPost>, StoreError> {
        self.store.all()
    }

    /// Number of records of a kind.
    pub fn count(&self, kind: RecordKind) -> Result<u64, StoreError> {
        self.store.count(kind)
    }
}

impl InMemoryBlogService {
    /// Create a service backed by in-memory adapters and the JSON codec.
    pub fn new_in_memory(config: BlogConfig) -> Self {
        Self::new(
            BlogDependencies {
                transport: InMemoryTransport::new(),
                kv_store: InMemoryKVStore::new(),
                codec: JsonPacketCodec,
            },
            config,
        )
    }
}
