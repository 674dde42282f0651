//! # Test Relayer
//!
//! Carries packets between two [`TestChain`]s the way an off-chain relayer
//! would: deliver to the destination if the packet is still live there,
//! otherwise prove the timeout back to the source.

use qc_18_ibc_blog::{
    Acknowledgement, BlogConfig, BlogError, BlogIbcModule, ExecutionContext, Height,
    InMemoryBlogService, Packet,
};

/// Nanoseconds per simulated block.
pub const BLOCK_TIME_NANOS: u64 = 5_000_000_000;

/// One chain running the blog module.
pub struct TestChain {
    pub chain_id: String,
    pub service: InMemoryBlogService,
    pub height: u64,
    pub time: u64,
}

impl TestChain {
    pub fn new(chain_id: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            service: InMemoryBlogService::new_in_memory(BlogConfig::default()),
            height: 1,
            time: 1_700_000_000_000_000_000,
        }
    }

    /// Execution context for the current block.
    pub fn ctx(&self) -> ExecutionContext {
        ExecutionContext::new(self.chain_id.as_str(), self.height, self.time)
    }

    /// Produce `blocks` empty blocks.
    pub fn advance(&mut self, blocks: u64) {
        self.height += blocks;
        self.time += blocks * BLOCK_TIME_NANOS;
    }

    fn revision_height(&self) -> Height {
        Height::new(0, self.height)
    }
}

/// What happened to one relayed packet.
#[derive(Debug)]
pub enum RelayOutcome {
    /// Delivered; the destination's acknowledgement was returned to the source.
    Acknowledged {
        sequence: u64,
        ack: Acknowledgement,
        result: Result<(), BlogError>,
    },
    /// Expired on the destination; the source ran its timeout handler.
    TimedOut {
        sequence: u64,
        result: Result<(), BlogError>,
    },
}

impl RelayOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            RelayOutcome::Acknowledged { sequence, .. } => *sequence,
            RelayOutcome::TimedOut { sequence, .. } => *sequence,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RelayOutcome::TimedOut { .. })
    }
}

/// Two chains joined by `blog/channel-0` (A) <-> `blog/channel-1` (B).
pub struct Relayer {
    pub chain_a: TestChain,
    pub chain_b: TestChain,
}

pub const PORT: &str = "blog";
pub const CHANNEL_A: &str = "channel-0";
pub const CHANNEL_B: &str = "channel-1";

impl Relayer {
    /// Create both chains and open the channel pair.
    pub fn connect() -> Self {
        let chain_a = TestChain::new("chain-a");
        let chain_b = TestChain::new("chain-b");

        chain_a
            .service
            .transport()
            .open_channel(PORT, CHANNEL_A, PORT, CHANNEL_B, "blog-1");
        chain_b
            .service
            .transport()
            .open_channel(PORT, CHANNEL_B, PORT, CHANNEL_A, "blog-1");

        Self { chain_a, chain_b }
    }

    /// Relay everything A has sent to B.
    pub fn relay_a_to_b(&self) -> Vec<RelayOutcome> {
        relay(&self.chain_a, &self.chain_b)
    }

    /// Relay everything B has sent to A.
    pub fn relay_b_to_a(&self) -> Vec<RelayOutcome> {
        relay(&self.chain_b, &self.chain_a)
    }
}

fn relay(source: &TestChain, destination: &TestChain) -> Vec<RelayOutcome> {
    source
        .service
        .transport()
        .take_sent_packets()
        .into_iter()
        .map(|packet| deliver(source, destination, packet))
        .collect()
}

fn deliver(source: &TestChain, destination: &TestChain, packet: Packet) -> RelayOutcome {
    let sequence = packet.sequence;

    if packet.is_expired(destination.revision_height(), destination.time) {
        let result = source.service.on_timeout_packet(&source.ctx(), &packet);
        return RelayOutcome::TimedOut { sequence, result };
    }

    let ack = destination
        .service
        .on_recv_packet(&destination.ctx(), &packet);
    let result = match ack.to_bytes() {
        Ok(bytes) => source
            .service
            .on_acknowledgement_packet(&source.ctx(), &packet, &bytes),
        Err(e) => Err(BlogError::Marshal(e.to_string())),
    };

    RelayOutcome::Acknowledged {
        sequence,
        ack,
        result,
    }
}
