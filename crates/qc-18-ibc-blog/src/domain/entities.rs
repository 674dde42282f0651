//! # Domain Entities
//!
//! Append-only records kept by the entity store.
//!
//! Identifiers are assigned by the store on append. Whatever `id` a caller
//! puts in a record before appending is overwritten.

use super::errors::PostId;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Record kinds, each with its own identifier sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Accepted message.
    Post,
    /// Locally-originated message acknowledged by the remote chain.
    SentPost,
    /// Locally-originated message whose packet expired.
    TimedoutPost,
}

impl RecordKind {
    /// All kinds, in store-lock order.
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Post,
        RecordKind::SentPost,
        RecordKind::TimedoutPost,
    ];

    /// Dense index for per-kind tables.
    pub fn index(self) -> usize {
        match self {
            RecordKind::Post => 0,
            RecordKind::SentPost => 1,
            RecordKind::TimedoutPost => 2,
        }
    }
}

/// A record the entity store can append.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Which identifier sequence this record draws from.
    const KIND: RecordKind;

    /// Store-assigned identifier.
    fn id(&self) -> PostId;

    /// Overwrite the identifier (store only).
    fn set_id(&mut self, id: PostId);
}

/// A message accepted into this chain's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Author address.
    pub creator: String,
}

impl Post {
    /// Create a post awaiting an identifier.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            creator: creator.into(),
        }
    }
}

impl Record for Post {
    const KIND: RecordKind = RecordKind::Post;

    fn id(&self) -> PostId {
        self.id
    }

    fn set_id(&mut self, id: PostId) {
        self.id = id;
    }
}

/// Proof that a locally-originated post was accepted remotely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentPost {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Identifier the remote chain assigned to the post.
    pub post_id: String,
    /// Title.
    pub title: String,
    /// Remote `"{port}-{channel}"` label.
    pub chain: String,
    /// Author address.
    pub creator: String,
}

impl SentPost {
    /// Create a sent post awaiting an identifier.
    pub fn new(
        post_id: impl Into<String>,
        title: impl Into<String>,
        chain: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            post_id: post_id.into(),
            title: title.into(),
            chain: chain.into(),
            creator: creator.into(),
        }
    }
}

impl Record for SentPost {
    const KIND: RecordKind = RecordKind::SentPost;

    fn id(&self) -> PostId {
        self.id
    }

    fn set_id(&mut self, id: PostId) {
        self.id = id;
    }
}

/// A locally-originated post whose packet timed out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedoutPost {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Title.
    pub title: String,
    /// Remote `"{port}-{channel}"` label.
    pub chain: String,
    /// Author address.
    pub creator: String,
}

impl TimedoutPost {
    /// Create a timed-out post awaiting an identifier.
    pub fn new(
        title: impl Into<String>,
        chain: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            chain: chain.into(),
            creator: creator.into(),
        }
    }
}

impl Record for TimedoutPost {
    const KIND: RecordKind = RecordKind::TimedoutPost;

    fn id(&self) -> PostId {
        self.id
    }

    fn set_id(&mut self, id: PostId) {
        self.id = id;
    }
}
