//! # Entity Store
//!
//! Append-only record storage over a `KeyValueStore`.
//!
//! Each record kind draws identifiers from its own counter. The record and
//! its counter bump are written in one atomic batch, so an identifier is
//! consumed exactly when its record becomes visible and is never handed out
//! twice.

use crate::domain::{PostId, Record, RecordKind, StoreError};
use crate::ports::outbound::{KeyValueStore, WriteBatch};
use parking_lot::Mutex;

/// Key prefixes for the key-value store.
#[derive(Debug, Clone, Copy)]
pub enum KeyPrefix {
    /// Post records: `p:{id_be}` -> Post
    Post,
    /// Sent post records: `s:{id_be}` -> SentPost
    SentPost,
    /// Timed-out post records: `t:{id_be}` -> TimedoutPost
    TimedoutPost,
    /// Per-kind counters: `c:{kind}` -> next id (u64 big-endian)
    Count,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Post => b"p:",
            KeyPrefix::SentPost => b"s:",
            KeyPrefix::TimedoutPost => b"t:",
            KeyPrefix::Count => b"c:",
        }
    }

    /// Record prefix for a kind.
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Post => KeyPrefix::Post,
            RecordKind::SentPost => KeyPrefix::SentPost,
            RecordKind::TimedoutPost => KeyPrefix::TimedoutPost,
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Key of a record. Big-endian ids keep prefix scans in id order.
    pub fn record_key(kind: RecordKind, id: PostId) -> Vec<u8> {
        Self::for_kind(kind).key(&id.to_be_bytes())
    }

    /// Key of a kind's counter.
    pub fn count_key(kind: RecordKind) -> Vec<u8> {
        let tag: &[u8] = match kind {
            RecordKind::Post => b"p",
            RecordKind::SentPost => b"s",
            RecordKind::TimedoutPost => b"t",
        };
        KeyPrefix::Count.key(tag)
    }
}

/// Append-only store for Post, SentPost and TimedoutPost records.
pub struct EntityStore<KV: KeyValueStore> {
    kv: KV,
    /// Serializes appends within a kind; kinds never contend with each other.
    kind_locks: [Mutex<()>; 3],
}

impl<KV: KeyValueStore> EntityStore<KV> {
    /// Wrap a key-value store.
    pub fn new(kv: KV) -> Self {
        Self {
            kv,
            kind_locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    /// Underlying key-value store.
    pub fn kv(&self) -> &KV {
        &self.kv
    }

    /// Append a record, returning its newly assigned identifier.
    ///
    /// Any identifier already set on `record` is ignored.
    pub fn append<R: Record>(&self, mut record: R) -> Result<PostId, StoreError> {
        let _guard = self.kind_locks[R::KIND.index()].lock();

        let id = self.count(R::KIND)?;
        let next = id.checked_add(1).ok_or_else(|| StoreError::Io {
            message: format!("{:?} identifier space exhausted", R::KIND),
        })?;
        record.set_id(id);

        let value = bincode::serialize(&record).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;

        let batch = WriteBatch::new()
            .put(KeyPrefix::record_key(R::KIND, id), value)
            .put(KeyPrefix::count_key(R::KIND), next.to_be_bytes().to_vec());
        self.kv.atomic_batch_write(batch)?;

        Ok(id)
    }

    /// Number of records of a kind (equals the next identifier).
    pub fn count(&self, kind: RecordKind) -> Result<u64, StoreError> {
        match self.kv.get(&KeyPrefix::count_key(kind))? {
            None => Ok(0),
            Some(bytes) => {
                let raw: [u8; 8] =
                    bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| StoreError::Corruption {
                            message: format!(
                                "{:?} counter is {} bytes, expected 8",
                                kind,
                                bytes.len()
                            ),
                        })?;
                Ok(u64::from_be_bytes(raw))
            }
        }
    }

    /// Get a record by identifier.
    pub fn get<R: Record>(&self, id: PostId) -> Result<Option<R>, StoreError> {
        self.kv
            .get(&KeyPrefix::record_key(R::KIND, id))?
            .map(|bytes| decode_record(&bytes))
            .transpose()
    }

    /// All records of a kind, in identifier order.
    pub fn all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        self.kv
            .prefix_scan(KeyPrefix::for_kind(R::KIND).as_bytes())?
            .iter()
            .map(|(_, bytes)| decode_record(bytes))
            .collect()
    }
}

fn decode_record<R: Record>(bytes: &[u8]) -> Result<R, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corruption {
        message: e.to_string(),
    })
}
