//! Backend collaborator traits and their wire types.
//!
//! The scaler needs two read-only views it does not implement itself:
//! the stream-management API that describes partition runtime state, and
//! the durable checkpoint store the consumer group writes to. Both are
//! injected at construction as trait objects, so the adapter never
//! depends on a concrete client and tests can swap in the in-memory
//! versions from [`crate::memory`].

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use lagscale_core::ScalerResult;

/// Boxed future alias for backend calls.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = ScalerResult<T>> + Send + 'a>>;

/// Offset sentinel the stream backend reports for a partition that has
/// never received an item.
pub const EMPTY_PARTITION_OFFSET: &str = "-1";

/// Runtime state of one partition, read fresh on every poll and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionState {
    pub partition_id: String,
    /// Sequence number of the oldest retained item.
    pub beginning_sequence: i64,
    /// Sequence number of the newest enqueued item.
    pub last_sequence: i64,
    /// Offset of the newest enqueued item, or
    /// [`EMPTY_PARTITION_OFFSET`] if there has never been one.
    pub last_enqueued_offset: String,
}

impl PartitionState {
    /// Whether the backend reports this partition as never written.
    pub fn is_empty(&self) -> bool {
        self.last_enqueued_offset == EMPTY_PARTITION_OFFSET
    }
}

/// Durable consumer position within one partition.
///
/// A record whose `offset` is the empty string exists but has never been
/// committed to. That is distinct from the store having no record at
/// all, which [`CheckpointStore::checkpoint`] reports as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub offset: String,
    pub sequence_number: i64,
}

/// Read-only view of the stream-management API.
///
/// Failures are `UpstreamUnavailable`. Implementations must be safe for
/// concurrent use: the scaler takes `&self` on every call and may be
/// polled concurrently by the control loop.
pub trait StreamBackend: Send + Sync {
    /// IDs of all partitions, in backend order. The order is not
    /// required to be stable across polls.
    fn partition_ids(&self) -> BackendFuture<'_, Vec<String>>;

    /// Current runtime state of one partition.
    fn partition_state<'a>(&'a self, partition_id: &'a str) -> BackendFuture<'a, PartitionState>;

    /// Release the underlying connection.
    fn close(&self) -> BackendFuture<'_, ()>;
}

/// Read-only view of the checkpoint store.
pub trait CheckpointStore: Send + Sync {
    /// Last durably recorded position for one partition.
    ///
    /// `Ok(None)` means the store has no record for it (missing
    /// container or blob) — a recognized degraded state the lag
    /// calculator handles, not an error. Transient store failures are
    /// `Err(UpstreamUnavailable)`.
    fn checkpoint<'a>(&'a self, partition_id: &'a str) -> BackendFuture<'a, Option<Checkpoint>>;
}
