//! In-memory backends for tests and offline tooling.
//!
//! [`StaticStreamBackend`] and [`MemoryCheckpointStore`] serve a fixed
//! snapshot; [`FailingStreamBackend`] and [`FailingCheckpointStore`]
//! surface `UpstreamUnavailable` on every call, for exercising the
//! adapter's failure paths.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use lagscale_core::ScalerError;

use crate::backend::{BackendFuture, Checkpoint, CheckpointStore, PartitionState, StreamBackend};

/// Stream backend over a fixed partition snapshot.
#[derive(Debug, Default)]
pub struct StaticStreamBackend {
    partitions: Vec<PartitionState>,
    closed: AtomicUsize,
}

impl StaticStreamBackend {
    pub fn new(partitions: Vec<PartitionState>) -> Self {
        Self {
            partitions,
            closed: AtomicUsize::new(0),
        }
    }

    /// How many times `close` has been called.
    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::Relaxed)
    }
}

impl StreamBackend for StaticStreamBackend {
    fn partition_ids(&self) -> BackendFuture<'_, Vec<String>> {
        Box::pin(async move {
            Ok(self
                .partitions
                .iter()
                .map(|p| p.partition_id.clone())
                .collect())
        })
    }

    fn partition_state<'a>(&'a self, partition_id: &'a str) -> BackendFuture<'a, PartitionState> {
        Box::pin(async move {
            self.partitions
                .iter()
                .find(|p| p.partition_id == partition_id)
                .cloned()
                .ok_or_else(|| {
                    ScalerError::UpstreamUnavailable(format!("unknown partition {partition_id}"))
                })
        })
    }

    fn close(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            self.closed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
    }
}

/// Stream backend that fails every call.
#[derive(Debug)]
pub struct FailingStreamBackend {
    message: String,
}

impl FailingStreamBackend {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> ScalerError {
        ScalerError::UpstreamUnavailable(self.message.clone())
    }
}

impl StreamBackend for FailingStreamBackend {
    fn partition_ids(&self) -> BackendFuture<'_, Vec<String>> {
        Box::pin(async move { Err(self.error()) })
    }

    fn partition_state<'a>(&'a self, _partition_id: &'a str) -> BackendFuture<'a, PartitionState> {
        Box::pin(async move { Err(self.error()) })
    }

    fn close(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move { Err(self.error()) })
    }
}

/// Checkpoint store over a mutable in-memory map.
///
/// Partitions without an entry report `Ok(None)`, the same degraded
/// state a real store reports for a missing blob or container.
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    checkpoints: Mutex<HashMap<String, Checkpoint>>,
}

impl MemoryCheckpointStore {
    pub fn new(checkpoints: HashMap<String, Checkpoint>) -> Self {
        Self {
            checkpoints: Mutex::new(checkpoints),
        }
    }

    /// Record a checkpoint, as a consumer commit would.
    pub fn put(&self, partition_id: &str, checkpoint: Checkpoint) {
        self.checkpoints
            .lock()
            .expect("checkpoint map poisoned")
            .insert(partition_id.to_string(), checkpoint);
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn checkpoint<'a>(&'a self, partition_id: &'a str) -> BackendFuture<'a, Option<Checkpoint>> {
        Box::pin(async move {
            Ok(self
                .checkpoints
                .lock()
                .expect("checkpoint map poisoned")
                .get(partition_id)
                .cloned())
        })
    }
}

/// Checkpoint store that fails every lookup.
#[derive(Debug)]
pub struct FailingCheckpointStore {
    message: String,
}

impl FailingCheckpointStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl CheckpointStore for FailingCheckpointStore {
    fn checkpoint<'a>(&'a self, _partition_id: &'a str) -> BackendFuture<'a, Option<Checkpoint>> {
        Box::pin(async move { Err(ScalerError::UpstreamUnavailable(self.message.clone())) })
    }
}
