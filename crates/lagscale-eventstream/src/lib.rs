//! lagscale-eventstream — scaler adapter for partitioned event streams.
//!
//! Derives scaling demand from consumer lag: the count of items enqueued
//! to a stream's partitions but not yet reflected by the consumer
//! group's durable checkpoints.
//!
//! # Data flow per poll
//!
//! ```text
//! control loop
//!   │  is_active() / metrics()
//!   ▼
//! EventStreamScaler
//!   ├── StreamBackend.partition_ids()
//!   ├── per partition:
//!   │     ├── StreamBackend.partition_state(id)
//!   │     ├── CheckpointStore.checkpoint(id)
//!   │     └── lag::unprocessed_in_partition(state, checkpoint)
//!   ├── sum, then cap at partition_count × threshold
//!   ▼
//! AggregatedMetric
//! ```
//!
//! The lag calculator handles four cases in priority order: a partition
//! that never received an item, a missing checkpoint (degraded estimate
//! from the retained window), an uncommitted checkpoint record, and the
//! normal difference — including the wraparound of the fixed-width
//! sequence counter, where a stale partition snapshot behind an advanced
//! checkpoint clamps to zero instead of reporting phantom lag.
//!
//! Backends are injected traits; real deployments wrap their
//! stream-management and checkpoint-store clients, tests and offline
//! tooling use [`memory`].

pub mod backend;
pub mod lag;
pub mod memory;
pub mod metadata;
pub mod scaler;

pub use backend::{
    BackendFuture, Checkpoint, CheckpointStore, EMPTY_PARTITION_OFFSET, PartitionState,
    StreamBackend,
};
pub use metadata::{EventStreamMetadata, StreamLocator};
pub use scaler::EventStreamScaler;
