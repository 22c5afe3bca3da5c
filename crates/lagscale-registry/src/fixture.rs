//! Fixture-file-backed backends for offline polls and tests.
//!
//! A snapshot file is a JSON document describing the upstream state one
//! poll would observe:
//!
//! ```json
//! {
//!   "partitions": [
//!     { "partition_id": "0", "beginning_sequence": 0,
//!       "last_sequence": 10, "last_enqueued_offset": "2048" }
//!   ],
//!   "checkpoints": {
//!     "0": { "offset": "1024", "sequence_number": 4 }
//!   },
//!   "datapoints": [
//!     { "statistics": { "average": 42.5 } }
//!   ]
//! }
//! ```
//!
//! All sections are optional; an adapter only reads the section its
//! backend serves.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lagscale_core::{ScalerError, ScalerResult};
use lagscale_eventstream::memory::{MemoryCheckpointStore, StaticStreamBackend};
use lagscale_eventstream::{Checkpoint, CheckpointStore, EventStreamMetadata, PartitionState, StreamBackend};
use lagscale_monitor::memory::StaticMonitorClient;
use lagscale_monitor::{Datapoint, MonitorClient, MonitorMetadata};

use crate::BackendFactory;

/// One snapshot of upstream state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSnapshot {
    #[serde(default)]
    pub partitions: Vec<PartitionState>,
    #[serde(default)]
    pub checkpoints: HashMap<String, Checkpoint>,
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

impl FixtureSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &Path) -> ScalerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScalerError::InvalidConfiguration(format!(
                "cannot read fixture {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ScalerError::InvalidConfiguration(format!(
                "malformed fixture {}: {e}",
                path.display()
            ))
        })
    }
}

/// [`BackendFactory`] over a fixture snapshot.
#[derive(Debug, Clone, Default)]
pub struct FixtureBackends {
    snapshot: FixtureSnapshot,
}

impl FixtureBackends {
    pub fn new(snapshot: FixtureSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_file(path: &Path) -> ScalerResult<Self> {
        Ok(Self::new(FixtureSnapshot::from_file(path)?))
    }
}

impl BackendFactory for FixtureBackends {
    fn stream_backends(
        &self,
        _metadata: &EventStreamMetadata,
    ) -> ScalerResult<(Arc<dyn StreamBackend>, Arc<dyn CheckpointStore>)> {
        let stream = StaticStreamBackend::new(self.snapshot.partitions.clone());
        let checkpoints = MemoryCheckpointStore::new(self.snapshot.checkpoints.clone());
        Ok((Arc::new(stream), Arc::new(checkpoints)))
    }

    fn monitor_client(&self, _metadata: &MonitorMetadata) -> ScalerResult<Arc<dyn MonitorClient>> {
        Ok(Arc::new(StaticMonitorClient::new(
            self.snapshot.datapoints.clone(),
        )))
    }
}
