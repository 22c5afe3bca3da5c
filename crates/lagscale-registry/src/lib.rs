//! lagscale-registry — from trigger configuration to a running adapter.
//!
//! The control loop hands a resolved [`ScalerConfig`] to
//! [`build_scaler`] and gets back a boxed [`Scaler`]. The trigger type
//! is a closed set ([`TriggerKind`]); the external clients each adapter
//! needs come from an injected [`BackendFactory`], so the registry
//! never links a concrete network client and tests run against
//! in-memory backends.

pub mod fixture;

use std::sync::Arc;

use lagscale_core::{Scaler, ScalerConfig, ScalerError, ScalerResult};
use lagscale_eventstream::{CheckpointStore, EventStreamMetadata, EventStreamScaler, StreamBackend};
use lagscale_monitor::{CloudMonitorScaler, MonitorClient, MonitorMetadata};

pub use fixture::{FixtureBackends, FixtureSnapshot};

/// The closed set of trigger types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    EventStream,
    CloudMonitor,
}

impl TriggerKind {
    /// Parse a trigger-type string. Unknown types are
    /// `InvalidConfiguration` — the set is closed on purpose, so a typo
    /// in a trigger definition fails loudly at build time.
    pub fn parse(trigger_type: &str) -> ScalerResult<Self> {
        match trigger_type {
            "eventstream" => Ok(TriggerKind::EventStream),
            "cloud-monitor" => Ok(TriggerKind::CloudMonitor),
            other => Err(ScalerError::InvalidConfiguration(format!(
                "unknown trigger type {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::EventStream => "eventstream",
            TriggerKind::CloudMonitor => "cloud-monitor",
        }
    }
}

/// Supplies the external clients adapters are built around.
///
/// Real deployments wrap their stream-management, checkpoint-store,
/// and monitoring clients; tests and offline tooling use
/// [`FixtureBackends`]. The factory sees the validated metadata, not
/// the raw config, so connection resolution happens exactly once.
pub trait BackendFactory: Send + Sync {
    fn stream_backends(
        &self,
        metadata: &EventStreamMetadata,
    ) -> ScalerResult<(Arc<dyn StreamBackend>, Arc<dyn CheckpointStore>)>;

    fn monitor_client(&self, metadata: &MonitorMetadata) -> ScalerResult<Arc<dyn MonitorClient>>;
}

/// Build the adapter for one trigger.
///
/// Metadata is parsed and validated before the factory is asked for
/// clients, so a misconfigured trigger never opens a connection.
pub fn build_scaler(
    config: &ScalerConfig,
    factory: &dyn BackendFactory,
) -> ScalerResult<Box<dyn Scaler>> {
    match TriggerKind::parse(&config.trigger_type)? {
        TriggerKind::EventStream => {
            let metadata = EventStreamMetadata::parse(config)?;
            let (stream, checkpoints) = factory.stream_backends(&metadata)?;
            Ok(Box::new(EventStreamScaler::new(metadata, stream, checkpoints)))
        }
        TriggerKind::CloudMonitor => {
            let metadata = MonitorMetadata::parse(config)?;
            let client = factory.monitor_client(&metadata)?;
            Ok(Box::new(CloudMonitorScaler::new(metadata, client)))
        }
    }
}
