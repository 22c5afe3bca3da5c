//! Event-stream trigger metadata.
//!
//! Everything the adapter needs is validated here, once, at
//! construction. A trigger that cannot name its stream, its checkpoint
//! store, or a positive threshold never produces an adapter; the control
//! loop sees `InvalidConfiguration` instead of runtime surprises.

use lagscale_core::{IdentityProvider, ScalerConfig, ScalerError, ScalerResult};

/// Per-partition lag the control loop targets per replica.
pub const DEFAULT_UNPROCESSED_THRESHOLD: i64 = 64;
/// Consumer group assumed when the trigger names none.
pub const DEFAULT_CONSUMER_GROUP: &str = "$Default";

const THRESHOLD_KEY: &str = "unprocessedItemThreshold";

/// How the stream-management backend is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamLocator {
    /// Full connection string with embedded credentials.
    ConnectionString(String),
    /// Ambient workload identity; the stream is named by coordinates.
    Workload { namespace: String, name: String },
}

/// Validated, immutable configuration for one event-stream scaler.
#[derive(Debug, Clone)]
pub struct EventStreamMetadata {
    pub locator: StreamLocator,
    /// Connection for the checkpoint store.
    pub storage_connection: String,
    pub consumer_group: String,
    /// Container holding the consumer group's checkpoints; empty means
    /// the store client's default layout.
    pub checkpoint_container: String,
    /// Per-partition unprocessed-item target. Always > 0.
    pub threshold: i64,
    pub scaler_index: usize,
}

impl EventStreamMetadata {
    /// Parse and validate trigger configuration.
    pub fn parse(config: &ScalerConfig) -> ScalerResult<Self> {
        let threshold = config
            .metadata_parsed::<i64>(THRESHOLD_KEY)?
            .unwrap_or(DEFAULT_UNPROCESSED_THRESHOLD);
        if threshold <= 0 {
            return Err(ScalerError::InvalidConfiguration(format!(
                "{THRESHOLD_KEY} must be positive, got {threshold}"
            )));
        }

        let storage_connection = config
            .resolve_secret("storageConnection")
            .ok_or_else(|| {
                ScalerError::InvalidConfiguration("no storage connection string given".to_string())
            })?
            .to_string();

        let consumer_group = config
            .metadata("consumerGroup")
            .unwrap_or(DEFAULT_CONSUMER_GROUP)
            .to_string();

        let checkpoint_container = config
            .metadata("checkpointContainer")
            .unwrap_or_default()
            .to_string();

        let locator = match config.identity_provider {
            IdentityProvider::None => {
                let connection = config.resolve_secret("connection").ok_or_else(|| {
                    ScalerError::InvalidConfiguration(
                        "no stream connection string given".to_string(),
                    )
                })?;
                StreamLocator::ConnectionString(connection.to_string())
            }
            IdentityProvider::Workload => {
                let namespace = config.metadata_or_env("streamNamespace").ok_or_else(|| {
                    ScalerError::InvalidConfiguration("no stream namespace given".to_string())
                })?;
                let name = config.metadata_or_env("streamName").ok_or_else(|| {
                    ScalerError::InvalidConfiguration("no stream name given".to_string())
                })?;
                StreamLocator::Workload {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                }
            }
        };

        Ok(Self {
            locator,
            storage_connection,
            consumer_group,
            checkpoint_container,
            threshold,
            scaler_index: config.scaler_index,
        })
    }
}
