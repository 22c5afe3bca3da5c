//! The uniform adapter contract.
//!
//! Every metric source implements [`Scaler`]. The trait is
//! dyn-compatible: poll operations return boxed `Send` futures so the
//! control loop can hold a heterogeneous set of `Box<dyn Scaler>` and
//! poll them identically.
//!
//! # Cancellation
//!
//! Poll futures perform a bounded sequence of backend round-trips and
//! hold no state across polls. Callers cancel by dropping the future or
//! wrapping it in `tokio::time::timeout`; an aborted poll leaves the
//! adapter ready for the next one. Adapters never retry internally — a
//! single upstream failure surfaces immediately.
//!
//! # Concurrency
//!
//! Methods take `&self`. Concurrent polls of one adapter are safe
//! because backends are required to be `Send + Sync`; serializing polls
//! per adapter is still the control loop's choice, not a contract
//! requirement.

use std::future::Future;
use std::pin::Pin;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ScalerResult;

/// Boxed future alias for scaler poll results.
pub type ScalerFuture<'a, T> = Pin<Box<dyn Future<Output = ScalerResult<T>> + Send + 'a>>;

/// One aggregated metric reading, produced per poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedMetric {
    /// Metric name, identical to the one declared by
    /// [`Scaler::metric_spec`].
    pub name: String,
    /// Aggregated value. Never negative.
    pub value: i64,
    /// Unix timestamp (seconds) when the value was computed.
    pub epoch: u64,
}

/// The external metric a scaler emits, consumed when the control loop
/// registers scalable targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Stable name, unique per (scaler index, logical metric key).
    pub name: String,
    /// Desired steady-state value per replica; the control loop divides
    /// the aggregated value by this to size replicas.
    pub target: i64,
}

/// The four-operation contract between the control loop and a metric
/// source.
pub trait Scaler: Send + Sync {
    /// Whether the backend shows any demand at all. Used to decide
    /// activation from zero replicas, ahead of exact metric math.
    fn is_active(&self) -> ScalerFuture<'_, bool>;

    /// Poll the backend and compute this cycle's aggregated metric.
    fn metrics(&self) -> ScalerFuture<'_, AggregatedMetric>;

    /// Declare the metric this scaler emits. Pure metadata, no I/O.
    fn metric_spec(&self) -> MetricSpec;

    /// Release backend resources. Failures are logged by the adapter and
    /// returned, but the adapter is being torn down regardless, so
    /// callers treat them as best-effort.
    fn close(&self) -> ScalerFuture<'_, ()>;
}

impl std::fmt::Debug for dyn Scaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scaler")
            .field("metric", &self.metric_spec().name)
            .finish()
    }
}

/// Current Unix time in seconds.
pub fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
