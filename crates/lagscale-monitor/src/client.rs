//! Monitoring-backend collaborator trait and query types.
//!
//! The adapter issues one batch query per poll: a namespace + metric +
//! dimension filter over a time window, asking the backend for one
//! aggregated statistic per period. The window is aligned to minute
//! boundaries because monitoring backends roll datapoints up per
//! minute; an unaligned window can straddle a rollup and return nothing.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use lagscale_core::ScalerResult;

/// Boxed future alias for monitor-client calls.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = ScalerResult<T>> + Send + 'a>>;

/// One windowed metric query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricQuery {
    pub namespace: String,
    pub metric_name: String,
    pub dimension_name: String,
    pub dimension_value: String,
    /// Window start, Unix milliseconds, minute-aligned.
    pub from_ms: i64,
    /// Window end, Unix milliseconds, minute-aligned.
    pub to_ms: i64,
    /// Rollup period in seconds, as the backend expects it (string).
    pub period: String,
    /// Statistic to aggregate per period, e.g. `average`.
    pub statistic: String,
}

/// One rolled-up datapoint: statistic name → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub statistics: HashMap<String, f64>,
    #[serde(default)]
    pub timestamp_ms: i64,
}

/// Read-only view of the cloud monitoring API.
///
/// Transport and backend failures are `UpstreamUnavailable`; an empty
/// result set is NOT an error here — the adapter decides what an empty
/// poll means.
pub trait MonitorClient: Send + Sync {
    fn query<'a>(&'a self, query: &'a MetricQuery) -> ClientFuture<'a, Vec<Datapoint>>;
}

/// Compute the query window: `collection_secs` ending at `now_ms`
/// truncated to the minute.
pub fn minute_aligned_window(now_ms: i64, collection_secs: i64) -> (i64, i64) {
    let to = now_ms - now_ms.rem_euclid(60_000);
    let from = to - collection_secs * 1_000;
    (from, to)
}

/// Current Unix time in milliseconds.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ends_on_a_minute_boundary() {
        // 2021-01-01 00:00:37.500 UTC.
        let now = 1_609_459_237_500;
        let (from, to) = minute_aligned_window(now, 300);
        assert_eq!(to, 1_609_459_200_000);
        assert_eq!(to % 60_000, 0);
        assert_eq!(to - from, 300_000);
    }

    #[test]
    fn aligned_input_is_unchanged() {
        let now = 1_609_459_200_000;
        let (from, to) = minute_aligned_window(now, 60);
        assert_eq!(to, now);
        assert_eq!(from, now - 60_000);
    }

    #[test]
    fn datapoint_statistics_round_trip_serde() {
        let mut statistics = HashMap::new();
        statistics.insert("average".to_string(), 17.5);
        let point = Datapoint {
            statistics,
            timestamp_ms: 1_609_459_200_000,
        };

        let json = serde_json::to_string(&point).unwrap();
        let back: Datapoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
