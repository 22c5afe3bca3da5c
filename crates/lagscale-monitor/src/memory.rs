//! In-memory monitor clients for tests and offline tooling.

use std::sync::Mutex;

use lagscale_core::ScalerError;

use crate::client::{ClientFuture, Datapoint, MetricQuery, MonitorClient};

/// Monitor client serving canned datapoints, recording the last query
/// so tests can assert on the window and filter.
#[derive(Debug, Default)]
pub struct StaticMonitorClient {
    datapoints: Vec<Datapoint>,
    last_query: Mutex<Option<MetricQuery>>,
}

impl StaticMonitorClient {
    pub fn new(datapoints: Vec<Datapoint>) -> Self {
        Self {
            datapoints,
            last_query: Mutex::new(None),
        }
    }

    /// The most recently issued query, if any.
    pub fn last_query(&self) -> Option<MetricQuery> {
        self.last_query.lock().expect("query slot poisoned").clone()
    }
}

impl MonitorClient for StaticMonitorClient {
    fn query<'a>(&'a self, query: &'a MetricQuery) -> ClientFuture<'a, Vec<Datapoint>> {
        Box::pin(async move {
            *self.last_query.lock().expect("query slot poisoned") = Some(query.clone());
            Ok(self.datapoints.clone())
        })
    }
}

/// Monitor client that fails every query.
#[derive(Debug)]
pub struct FailingMonitorClient {
    message: String,
}

impl FailingMonitorClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl MonitorClient for FailingMonitorClient {
    fn query<'a>(&'a self, _query: &'a MetricQuery) -> ClientFuture<'a, Vec<Datapoint>> {
        Box::pin(async move { Err(ScalerError::UpstreamUnavailable(self.message.clone())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query() -> MetricQuery {
        MetricQuery {
            namespace: "SYS.ECS".to_string(),
            metric_name: "cpu_util".to_string(),
            dimension_name: "instance_id".to_string(),
            dimension_value: "i-0123".to_string(),
            from_ms: 0,
            to_ms: 300_000,
            period: "300".to_string(),
            statistic: "average".to_string(),
        }
    }

    #[tokio::test]
    async fn static_client_serves_and_records() {
        let mut statistics = HashMap::new();
        statistics.insert("average".to_string(), 1.0);
        let client = StaticMonitorClient::new(vec![Datapoint {
            statistics,
            timestamp_ms: 0,
        }]);

        assert!(client.last_query().is_none());
        let points = client.query(&query()).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(client.last_query().unwrap().metric_name, "cpu_util");
    }

    #[tokio::test]
    async fn failing_client_surfaces_message() {
        let client = FailingMonitorClient::new("auth rejected");
        let err = client.query(&query()).await.unwrap_err();
        assert!(err.to_string().contains("auth rejected"));
    }
}
