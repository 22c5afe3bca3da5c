//! The cloud-monitoring scaler adapter.

use std::sync::Arc;

use tracing::{Instrument, debug};

use lagscale_core::{
    AggregatedMetric, MetricSpec, Scaler, ScalerError, ScalerFuture, ScalerResult, epoch_secs,
    metric_name_with_index, normalize_metric_name,
};

use crate::client::{MetricQuery, MonitorClient, minute_aligned_window, now_ms};
use crate::metadata::MonitorMetadata;

/// Scaler adapter over a windowed cloud-monitoring query.
///
/// Each poll issues one query covering the configured collection window
/// and reads the configured statistic from the first datapoint. The
/// client holds no connection, so `close` is a no-op.
pub struct CloudMonitorScaler {
    metadata: MonitorMetadata,
    client: Arc<dyn MonitorClient>,
    span: tracing::Span,
}

impl CloudMonitorScaler {
    pub fn new(metadata: MonitorMetadata, client: Arc<dyn MonitorClient>) -> Self {
        let span = tracing::info_span!(
            "cloud_monitor_scaler",
            namespace = %metadata.namespace,
            metric = %metadata.metric_name,
            scaler_index = metadata.scaler_index,
        );
        Self {
            metadata,
            client,
            span,
        }
    }

    pub fn metadata(&self) -> &MonitorMetadata {
        &self.metadata
    }

    fn query(&self) -> MetricQuery {
        let (from_ms, to_ms) = minute_aligned_window(now_ms(), self.metadata.collection_secs);
        MetricQuery {
            namespace: self.metadata.namespace.clone(),
            metric_name: self.metadata.metric_name.clone(),
            dimension_name: self.metadata.dimension_name.clone(),
            dimension_value: self.metadata.dimension_value.clone(),
            from_ms,
            to_ms,
            period: self.metadata.period.clone(),
            statistic: self.metadata.statistic.clone(),
        }
    }

    /// Poll the backend and extract the configured statistic.
    async fn fetch_value(&self) -> ScalerResult<f64> {
        let query = self.query();
        let datapoints = self.client.query(&query).await?;

        let Some(point) = datapoints.first() else {
            return Err(ScalerError::MetricUnavailable(format!(
                "no datapoints for {} in the last {}s",
                self.metadata.metric_name, self.metadata.collection_secs
            )));
        };

        let Some(value) = point.statistics.get(&self.metadata.statistic).copied() else {
            return Err(ScalerError::MetricUnavailable(format!(
                "statistic {} missing from datapoint",
                self.metadata.statistic
            )));
        };

        if !value.is_finite() {
            return Err(ScalerError::MetricUnavailable(format!(
                "statistic {} is not a finite number: {value}",
                self.metadata.statistic
            )));
        }

        debug!(value, statistic = %self.metadata.statistic, "monitor statistic");
        Ok(value)
    }
}

impl Scaler for CloudMonitorScaler {
    fn is_active(&self) -> ScalerFuture<'_, bool> {
        Box::pin(
            async move {
                let value = self.fetch_value().await?;
                Ok(value > self.metadata.min_value)
            }
            .instrument(self.span.clone()),
        )
    }

    fn metrics(&self) -> ScalerFuture<'_, AggregatedMetric> {
        Box::pin(
            async move {
                let value = self.fetch_value().await?;
                Ok(AggregatedMetric {
                    name: self.metric_spec().name,
                    value: value as i64,
                    epoch: epoch_secs(),
                })
            }
            .instrument(self.span.clone()),
        )
    }

    fn metric_spec(&self) -> MetricSpec {
        let key = normalize_metric_name(&format!(
            "cloud-monitor-{}",
            self.metadata.metric_name
        ));
        MetricSpec {
            name: metric_name_with_index(self.metadata.scaler_index, &key),
            target: self.metadata.target_value as i64,
        }
    }

    fn close(&self) -> ScalerFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
