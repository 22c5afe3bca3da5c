//! The event-stream scaler adapter.
//!
//! Orchestrates the lag calculator across every partition of the
//! stream: list partition IDs, read each partition's runtime state and
//! checkpoint in turn, sum the unprocessed counts, then cap the total so
//! the reported lag never implies more replicas than there are
//! partitions (one worker per partition is the consumption model).

use std::sync::Arc;

use tracing::{Instrument, debug, warn};

use lagscale_core::{
    AggregatedMetric, MetricSpec, Scaler, ScalerError, ScalerFuture, epoch_secs,
    metric_name_with_index, normalize_metric_name,
};

use crate::backend::{Checkpoint, CheckpointStore, StreamBackend};
use crate::lag::unprocessed_in_partition;
use crate::metadata::EventStreamMetadata;

/// Scaler adapter over a partitioned event stream.
///
/// Holds no state across polls; each call re-reads the backends. The
/// injected clients are shared (`Arc`) so one stream connection can back
/// both this adapter and whatever tooling built it.
pub struct EventStreamScaler {
    metadata: EventStreamMetadata,
    stream: Arc<dyn StreamBackend>,
    checkpoints: Arc<dyn CheckpointStore>,
    span: tracing::Span,
}

impl EventStreamScaler {
    pub fn new(
        metadata: EventStreamMetadata,
        stream: Arc<dyn StreamBackend>,
        checkpoints: Arc<dyn CheckpointStore>,
    ) -> Self {
        let span = tracing::info_span!(
            "eventstream_scaler",
            consumer_group = %metadata.consumer_group,
            scaler_index = metadata.scaler_index,
        );
        Self {
            metadata,
            stream,
            checkpoints,
            span,
        }
    }

    pub fn metadata(&self) -> &EventStreamMetadata {
        &self.metadata
    }

    /// Unprocessed count for one partition: runtime state, then the
    /// checkpoint lookup the lag calculator needs. Returns the
    /// checkpoint too so the caller can log its offset.
    async fn partition_unprocessed(
        &self,
        partition_id: &str,
    ) -> Result<(i64, Option<Checkpoint>), ScalerError> {
        let state = self.stream.partition_state(partition_id).await?;

        // An empty partition needs no checkpoint read at all.
        if state.is_empty() {
            return Ok((0, None));
        }

        let checkpoint = self.checkpoints.checkpoint(partition_id).await?;
        let count = unprocessed_in_partition(&state, checkpoint.as_ref());

        debug!(
            partition_id = %state.partition_id,
            last_enqueued_offset = %state.last_enqueued_offset,
            checkpoint_offset = checkpoint.as_ref().map(|c| c.offset.as_str()).unwrap_or(""),
            unprocessed = count,
            "partition lag"
        );

        Ok((count, checkpoint))
    }
}

/// Cap the aggregate so it never implies scaling past the partition
/// count.
pub(crate) fn cap_to_partitions(total: i64, partition_count: i64, threshold: i64) -> i64 {
    if total / threshold > partition_count {
        partition_count * threshold
    } else {
        total
    }
}

impl Scaler for EventStreamScaler {
    fn is_active(&self) -> ScalerFuture<'_, bool> {
        Box::pin(
            async move {
                let partition_ids = self.stream.partition_ids().await?;

                for partition_id in &partition_ids {
                    let (count, _) = self.partition_unprocessed(partition_id).await?;
                    if count > 0 {
                        return Ok(true);
                    }
                }

                Ok(false)
            }
            .instrument(self.span.clone()),
        )
    }

    fn metrics(&self) -> ScalerFuture<'_, AggregatedMetric> {
        Box::pin(
            async move {
                let partition_ids = self.stream.partition_ids().await?;

                let mut total: i64 = 0;
                for partition_id in &partition_ids {
                    let (count, _) = self.partition_unprocessed(partition_id).await?;
                    total += count;
                }

                let partition_count = partition_ids.len() as i64;
                let capped = cap_to_partitions(total, partition_count, self.metadata.threshold);

                debug!(
                    total_unprocessed = total,
                    capped,
                    partition_count,
                    "aggregated stream lag"
                );

                Ok(AggregatedMetric {
                    name: self.metric_spec().name,
                    value: capped,
                    epoch: epoch_secs(),
                })
            }
            .instrument(self.span.clone()),
        )
    }

    fn metric_spec(&self) -> MetricSpec {
        let key = normalize_metric_name(&format!(
            "eventstream-{}",
            self.metadata.consumer_group
        ));
        MetricSpec {
            name: metric_name_with_index(self.metadata.scaler_index, &key),
            target: self.metadata.threshold,
        }
    }

    fn close(&self) -> ScalerFuture<'_, ()> {
        Box::pin(
            async move {
                if let Err(e) = self.stream.close().await {
                    warn!(error = %e, "error closing stream backend");
                    return Err(e);
                }
                Ok(())
            }
            .instrument(self.span.clone()),
        )
    }
}
