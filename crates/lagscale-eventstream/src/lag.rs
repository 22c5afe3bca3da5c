//! Unprocessed-item count for a single partition.
//!
//! Pure functions over one partition snapshot and one (possibly absent)
//! checkpoint. The scaler feeds these per partition and aggregates; all
//! the edge cases of the estimate live here:
//!
//! 1. a partition that never received an item reports zero regardless of
//!    any checkpoint;
//! 2. no checkpoint at all falls back to a degraded estimate over the
//!    retained window;
//! 3. a checkpoint record that exists but was never committed to counts
//!    the whole partition;
//! 4. the normal case is the plain difference of sequence numbers;
//! 5. a checkpoint numerically ahead of the partition snapshot goes
//!    through the wraparound formula for the fixed-width sequence
//!    counter, clamped at zero for the stale-snapshot case.

use crate::backend::{Checkpoint, PartitionState};

/// Count of items enqueued to `partition` but not yet covered by
/// `checkpoint`.
///
/// The runtime snapshot and the checkpoint are not read atomically, so
/// the checkpoint may legitimately be ahead of the snapshot; the result
/// is clamped to zero rather than reporting phantom lag.
pub fn unprocessed_in_partition(
    partition: &PartitionState,
    checkpoint: Option<&Checkpoint>,
) -> i64 {
    if partition.is_empty() {
        return 0;
    }

    let Some(checkpoint) = checkpoint else {
        return unprocessed_without_checkpoint(partition);
    };

    // An uncommitted checkpoint record: sequence numbers are zero-based,
    // so the very first item makes last_sequence 0 and the whole
    // partition holds last_sequence + 1 items.
    if checkpoint.offset.is_empty() {
        return partition.last_sequence + 1;
    }

    if partition.last_sequence >= checkpoint.sequence_number {
        return partition.last_sequence - checkpoint.sequence_number;
    }

    // The sequence counter is fixed-width and wraps past i64::MAX back
    // to a small value, which is how a committed checkpoint can sit
    // numerically ahead of the partition snapshot. The same shape also
    // appears when the snapshot is merely stale relative to a checkpoint
    // that advanced after the read, e.g. last_sequence = 10 against
    // sequence_number = 11; the formula then wraps negative and a
    // negative count means nothing is unprocessed.
    let count = i64::MAX
        .wrapping_sub(partition.last_sequence)
        .wrapping_add(checkpoint.sequence_number);
    count.max(0)
}

/// Degraded estimate used when the checkpoint store has no record for
/// the partition.
///
/// With no reference point for "processed", the retained window stands
/// in for the backlog. The exception is a partition whose oldest
/// retained item is not the first ever published and which has not
/// grown since the retention window's anchor: that reports zero. This
/// is an approximation, not exact lag — items from before the anchor
/// may never have been processed.
pub fn unprocessed_without_checkpoint(partition: &PartitionState) -> i64 {
    // beginning == last == 0 is exactly one item: the first after init.
    if (partition.beginning_sequence == 0 && partition.last_sequence == 0)
        || partition.beginning_sequence != partition.last_sequence
    {
        return (partition.last_sequence - partition.beginning_sequence) + 1;
    }

    0
}
