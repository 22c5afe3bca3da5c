//! Deterministic external-metric naming.
//!
//! The control loop correlates repeated polls through the metric name,
//! so names must be stable across polls and unique across a workload's
//! triggers. The logical key (consumer group, monitored metric) is
//! normalized to the character set external metric names allow, then
//! prefixed with the trigger's position.

/// Replace every character outside `[A-Za-z0-9-]` with `-`.
pub fn normalize_metric_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

/// Prefix a logical metric key with the trigger's position, e.g.
/// `s1-eventstream-billing`.
pub fn metric_name_with_index(index: usize, name: &str) -> String {
    format!("s{index}-{name}")
}
