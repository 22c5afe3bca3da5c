//! lagscale-monitor — scaler adapter for a cloud monitoring API.
//!
//! The second, simpler variant of the scaler contract: one windowed
//! query per poll against a monitoring backend, one statistic extracted
//! from the first returned datapoint, compared against a configured
//! target and activation floor. No partitions, no checkpoints.
//!
//! A poll that comes back without a usable datapoint is a hard
//! `MetricUnavailable` failure, never a silent zero — zero would mask
//! real demand as idle.

pub mod client;
pub mod memory;
pub mod metadata;
pub mod scaler;

pub use client::{ClientFuture, Datapoint, MetricQuery, MonitorClient, minute_aligned_window};
pub use metadata::{MonitorCredentials, MonitorMetadata};
pub use scaler::CloudMonitorScaler;
