//! lagscale-core — the uniform scaler contract.
//!
//! A *scaler* is a metric-source adapter: it polls one external backend
//! (a partitioned event stream, a cloud monitoring API) and reports a
//! single aggregated metric that an autoscaling control loop sizes
//! replicas against. This crate defines the contract every adapter
//! implements plus the pieces all of them share:
//!
//! - **[`Scaler`]** — the four-operation adapter trait (activity probe,
//!   metric poll, metric-spec declaration, resource release). The control
//!   loop depends only on `dyn Scaler`, never on concrete adapters.
//! - **[`ScalerConfig`]** — trigger configuration resolved by the control
//!   loop before construction: metadata, auth secrets, environment
//!   indirection, identity mode, scaler index.
//! - **[`ScalerError`]** — the error taxonomy shared by adapters and
//!   their backend collaborators.
//! - **metric naming** — deterministic `s{index}-…` external metric
//!   names so repeated polls correlate to the same logical series.
//!
//! Concrete adapters live in `lagscale-eventstream` and
//! `lagscale-monitor`; `lagscale-registry` builds them from a
//! [`ScalerConfig`].

pub mod config;
pub mod error;
pub mod naming;
pub mod scaler;

pub use config::{IdentityProvider, ScalerConfig};
pub use error::{ScalerError, ScalerResult};
pub use naming::{metric_name_with_index, normalize_metric_name};
pub use scaler::{AggregatedMetric, MetricSpec, Scaler, ScalerFuture, epoch_secs};
