//! Trigger configuration handed to adapter constructors.
//!
//! The control loop resolves a trigger definition into a [`ScalerConfig`]
//! before building a scaler: raw metadata key/value pairs, secrets from
//! the trigger's authentication reference, and the environment visible to
//! the scaled workload. Adapters validate everything they need from it at
//! construction; a missing required value is an
//! [`InvalidConfiguration`](crate::ScalerError::InvalidConfiguration)
//! there, never a runtime failure.
//!
//! Two lookup chains mirror how trigger definitions reference values:
//!
//! - secrets: `auth_params[key]`, else metadata key `{key}FromEnv` naming
//!   an environment variable to read.
//! - plain values: `trigger_metadata[key]`, with the same `FromEnv`
//!   indirection as a fallback.
//!
//! Empty strings count as absent in both chains.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScalerError, ScalerResult};

/// How an adapter obtains credentials for its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProvider {
    /// Connection-string style credentials resolved from auth params or
    /// the environment. Default.
    #[default]
    None,
    /// Ambient workload identity; the trigger names the backend by
    /// coordinates (namespace + name) instead of a connection string.
    Workload,
}

/// Resolved trigger configuration for one scaler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalerConfig {
    /// Trigger type, e.g. `eventstream` or `cloud-monitor`.
    pub trigger_type: String,
    /// Raw trigger metadata.
    pub trigger_metadata: HashMap<String, String>,
    /// Environment of the scaled workload, for `FromEnv` indirection.
    pub resolved_env: HashMap<String, String>,
    /// Secrets from the trigger's authentication reference.
    pub auth_params: HashMap<String, String>,
    /// Credential mode.
    pub identity_provider: IdentityProvider,
    /// Position of this trigger among the workload's triggers; baked
    /// into every metric name so concurrent triggers stay distinct.
    pub scaler_index: usize,
}

impl ScalerConfig {
    /// Metadata value for `key`, if present and non-empty.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.trigger_metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Metadata value parsed as `T`. A missing key is `Ok(None)`; a
    /// malformed value is an error naming the key.
    pub fn metadata_parsed<T>(&self, key: &str) -> ScalerResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.metadata(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
                ScalerError::InvalidConfiguration(format!("malformed {key} value {raw:?}: {e}"))
            }),
        }
    }

    /// Resolve a secret: auth params first, then `{key}FromEnv`
    /// indirection through the resolved environment.
    pub fn resolve_secret(&self, key: &str) -> Option<&str> {
        if let Some(v) = self.auth_params.get(key).filter(|v| !v.is_empty()) {
            return Some(v);
        }
        self.env_indirect(key)
    }

    /// Plain metadata value with `FromEnv` indirection as a fallback.
    pub fn metadata_or_env(&self, key: &str) -> Option<&str> {
        if let Some(v) = self.metadata(key) {
            return Some(v);
        }
        self.env_indirect(key)
    }

    fn env_indirect(&self, key: &str) -> Option<&str> {
        let env_key = self.metadata(&format!("{key}FromEnv"))?;
        self.resolved_env
            .get(env_key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
