//! Trigger definition files.
//!
//! A trigger file is the TOML rendition of what the control loop would
//! resolve from its own trigger objects:
//!
//! ```toml
//! [trigger]
//! type = "eventstream"
//! index = 0
//! identity = "none"
//!
//! [trigger.metadata]
//! consumerGroup = "billing"
//!
//! [trigger.auth]
//! connection = "amqp://stream-broker/orders"
//! storageConnection = "blob://checkpoints"
//!
//! [trigger.env]
//! STREAM_CONN = "amqp://from-env"
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use lagscale_core::{IdentityProvider, ScalerConfig};

#[derive(Debug, Deserialize)]
struct TriggerFile {
    trigger: TriggerSection,
}

#[derive(Debug, Deserialize)]
struct TriggerSection {
    #[serde(rename = "type")]
    trigger_type: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    identity: IdentityProvider,
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    auth: HashMap<String, String>,
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Load a trigger file into the config shape adapters are built from.
pub fn load(path: &Path) -> anyhow::Result<ScalerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read trigger file {}", path.display()))?;
    let file: TriggerFile = toml::from_str(&content)
        .with_context(|| format!("malformed trigger file {}", path.display()))?;

    Ok(ScalerConfig {
        trigger_type: file.trigger.trigger_type,
        trigger_metadata: file.trigger.metadata,
        resolved_env: file.trigger.env,
        auth_params: file.trigger.auth,
        identity_provider: file.trigger.identity,
        scaler_index: file.trigger.index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn full_trigger_file_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[trigger]
type = "eventstream"
index = 2
identity = "workload"

[trigger.metadata]
consumerGroup = "billing"
streamNamespace = "prod-events"
streamName = "orders"

[trigger.auth]
storageConnection = "blob://checkpoints"

[trigger.env]
STREAM_CONN = "amqp://from-env"
"#
        )
        .unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.trigger_type, "eventstream");
        assert_eq!(config.scaler_index, 2);
        assert_eq!(config.identity_provider, IdentityProvider::Workload);
        assert_eq!(config.metadata("consumerGroup"), Some("billing"));
        assert_eq!(config.resolve_secret("storageConnection"), Some("blob://checkpoints"));
        assert_eq!(config.resolved_env["STREAM_CONN"], "amqp://from-env");
    }

    #[test]
    fn sections_other_than_type_are_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[trigger]\ntype = \"cloud-monitor\"\n").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.trigger_type, "cloud-monitor");
        assert_eq!(config.scaler_index, 0);
        assert_eq!(config.identity_provider, IdentityProvider::None);
        assert!(config.trigger_metadata.is_empty());
    }

    #[test]
    fn missing_type_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[trigger]\nindex = 1\n").unwrap();
        assert!(load(file.path()).is_err());
    }
}
