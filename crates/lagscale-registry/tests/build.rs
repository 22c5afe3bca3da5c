//! Trigger configuration to adapter, end to end through the registry.

use std::collections::HashMap;
use std::io::Write;

use lagscale_core::{IdentityProvider, Scaler, ScalerConfig, ScalerError};
use lagscale_registry::{FixtureBackends, FixtureSnapshot, build_scaler};

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn eventstream_config() -> ScalerConfig {
    ScalerConfig {
        trigger_type: "eventstream".to_string(),
        trigger_metadata: to_map(&[("consumerGroup", "billing")]),
        resolved_env: HashMap::new(),
        auth_params: to_map(&[
            ("connection", "amqp://stream-broker/orders"),
            ("storageConnection", "blob://checkpoints"),
        ]),
        identity_provider: IdentityProvider::None,
        scaler_index: 0,
    }
}

fn monitor_config() -> ScalerConfig {
    ScalerConfig {
        trigger_type: "cloud-monitor".to_string(),
        trigger_metadata: to_map(&[
            ("namespace", "SYS.ECS"),
            ("metricName", "cpu_util"),
            ("dimensionName", "instance_id"),
            ("dimensionValue", "i-0123"),
            ("targetMetricValue", "50"),
            ("minMetricValue", "5"),
        ]),
        resolved_env: HashMap::new(),
        auth_params: to_map(&[
            ("identityEndpoint", "https://iam.example/v3"),
            ("projectId", "p-1"),
            ("domainId", "d-1"),
            ("region", "eu-1"),
            ("domain", "monitor.example"),
            ("accessKey", "AK"),
            ("secretKey", "SK"),
        ]),
        identity_provider: IdentityProvider::None,
        scaler_index: 1,
    }
}

const FIXTURE: &str = r#"{
    "partitions": [
        { "partition_id": "0", "beginning_sequence": 0,
          "last_sequence": 0, "last_enqueued_offset": "0" },
        { "partition_id": "1", "beginning_sequence": 0,
          "last_sequence": 5, "last_enqueued_offset": "800" }
    ],
    "checkpoints": {
        "1": { "offset": "800", "sequence_number": 5 }
    },
    "datapoints": [
        { "statistics": { "average": 42.5 } }
    ]
}"#;

fn fixture() -> FixtureBackends {
    FixtureBackends::new(serde_json::from_str::<FixtureSnapshot>(FIXTURE).unwrap())
}

#[tokio::test]
async fn eventstream_trigger_polls_the_fixture() {
    let scaler = build_scaler(&eventstream_config(), &fixture()).unwrap();

    // Partition 0 has no checkpoint and exactly one message; partition 1
    // is caught up.
    let metric = scaler.metrics().await.unwrap();
    assert_eq!(metric.value, 1);
    assert!(scaler.is_active().await.unwrap());

    let spec = scaler.metric_spec();
    assert_eq!(spec.name, "s0-eventstream-billing");
    assert_eq!(spec.target, 64);
}

#[tokio::test]
async fn monitor_trigger_polls_the_fixture() {
    let scaler = build_scaler(&monitor_config(), &fixture()).unwrap();

    let metric = scaler.metrics().await.unwrap();
    assert_eq!(metric.value, 42);
    assert!(scaler.is_active().await.unwrap());

    let spec = scaler.metric_spec();
    assert_eq!(spec.name, "s1-cloud-monitor-cpu-util");
    assert_eq!(spec.target, 50);
}

#[tokio::test]
async fn misconfigured_trigger_fails_before_backends() {
    let mut config = eventstream_config();
    config.auth_params.remove("storageConnection");

    let err = build_scaler(&config, &fixture()).unwrap_err();
    assert!(matches!(err, ScalerError::InvalidConfiguration(_)));
}

#[test]
fn snapshot_loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();

    let backends = FixtureBackends::from_file(file.path()).unwrap();
    let scaler = build_scaler(&eventstream_config(), &backends).unwrap();
    assert_eq!(scaler.metric_spec().target, 64);
}

#[test]
fn malformed_snapshot_file_is_invalid_configuration() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"partitions: nope").unwrap();

    let err = FixtureSnapshot::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ScalerError::InvalidConfiguration(_)));
}
