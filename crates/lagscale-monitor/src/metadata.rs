//! Cloud-monitoring trigger metadata.
//!
//! The query shape (namespace, metric, one dimension) and both
//! comparison values are required; the window, statistic, and period
//! carry defaults. Malformed optional numerics keep their default with
//! a warning — a bad `metricCollectionTime` should not take the trigger
//! down — while the comparison values must parse.

use lagscale_core::{ScalerConfig, ScalerError, ScalerResult};
use tracing::warn;

pub const DEFAULT_COLLECTION_SECS: i64 = 300;
pub const DEFAULT_STATISTIC: &str = "average";
pub const DEFAULT_PERIOD: &str = "300";
/// Cloud partition used when the auth params name none.
pub const DEFAULT_CLOUD: &str = "public";

/// Accessor credentials for the monitoring API, resolved from the
/// trigger's auth params and handed to the client factory untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorCredentials {
    pub identity_endpoint: String,
    pub project_id: String,
    pub domain_id: String,
    pub region: String,
    pub domain: String,
    pub cloud: String,
    pub access_key: String,
    pub secret_key: String,
}

impl MonitorCredentials {
    fn parse(config: &ScalerConfig) -> ScalerResult<Self> {
        let required = |key: &str| -> ScalerResult<String> {
            config
                .auth_params
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| {
                    ScalerError::InvalidConfiguration(format!("{key} missing from auth params"))
                })
        };

        Ok(Self {
            identity_endpoint: required("identityEndpoint")?,
            project_id: required("projectId")?,
            domain_id: required("domainId")?,
            region: required("region")?,
            domain: required("domain")?,
            cloud: required("cloud").unwrap_or_else(|_| DEFAULT_CLOUD.to_string()),
            access_key: required("accessKey")?,
            secret_key: required("secretKey")?,
        })
    }
}

/// Validated, immutable configuration for one cloud-monitoring scaler.
#[derive(Debug, Clone)]
pub struct MonitorMetadata {
    pub namespace: String,
    pub metric_name: String,
    pub dimension_name: String,
    pub dimension_value: String,
    /// Value the control loop targets per replica.
    pub target_value: f64,
    /// Activation floor: the workload is active while the statistic
    /// exceeds this.
    pub min_value: f64,
    pub collection_secs: i64,
    pub statistic: String,
    pub period: String,
    pub credentials: MonitorCredentials,
    pub scaler_index: usize,
}

impl MonitorMetadata {
    /// Parse and validate trigger configuration.
    pub fn parse(config: &ScalerConfig) -> ScalerResult<Self> {
        let required = |key: &str| -> ScalerResult<String> {
            config.metadata(key).map(str::to_string).ok_or_else(|| {
                ScalerError::InvalidConfiguration(format!("{key} not given"))
            })
        };

        let namespace = required("namespace")?;
        let metric_name = required("metricName")?;
        let dimension_name = required("dimensionName")?;
        let dimension_value = required("dimensionValue")?;

        let target_value = config
            .metadata_parsed::<f64>("targetMetricValue")?
            .ok_or_else(|| {
                ScalerError::InvalidConfiguration("targetMetricValue not given".to_string())
            })?;
        let min_value = config
            .metadata_parsed::<f64>("minMetricValue")?
            .ok_or_else(|| {
                ScalerError::InvalidConfiguration("minMetricValue not given".to_string())
            })?;

        // Window and period tolerate malformed values with a warning.
        let collection_secs = match config.metadata("metricCollectionTime") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) => v,
                Err(e) => {
                    warn!(value = raw, error = %e, "malformed metricCollectionTime, using default");
                    DEFAULT_COLLECTION_SECS
                }
            },
            None => DEFAULT_COLLECTION_SECS,
        };

        let statistic = config
            .metadata("metricFilter")
            .unwrap_or(DEFAULT_STATISTIC)
            .to_string();

        let period = match config.metadata("metricPeriod") {
            Some(raw) if raw.parse::<i64>().is_ok() => raw.to_string(),
            Some(raw) => {
                warn!(value = raw, "malformed metricPeriod, using default");
                DEFAULT_PERIOD.to_string()
            }
            None => DEFAULT_PERIOD.to_string(),
        };

        Ok(Self {
            namespace,
            metric_name,
            dimension_name,
            dimension_value,
            target_value,
            min_value,
            collection_secs,
            statistic,
            period,
            credentials: MonitorCredentials::parse(config)?,
            scaler_index: config.scaler_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_config() -> ScalerConfig {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>()
        };
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
            identity_provider: Default::default(),
            scaler_index: 2,
        }
    }

    #[test]
    fn defaults_applied() {
        let meta = MonitorMetadata::parse(&base_config()).unwrap();
        assert_eq!(meta.collection_secs, 300);
        assert_eq!(meta.statistic, "average");
        assert_eq!(meta.period, "300");
        assert_eq!(meta.credentials.cloud, "public");
        assert_eq!(meta.target_value, 50.0);
        assert_eq!(meta.min_value, 5.0);
        assert_eq!(meta.scaler_index, 2);
    }

    #[test]
    fn each_query_field_is_required() {
        for key in ["namespace", "metricName", "dimensionName", "dimensionValue"] {
            let mut config = base_config();
            config.trigger_metadata.remove(key);
            let err = MonitorMetadata::parse(&config).unwrap_err();
            assert!(err.to_string().contains(key), "missing {key} not reported");
        }
    }

    #[test]
    fn comparison_values_must_parse() {
        let mut config = base_config();
        config
            .trigger_metadata
            .insert("targetMetricValue".to_string(), "fifty".to_string());
        assert!(MonitorMetadata::parse(&config).is_err());

        let mut config = base_config();
        config.trigger_metadata.remove("minMetricValue");
        assert!(MonitorMetadata::parse(&config).is_err());
    }

    #[test]
    fn malformed_window_keeps_default() {
        let mut config = base_config();
        config
            .trigger_metadata
            .insert("metricCollectionTime".to_string(), "soon".to_string());
        config
            .trigger_metadata
            .insert("metricPeriod".to_string(), "hourly".to_string());

        let meta = MonitorMetadata::parse(&config).unwrap();
        assert_eq!(meta.collection_secs, 300);
        assert_eq!(meta.period, "300");
    }

    #[test]
    fn explicit_window_and_statistic() {
        let mut config = base_config();
        config
            .trigger_metadata
            .insert("metricCollectionTime".to_string(), "600".to_string());
        config
            .trigger_metadata
            .insert("metricFilter".to_string(), "max".to_string());
        config
            .trigger_metadata
            .insert("metricPeriod".to_string(), "60".to_string());

        let meta = MonitorMetadata::parse(&config).unwrap();
        assert_eq!(meta.collection_secs, 600);
        assert_eq!(meta.statistic, "max");
        assert_eq!(meta.period, "60");
    }

    #[test]
    fn missing_credentials_fail() {
        for key in [
            "identityEndpoint",
            "projectId",
            "domainId",
            "region",
            "domain",
            "accessKey",
            "secretKey",
        ] {
            let mut config = base_config();
            config.auth_params.remove(key);
            assert!(MonitorMetadata::parse(&config).is_err(), "{key} should be required");
        }
    }

    #[test]
    fn cloud_is_optional() {
        let mut config = base_config();
        config
            .auth_params
            .insert("cloud".to_string(), "sovereign".to_string());
        let meta = MonitorMetadata::parse(&config).unwrap();
        assert_eq!(meta.credentials.cloud, "sovereign");
    }
}
