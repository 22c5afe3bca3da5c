use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tokio::time::timeout;

use lagscale_core::Scaler;
use lagscale_registry::{FixtureBackends, build_scaler};

use crate::trigger;

/// Build the trigger's scaler and poll it once against a fixture.
pub async fn check(
    trigger_path: &str,
    fixture_path: Option<&str>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let config = trigger::load(Path::new(trigger_path))?;

    let backends = match fixture_path {
        Some(path) => FixtureBackends::from_file(Path::new(path))?,
        None => FixtureBackends::default(),
    };

    let scaler = build_scaler(&config, &backends)?;
    let deadline = Duration::from_secs(timeout_secs);
    tracing::debug!(trigger = %config.trigger_type, ?deadline, "polling scaler");

    let active = timeout(deadline, scaler.is_active())
        .await
        .context("activity probe timed out")??;
    let metric = timeout(deadline, scaler.metrics())
        .await
        .context("metric poll timed out")??;

    let spec = scaler.metric_spec();
    println!("✓ {} ({})", spec.name, config.trigger_type);
    println!("  Active: {active}");
    println!("  Value:  {} (target {})", metric.value, spec.target);

    scaler.close().await?;
    Ok(())
}
