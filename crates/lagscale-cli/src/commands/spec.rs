use std::path::Path;

use lagscale_core::Scaler;
use lagscale_registry::{FixtureBackends, build_scaler};

use crate::trigger;

/// Print the external metric a trigger would register, without polling.
pub fn spec(trigger_path: &str) -> anyhow::Result<()> {
    let config = trigger::load(Path::new(trigger_path))?;
    let scaler = build_scaler(&config, &FixtureBackends::default())?;

    let spec = scaler.metric_spec();
    println!("{}", spec.name);
    println!("  Target: {}", spec.target);
    Ok(())
}
