use anyhow::Context;
use sheetsync_config::{OutputConfig, SyncConfig};

use crate::cli::GlobalFlags;

/// Load layered config (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SyncConfig> {
    let mut config = SyncConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load configuration")?;
    apply_overrides(&mut config.output, flags);
    Ok(config)
}

/// Output settings to report a failure with when the config itself failed
/// to load.
pub fn fallback_output(flags: &GlobalFlags) -> OutputConfig {
    let mut output = OutputConfig::default();
    apply_overrides(&mut output, flags);
    output
}

fn apply_overrides(output: &mut OutputConfig, flags: &GlobalFlags) {
    if let Some(dir) = &flags.output_dir {
        output.dir = dir.to_string_lossy().into_owned();
    }
}
