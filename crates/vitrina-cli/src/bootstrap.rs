use anyhow::Context;
use vitrina_config::VitrinaConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered configuration, then apply CLI flag overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<VitrinaConfig> {
    let mut config =
        VitrinaConfig::load_with_dotenv().context("failed to load vitrina configuration")?;
    apply_overrides(&mut config, flags)?;
    Ok(config)
}

fn apply_overrides(config: &mut VitrinaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
        config
            .api
            .check()
            .context("invalid --base-url")?;
    }
    Ok(())
}
