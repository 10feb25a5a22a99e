//! Platform registry operations.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::{specifications, PlatformId, Registry};
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Load the merged global and project configuration for `project_root`.
pub fn load_project_config(project_root: &Path) -> Config {
    let global = global_config_path();
    load_config(global.as_deref(), &project_config_path(project_root))
}

/// Build a registry holding the built-in specifications plus everything
/// `config` declares.
pub fn build_registry(config: &Config) -> Result<Registry> {
    let mut registry = Registry::new();
    specifications::load_all(&mut registry).context("failed to load built-in platforms")?;
    config
        .apply_declarations(&mut registry)
        .context("invalid platform declarations in config")?;

    tracing::debug!(
        "registry has {} platforms and {} families",
        registry.platform_count(),
        registry.family_count()
    );
    Ok(registry)
}

/// Record detected `attributes` on the platform called `name` and project
/// its family capabilities.
pub fn project_platform(
    registry: &mut Registry,
    name: &str,
    attributes: impl IntoIterator<Item = (String, Value)>,
) -> Result<PlatformId> {
    let id = registry.platform_id(name).ok_or_else(|| {
        anyhow::anyhow!(
            "platform `{}` is not registered\n\
             help: Run `trellis platforms` to see all platforms",
            name
        )
    })?;

    let platform = registry.platform_mut(id);
    for (key, value) in attributes {
        platform.set_attribute(key, value);
    }
    registry.project_capabilities(id);
    Ok(id)
}
