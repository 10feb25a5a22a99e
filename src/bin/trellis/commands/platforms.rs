//! `trellis platforms` command

use anyhow::{Context, Result};

use trellis::core::list_all;
use trellis::ops::{build_registry, load_project_config};

pub fn execute() -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let config = load_project_config(&cwd);
    let registry = build_registry(&config)?;

    list_all(&registry).context("failed to write platform listing")?;
    Ok(())
}
