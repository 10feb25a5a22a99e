//! `trellis family` command
//!
//! Projects a platform's family capabilities and prints them.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::FamilyArgs;
use trellis::ops::{build_registry, load_project_config, project_platform};

pub fn execute(args: FamilyArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let config = load_project_config(&cwd);
    let mut registry = build_registry(&config)?;

    let attributes = args
        .attrs
        .iter()
        .map(|raw| parse_attribute(raw))
        .collect::<Result<Vec<_>>>()?;

    let id = project_platform(&mut registry, &args.platform, attributes)?;
    let platform = registry.platform(id);

    println!("{} ({})", platform.title(), platform.name());
    if let Some(family) = platform.family() {
        println!("  Family:     {}", family);
    }
    if let Some(release) = platform.release() {
        println!("  Release:    {}", release);
    }
    if let Some(arch) = platform.arch() {
        println!("  Arch:       {}", arch);
    }
    println!("  Hierarchy:  {}", platform.family_hierarchy().join(" -> "));
    println!();

    println!("Capabilities:");
    for (family, member) in platform.capabilities().filter(|(_, member)| *member) {
        println!("  {}?: {}", family, member);
    }

    if !platform.attributes().is_empty() {
        println!();
        println!("Attributes:");
        for (key, value) in platform.attributes() {
            match value.as_str() {
                Some(text) => println!("  {}: {}", key, text),
                None => println!("  {}: {}", key, value),
            }
        }
    }

    Ok(())
}

/// Attribute values are kept as text.
fn parse_attribute(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected `key=value`, got `{}`", raw))?;
    Ok((key.trim().to_string(), Value::from(value)))
}
