//! `trellis plugins` command
//!
//! Lists transport plugins and their declared options.

use anyhow::Result;

use trellis::plugins::PluginRegistry;

pub fn execute() -> Result<()> {
    let registry = PluginRegistry::new();

    println!("Transports:");
    println!();

    for plugin in registry.all() {
        println!("  {} - {}", plugin.name(), plugin.description());
        for spec in plugin.options().specs() {
            let default = spec
                .default
                .as_ref()
                .map(|value| format!(" (default: {})", value))
                .unwrap_or_default();
            let required = if spec.required { " [required]" } else { "" };
            println!("    {}{}{}", spec.name, default, required);
        }
        println!();
    }

    Ok(())
}
