//! `trellis resolve` command
//!
//! Resolves a target and prints the configuration as JSON.

use anyhow::{Context, Result};

use crate::cli::ResolveArgs;
use trellis::ops::{load_project_config, parse_key_value, resolve_target, ResolveOptions};
use trellis::plugins::{PathPluginLoader, PluginRegistry};

pub fn execute(args: ResolveArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let config = load_project_config(&cwd);

    let extra = args
        .options
        .iter()
        .map(|raw| parse_key_value(raw))
        .collect::<Result<Vec<_>>>()?;

    let opts = ResolveOptions {
        target: args.target,
        profile: args.profile,
        backend: args.backend,
        host: args.host,
        port: args.port,
        user: args.user,
        password: args.password,
        path: args.path,
        keys: args.keys,
        sudo: args.sudo,
        www_form_encoded_password: args.www_form_encoded_password,
        extra,
        default_backend: args.default_backend,
    };

    let mut plugins = PluginRegistry::new();
    let resolved = resolve_target(&opts, &config, &mut plugins, &PathPluginLoader::new())?;

    let json = serde_json::to_string_pretty(&resolved)?;
    println!("{}", json);

    Ok(())
}
