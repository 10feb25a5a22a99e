//! Target resolution operations.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::plugins::{PluginLoader, PluginRegistry};
use crate::target::{target_config, validate_backend, RawConfig, TargetConfig};
use crate::util::config::Config;

/// Options for resolving a target.
///
/// Every option set here overrides the same option from the selected
/// profile.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target string, e.g. `ssh://user@host`
    pub target: Option<String>,

    /// Profile from the `[targets]` config table
    pub profile: Option<String>,

    pub backend: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub path: Option<String>,

    /// Inline keys or key file paths
    pub keys: Vec<String>,

    pub sudo: bool,
    pub www_form_encoded_password: bool,

    /// Extra transport options
    pub extra: Vec<(String, Value)>,

    /// Backend used when nothing else selects one (overrides config)
    pub default_backend: Option<String>,
}

/// A fully resolved target.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTarget {
    pub backend: String,
    pub config: TargetConfig,
}

impl ResolveOptions {
    /// Layer these options over `raw`.
    fn apply(&self, mut raw: RawConfig) -> RawConfig {
        let mut set = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                raw.insert(key.to_string(), value);
            }
        };

        set("target", self.target.clone().map(Value::from));
        set("backend", self.backend.clone().map(Value::from));
        set("host", self.host.clone().map(Value::from));
        set("port", self.port.map(Value::from));
        set("user", self.user.clone().map(Value::from));
        set("password", self.password.clone().map(Value::from));
        set("path", self.path.clone().map(Value::from));
        set(
            "keys",
            (!self.keys.is_empty()).then(|| Value::from(self.keys.clone())),
        );
        set("sudo", self.sudo.then_some(Value::Bool(true)));
        set(
            "www_form_encoded_password",
            self.www_form_encoded_password.then_some(Value::Bool(true)),
        );

        for (key, value) in &self.extra {
            raw.insert(key.clone(), value.clone());
        }
        raw
    }
}

/// Resolve connection options into a target configuration and backend.
///
/// Profile options are overridden by explicit options. The result is
/// normalized, its backend selected, the transport plugin located, and the
/// transport's option defaults filled in and checked.
pub fn resolve_target(
    opts: &ResolveOptions,
    config: &Config,
    plugins: &mut PluginRegistry,
    loader: &dyn PluginLoader,
) -> Result<ResolvedTarget> {
    let base = match &opts.profile {
        Some(name) => config.profile(name).cloned().ok_or_else(|| {
            anyhow::anyhow!("target profile `{}` is not defined in any config file", name)
        })?,
        None => RawConfig::new(),
    };

    let raw = opts.apply(base);
    let mut target = target_config(raw).context("invalid target configuration")?;

    let default = opts
        .default_backend
        .as_deref()
        .unwrap_or_else(|| config.default_backend());
    let backend = validate_backend(Some(&mut target), default)?;
    tracing::debug!("selected backend `{}`", backend);

    let plugin = plugins.require(&backend, loader)?;
    let options = plugin.options();
    let merged = options
        .merge(&target)
        .with_context(|| format!("invalid defaults for transport `{}`", backend))?;
    options.validate(&backend, &merged)?;

    Ok(ResolvedTarget {
        backend,
        config: merged,
    })
}

/// Parse the value half of a `key=value` option.
///
/// JSON scalars and documents are taken as such; anything else is a string.
pub fn parse_option_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Split a `key=value` option.
pub fn parse_key_value(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected `key=value`, got `{}`", raw))?;
    Ok((key.trim().to_string(), parse_option_value(value)))
}
