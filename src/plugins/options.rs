//! Transport option declarations.
//!
//! Each transport declares the options it understands, with an optional
//! default and whether the option is required. Defaults only fill options
//! the caller left unset.

use serde_json::Value;

use crate::plugins::errors::PluginError;
use crate::target::{ConfigError, TargetConfig};

/// One declared option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: String,
    pub default: Option<Value>,
    pub required: bool,
}

/// The set of options a transport declares, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportOptions {
    specs: Vec<OptionSpec>,
}

impl TransportOptions {
    /// Create an empty declaration.
    pub fn new() -> Self {
        TransportOptions::default()
    }

    /// Declare an optional option without a default.
    pub fn option(self, name: &str) -> Self {
        self.push(name, None, false)
    }

    /// Declare an option with a default value.
    pub fn with_default(self, name: &str, default: impl Into<Value>) -> Self {
        self.push(name, Some(default.into()), false)
    }

    /// Declare a required option.
    pub fn required(self, name: &str) -> Self {
        self.push(name, None, true)
    }

    fn push(mut self, name: &str, default: Option<Value>, required: bool) -> Self {
        self.specs.retain(|spec| spec.name != name);
        self.specs.push(OptionSpec {
            name: name.to_string(),
            default,
            required,
        });
        self
    }

    /// Declared options.
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Look up one declared option.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Fill declared defaults into every option `config` leaves unset.
    pub fn merge(&self, config: &TargetConfig) -> Result<TargetConfig, ConfigError> {
        let mut map = config.to_map();
        for spec in &self.specs {
            let Some(default) = &spec.default else {
                continue;
            };
            let unset = map.get(&spec.name).map_or(true, Value::is_null);
            if unset {
                map.insert(spec.name.clone(), default.clone());
            }
        }
        TargetConfig::from_map(map)
    }

    /// Check that every required option has a value.
    pub fn validate(&self, transport: &str, config: &TargetConfig) -> Result<(), PluginError> {
        let map = config.to_map();
        for spec in self.specs.iter().filter(|spec| spec.required) {
            if map.get(&spec.name).map_or(true, Value::is_null) {
                return Err(PluginError::MissingOption {
                    transport: transport.to_string(),
                    option: spec.name.clone(),
                });
            }
        }
        Ok(())
    }
}
