//! Configuration file support for Trellis.
//!
//! Trellis supports two configuration file locations:
//! - Global: `~/.trellis/config.toml` - User-wide defaults
//! - Project: `.trellis/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Condition, Registry, RegistryError};
use crate::target::RawConfig;

/// Backend used when nothing else selects one.
pub const DEFAULT_BACKEND: &str = "local";

/// Trellis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings
    pub defaults: Defaults,

    /// Named target profiles
    pub targets: BTreeMap<String, RawConfig>,

    /// Additional family declarations
    pub families: BTreeMap<String, EntityDecl>,

    /// Additional platform declarations
    pub platforms: BTreeMap<String, EntityDecl>,
}

/// `[defaults]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Backend used when a target does not name one
    pub backend: Option<String>,
}

/// A family or platform declared in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityDecl {
    pub title: Option<String>,

    /// Families this entity belongs to
    pub families: Vec<String>,

    pub condition: Option<Condition>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Profiles and declarations are replaced whole, by name.
    pub fn merge(&mut self, other: Config) {
        if other.defaults.backend.is_some() {
            self.defaults.backend = other.defaults.backend;
        }
        self.targets.extend(other.targets);
        self.families.extend(other.families);
        self.platforms.extend(other.platforms);
    }

    /// Configured default backend, or `local`.
    pub fn default_backend(&self) -> &str {
        self.defaults.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Options of the named target profile.
    pub fn profile(&self, name: &str) -> Option<&RawConfig> {
        self.targets.get(name)
    }

    /// Register the declared families, then the declared platforms.
    pub fn apply_declarations(&self, registry: &mut Registry) -> Result<(), RegistryError> {
        for (name, decl) in &self.families {
            let id = registry.family(name, decl.condition.clone());
            if let Some(title) = &decl.title {
                registry.get_family_mut(id).set_title(title.clone());
            }
            for parent in &decl.families {
                registry.in_family(id, parent)?;
            }
        }

        for (name, decl) in &self.platforms {
            let id = registry.name(name, decl.condition.clone());
            if let Some(title) = &decl.title {
                registry.platform_mut(id).set_title(title.clone());
            }
            for parent in &decl.families {
                registry.in_family(id, parent)?;
            }
        }

        Ok(())
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.trellis/config.toml)
/// 2. Global config (~/.trellis/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global trellis config directory (~/.trellis).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".trellis"))
}

/// Get the global config path (~/.trellis/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.trellis/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".trellis").join("config.toml")
}
