//! Trellis - platform classification and target resolution for
//! infrastructure testing tools
//!
//! This crate provides the core library functionality for Trellis:
//! a registry of platforms and the families they belong to, and the
//! resolution of user-supplied connection options into a normalized
//! target configuration with a selected transport backend.

pub mod core;
pub mod ops;
pub mod plugins;
pub mod target;
pub mod util;

pub use crate::core::{Condition, EntityId, Family, Platform, Registry};
pub use crate::plugins::{PluginRegistry, TransportPlugin};
pub use crate::target::{target_config, validate_backend, ConfigError, TargetConfig};
pub use crate::util::config::Config;
