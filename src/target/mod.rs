//! Target configuration resolution.
//!
//! Turns user-supplied connection info into a normalized [`TargetConfig`]
//! and picks the backend that should serve it.

pub mod backend;
pub mod config;
pub mod errors;
pub mod keys;
pub mod uri;

pub use backend::validate_backend;
pub use config::{target_config, RawConfig, TargetConfig};
pub use errors::ConfigError;
pub use uri::{parse_target, TargetUri};
