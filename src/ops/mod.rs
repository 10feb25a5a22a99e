//! High-level operations.
//!
//! This module contains the implementation of Trellis commands.

pub mod platforms;
pub mod resolve;

pub use platforms::{build_registry, load_project_config, project_platform};
pub use resolve::{parse_key_value, parse_option_value, resolve_target, ResolveOptions, ResolvedTarget};
