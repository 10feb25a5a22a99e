//! Transport plugins.
//!
//! Transports are selected by name. Built-in transports are registered
//! in-process; others are loaded on demand from `trellis-<name>`
//! executables.

pub mod errors;
pub mod loader;
pub mod options;
pub mod registry;

pub use errors::PluginError;
pub use loader::{ExternalTransport, PathPluginLoader};
pub use options::{OptionSpec, TransportOptions};
pub use registry::{BuiltinTransport, Lookup, NoLoader, PluginLoader, PluginRegistry, TransportPlugin};
