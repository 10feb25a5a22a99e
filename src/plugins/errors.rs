//! Plugin errors.

use thiserror::Error;

use crate::target::ConfigError;

/// Error while selecting or configuring a transport plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Neither the registry nor the loader could provide the transport.
    #[error("can't find transport plugin `{name}`")]
    NotFound { name: String },

    #[error("you must provide a value for `{option}` to use the `{transport}` transport")]
    MissingOption { transport: String, option: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
