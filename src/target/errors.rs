//! Target configuration errors.

use thiserror::Error;

use crate::util::symbol::InvalidSymbol;

/// A target configuration that cannot be used. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidKey(#[from] InvalidSymbol),

    #[error("configuration key `{key}` was given more than once")]
    DuplicateKey { key: String },

    #[error("invalid value in target configuration: {0}")]
    InvalidValue(#[from] serde_json::Error),

    #[error("unable to parse target `{target}`: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot determine backend from target configuration `{target}`. Valid example: ssh://192.168.0.1")]
    UndeterminedBackend { target: String },

    #[error("host `{host}` given, but no backend was provided")]
    HostWithoutBackend { host: String },

    #[error("sudo is only valid when running against a remote host; to elevate locally, run this command with sudo")]
    SudoWithoutRemoteBackend,
}
