//! Loading transports that ship as external executables.
//!
//! A transport called `aws` is provided by a `trellis-aws` program on the
//! search path. Its options are not known ahead of time, so an external
//! transport declares none.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::plugins::options::TransportOptions;
use crate::plugins::registry::{PluginLoader, TransportPlugin};

/// Executable prefix for external transports.
pub const PLUGIN_PREFIX: &str = "trellis-";

/// A transport backed by an executable.
#[derive(Debug, Clone)]
pub struct ExternalTransport {
    name: String,
    program: PathBuf,
    description: String,
    options: TransportOptions,
}

impl ExternalTransport {
    pub fn new(name: impl Into<String>, program: PathBuf) -> Self {
        let description = format!("External transport ({})", program.display());
        ExternalTransport {
            name: name.into(),
            program,
            description,
            options: TransportOptions::new(),
        }
    }

    /// Path to the plugin executable.
    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

impl TransportPlugin for ExternalTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn options(&self) -> &TransportOptions {
        &self.options
    }
}

/// Finds `trellis-<name>` executables on `PATH` or an explicit search path.
#[derive(Debug, Clone, Default)]
pub struct PathPluginLoader {
    search_path: Option<OsString>,
}

impl PathPluginLoader {
    /// Search the process `PATH`.
    pub fn new() -> Self {
        PathPluginLoader::default()
    }

    /// Search only the given path list.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        PathPluginLoader {
            search_path: Some(paths.into()),
        }
    }

    fn find(&self, program: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(program, Some(paths), cwd)
            }
            None => which::which(program),
        };
        found.ok()
    }
}

impl PluginLoader for PathPluginLoader {
    fn load(&self, name: &str) -> Option<Box<dyn TransportPlugin>> {
        let program = format!("{}{}", PLUGIN_PREFIX, name);
        match self.find(&program) {
            Some(path) => {
                tracing::info!("loaded transport `{}` from {}", name, path.display());
                Some(Box::new(ExternalTransport::new(name, path)))
            }
            None => {
                tracing::debug!("no `{}` executable found", program);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::registry::{Lookup, PluginRegistry};
    use tempfile::TempDir;

    #[test]
    fn test_missing_executable() {
        let tmp = TempDir::new().unwrap();
        let loader = PathPluginLoader::with_search_path(tmp.path());
        assert!(loader.load("nonexistent").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_on_search_path() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let program = tmp.path().join("trellis-aws");
        std::fs::write(&program, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

        let loader = PathPluginLoader::with_search_path(tmp.path());
        let mut registry = PluginRegistry::new();
        match registry.resolve("aws", &loader) {
            Lookup::Found(plugin) => {
                assert_eq!(plugin.name(), "aws");
                assert!(plugin.description().contains("trellis-aws"));
                assert!(plugin.options().specs().is_empty());
            }
            other => panic!("unexpected lookup: {other:?}"),
        }
    }
}
