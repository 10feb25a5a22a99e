//! Transport plugin registry - two-tier lookup of transports by name.
//!
//! Lookup first consults the plugins registered in-process. A miss gives
//! the [`PluginLoader`] one chance to provide the transport, after which
//! the registry is consulted again. Each step is an explicit branch on a
//! [`Lookup`] value.

use std::collections::BTreeMap;

use crate::plugins::errors::PluginError;
use crate::plugins::options::TransportOptions;

/// A transport implementation, as far as selection is concerned.
///
/// Connecting and platform detection live in the transports themselves.
pub trait TransportPlugin: Send + Sync {
    /// Name used in target schemes and `backend` options.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Declared options.
    fn options(&self) -> &TransportOptions;
}

/// Outcome of a plugin lookup.
pub enum Lookup<'a> {
    /// Transport is registered
    Found(&'a dyn TransportPlugin),
    /// Not registered in-process; the loader may still provide it
    NotFoundLocally,
    /// Neither tier could provide it
    NotFound(String),
}

impl std::fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Found(plugin) => f.debug_tuple("Found").field(&plugin.name()).finish(),
            Lookup::NotFoundLocally => write!(f, "NotFoundLocally"),
            Lookup::NotFound(name) => f.debug_tuple("NotFound").field(name).finish(),
        }
    }
}

/// Provides transports that are not registered in-process.
pub trait PluginLoader {
    /// Attempt to load the transport called `name`.
    fn load(&self, name: &str) -> Option<Box<dyn TransportPlugin>>;
}

/// A loader that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoader;

impl PluginLoader for NoLoader {
    fn load(&self, _name: &str) -> Option<Box<dyn TransportPlugin>> {
        None
    }
}

/// A transport known by declaration only.
#[derive(Debug, Clone)]
pub struct BuiltinTransport {
    name: &'static str,
    description: &'static str,
    options: TransportOptions,
}

impl BuiltinTransport {
    pub fn new(name: &'static str, description: &'static str, options: TransportOptions) -> Self {
        BuiltinTransport {
            name,
            description,
            options,
        }
    }
}

impl TransportPlugin for BuiltinTransport {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn options(&self) -> &TransportOptions {
        &self.options
    }
}

fn builtin_transports() -> Vec<BuiltinTransport> {
    let local = TransportOptions::new()
        .option("command_runner")
        .option("pipe");

    let mock = TransportOptions::new().option("mock_os").with_default("verbose", false);

    let ssh = TransportOptions::new()
        .required("host")
        .with_default("port", 22)
        .with_default("user", "root")
        .option("password")
        .option("key_files")
        .with_default("keepalive", true)
        .with_default("keepalive_interval", 60)
        .with_default("connection_timeout", 15)
        .with_default("connection_retries", 5)
        .with_default("connection_retry_sleep", 1)
        .with_default("max_wait_until_ready", 600)
        .with_default("compression", false)
        .with_default("pty", false)
        .option("proxy_command")
        .option("bastion_host")
        .with_default("bastion_user", "root")
        .with_default("bastion_port", 22)
        .with_default("non_interactive", false)
        .with_default("verify_host_key", false)
        .with_default("forward_agent", false)
        .option("sudo_password")
        .option("sudo_options")
        .option("sudo_command")
        .with_default("shell", false)
        .option("shell_options")
        .option("shell_command");

    let winrm = TransportOptions::new()
        .required("host")
        .with_default("port", 5985)
        .with_default("path", "/wsman")
        .with_default("user", "administrator")
        .option("password")
        .with_default("ssl", false)
        .with_default("self_signed", false)
        .with_default("rdp_port", 3389)
        .with_default("winrm_transport", "negotiate")
        .with_default("connection_retries", 5)
        .with_default("connection_retry_sleep", 1)
        .with_default("max_wait_until_ready", 600);

    let docker = TransportOptions::new()
        .required("host")
        .option("user")
        .option("docker_url");

    vec![
        BuiltinTransport::new("local", "Commands on the local machine", local),
        BuiltinTransport::new("mock", "In-memory mock target for tests", mock),
        BuiltinTransport::new("ssh", "Remote hosts over SSH", ssh),
        BuiltinTransport::new("winrm", "Windows hosts over WinRM", winrm),
        BuiltinTransport::new("docker", "Running Docker containers", docker),
    ]
}

/// Registry of transport plugins, keyed by name.
pub struct PluginRegistry {
    plugins: BTreeMap<String, Box<dyn TransportPlugin>>,
}

impl PluginRegistry {
    /// Create a registry with the built-in transports.
    pub fn new() -> Self {
        let mut registry = PluginRegistry::empty();
        for transport in builtin_transports() {
            registry.register(Box::new(transport));
        }
        registry
    }

    /// Create a registry with no transports at all.
    pub fn empty() -> Self {
        PluginRegistry {
            plugins: BTreeMap::new(),
        }
    }

    /// Register a plugin. A plugin with the same name is replaced.
    pub fn register(&mut self, plugin: Box<dyn TransportPlugin>) {
        let name = plugin.name().to_string();
        tracing::debug!("registering transport plugin `{}`", name);
        self.plugins.insert(name, plugin);
    }

    /// In-process lookup only.
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        match self.plugins.get(name) {
            Some(plugin) => Lookup::Found(plugin.as_ref()),
            None => Lookup::NotFoundLocally,
        }
    }

    /// Full two-tier lookup: registry, then one load attempt, then the
    /// registry again. Never returns [`Lookup::NotFoundLocally`].
    pub fn resolve(&mut self, name: &str, loader: &dyn PluginLoader) -> Lookup<'_> {
        if !self.contains(name) {
            tracing::debug!("transport `{}` not registered, trying loader", name);
            if let Some(plugin) = loader.load(name) {
                self.register(plugin);
            }
        }

        match self.lookup(name) {
            Lookup::NotFoundLocally => Lookup::NotFound(name.to_string()),
            found => found,
        }
    }

    /// [`resolve`](Self::resolve) as a `Result`.
    pub fn require(
        &mut self,
        name: &str,
        loader: &dyn PluginLoader,
    ) -> Result<&dyn TransportPlugin, PluginError> {
        match self.resolve(name, loader) {
            Lookup::Found(plugin) => Ok(plugin),
            Lookup::NotFoundLocally | Lookup::NotFound(_) => Err(PluginError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Get a registered plugin.
    pub fn get(&self, name: &str) -> Option<&dyn TransportPlugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    /// All registered plugins, sorted by name.
    pub fn all(&self) -> impl Iterator<Item = &dyn TransportPlugin> + '_ {
        self.plugins.values().map(|p| p.as_ref())
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
