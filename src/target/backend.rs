//! Backend selection for a resolved target configuration.

use crate::target::config::TargetConfig;
use crate::target::errors::ConfigError;

/// Determine the backend for `config`, falling back to `default`.
///
/// With no config at all the default is returned untouched. Otherwise an
/// explicit backend wins; a config that names a target or a host but no
/// backend is rejected, as is `sudo` without a remote backend. When nothing
/// points anywhere, `default` is written into the config and returned.
pub fn validate_backend(
    config: Option<&mut TargetConfig>,
    default: &str,
) -> Result<String, ConfigError> {
    let Some(config) = config else {
        return Ok(default.to_string());
    };

    let local = matches!(config.backend.as_deref(), None | Some("localhost"));
    if local && config.sudo {
        return Err(ConfigError::SudoWithoutRemoteBackend);
    }

    if let Some(backend) = &config.backend {
        return Ok(backend.clone());
    }

    if let Some(target) = &config.target {
        return Err(ConfigError::UndeterminedBackend {
            target: target.clone(),
        });
    }

    if let Some(host) = &config.host {
        return Err(ConfigError::HostWithoutBackend { host: host.clone() });
    }

    tracing::debug!("no backend configured, using `{}`", default);
    config.backend = Some(default.to_string());
    Ok(default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::config::target_config;
    use crate::target::config::RawConfig;
    use serde_json::json;

    #[test]
    fn test_no_config_returns_default() {
        assert_eq!(validate_backend(None, "local").unwrap(), "local");
    }

    #[test]
    fn test_empty_config_takes_default() {
        let mut config = TargetConfig::default();
        assert_eq!(validate_backend(Some(&mut config), "local").unwrap(), "local");
        assert_eq!(config.backend.as_deref(), Some("local"));
    }

    #[test]
    fn test_explicit_backend_is_kept() {
        let mut config = TargetConfig {
            backend: Some("docker".into()),
            ..Default::default()
        };
        assert_eq!(validate_backend(Some(&mut config), "local").unwrap(), "docker");
        assert_eq!(config.backend.as_deref(), Some("docker"));
    }

    #[test]
    fn test_sudo_without_backend() {
        let mut config = TargetConfig {
            sudo: true,
            ..Default::default()
        };
        let err = validate_backend(Some(&mut config), "local").unwrap_err();
        assert!(matches!(err, ConfigError::SudoWithoutRemoteBackend));
        assert_eq!(config.backend, None);
    }

    #[test]
    fn test_sudo_with_localhost_backend() {
        let mut config = TargetConfig {
            sudo: true,
            backend: Some("localhost".into()),
            ..Default::default()
        };
        let err = validate_backend(Some(&mut config), "local").unwrap_err();
        assert!(matches!(err, ConfigError::SudoWithoutRemoteBackend));
    }

    #[test]
    fn test_sudo_with_remote_backend() {
        let mut config = TargetConfig {
            sudo: true,
            backend: Some("ssh".into()),
            ..Default::default()
        };
        assert_eq!(validate_backend(Some(&mut config), "local").unwrap(), "ssh");
    }

    #[test]
    fn test_host_without_backend() {
        let mut config = TargetConfig {
            host: Some("10.0.0.1".into()),
            ..Default::default()
        };
        let err = validate_backend(Some(&mut config), "local").unwrap_err();
        assert!(matches!(err, ConfigError::HostWithoutBackend { .. }));
    }

    #[test]
    fn test_unresolvable_target() {
        let mut raw = RawConfig::new();
        raw.insert("target".into(), json!("localhost"));
        let mut config = target_config(raw).unwrap();

        let err = validate_backend(Some(&mut config), "local").unwrap_err();
        assert!(err.to_string().contains("localhost"));
        assert!(matches!(err, ConfigError::UndeterminedBackend { .. }));
    }

    #[test]
    fn test_target_backend_is_used() {
        let mut config = TargetConfig::for_target("winrm://admin@win01").resolve().unwrap();
        assert_eq!(validate_backend(Some(&mut config), "local").unwrap(), "winrm");
    }
}
