//! Panel configuration.
//!
//! Configuration is stored in `.parley/config.yaml` (or the file named by
//! `PARLEY_CONFIG`) and includes:
//! - The delay before the loading indicator clears after the initial fetch
//! - The send timeout for posting messages
//! - Whether collaborator failures are surfaced to the user

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

pub const CONFIG_DIR: &str = ".parley";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Milliseconds to keep the loading indicator up after the thread list
    /// arrives (default: 500)
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,

    /// Send timeout in seconds (default: 30, 0 = no timeout)
    #[serde(default = "default_send_timeout")]
    pub send_timeout: u64,

    /// Raise an error notice when the thread store fails a send or a
    /// suggestion resolution (default: false, failures are only logged)
    #[serde(default)]
    pub surface_collaborator_failures: bool,
}

fn default_loading_delay_ms() -> u64 {
    500
}

fn default_send_timeout() -> u64 {
    30
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: default_loading_delay_ms(),
            send_timeout: default_send_timeout(),
            surface_collaborator_failures: false,
        }
    }
}

impl PanelConfig {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        match env::var("PARLEY_CONFIG") {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(CONFIG_DIR).join("config.yaml"),
        }
    }

    /// Load configuration from the default location, then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(PanelConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ParleyError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: PanelConfig = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `PARLEY_SEND_TIMEOUT` and `PARLEY_LOADING_DELAY_MS`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = read_env_u64("PARLEY_SEND_TIMEOUT")? {
            self.send_timeout = value;
        }
        if let Some(value) = read_env_u64("PARLEY_LOADING_DELAY_MS")? {
            self.loading_delay_ms = value;
        }
        Ok(())
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    /// The send timeout, or `None` when disabled.
    pub fn send_timeout(&self) -> Option<Duration> {
        (self.send_timeout > 0).then(|| Duration::from_secs(self.send_timeout))
    }
}

fn read_env_u64(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ParleyError::Config(format!("{name} must be a whole number, got '{value}'"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = PanelConfig::default();
        assert_eq!(config.loading_delay(), Duration::from_millis(500));
        assert_eq!(config.send_timeout(), Some(Duration::from_secs(30)));
        assert!(!config.surface_collaborator_failures);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = PanelConfig {
            send_timeout: 0,
            ..Default::default()
        };
        assert_eq!(config.send_timeout(), None);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: PanelConfig = serde_yaml_ng::from_str("send_timeout: 5\n").unwrap();
        assert_eq!(config.send_timeout, 5);
        assert_eq!(config.loading_delay_ms, 500);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = PanelConfig::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_DIR).join("config.yaml");

        let config = PanelConfig {
            loading_delay_ms: 0,
            send_timeout: 12,
            surface_collaborator_failures: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(PanelConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "send_timeout: [not, a, number]\n").unwrap();

        let err = PanelConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ParleyError::YamlParse(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let _timeout = unsafe { EnvGuard::set("PARLEY_SEND_TIMEOUT", "7") };
        let _delay = unsafe { EnvGuard::set("PARLEY_LOADING_DELAY_MS", "0") };

        let mut config = PanelConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.send_timeout, 7);
        assert_eq!(config.loading_delay_ms, 0);
    }

    #[test]
    #[serial]
    fn test_env_override_rejects_garbage() {
        let _timeout = unsafe { EnvGuard::set("PARLEY_SEND_TIMEOUT", "soon") };

        let mut config = PanelConfig::default();
        let result = config.apply_env_overrides();
        assert!(matches!(result, Err(ParleyError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_config_path_honours_env() {
        let _path = unsafe { EnvGuard::set("PARLEY_CONFIG", "/tmp/panel.yaml") };
        assert_eq!(PanelConfig::config_path(), PathBuf::from("/tmp/panel.yaml"));
    }
}
