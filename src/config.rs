//! Client configuration.
//!
//! One JSON file, `config.json`, holding the server base URL. The file
//! lives in the platform config directory in production and inside the
//! repo's `tmp/` directory under test, so test runs never touch the
//! user's home. `AFS_NOTIFY_SERVER_URL` overrides the stored URL and
//! `AFS_NOTIFY_CONFIG_DIR` overrides where the file is looked up.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{fs, path::PathBuf};

/// Settings for the afs-notify client.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    /// Base URL of the notification server.
    ///
    /// Stored with an `http`/`https` scheme; the client rewrites it to
    /// `ws`/`wss` when opening the connection.
    pub server_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Repo-local directory used whenever tests need a config dir.
fn repo_tmp_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tmp/afs-notify-test")
}

// Unit tests always stay inside the repo, no env vars consulted.
#[cfg(test)]
fn base_dir() -> Result<PathBuf> {
    Ok(repo_tmp_dir())
}

// Everyone else resolves in order: explicit AFS_NOTIFY_CONFIG_DIR
// override, AFS_NOTIFY_ENV=test (integration tests), then the platform
// config directory.
#[cfg(not(test))]
fn base_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("AFS_NOTIFY_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if crate::env::is_test_mode() {
        return Ok(repo_tmp_dir());
    }
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("afs-notify"))
}

impl Config {
    /// Directory holding `config.json`, created on first use.
    ///
    /// # Errors
    ///
    /// Fails when the platform config directory cannot be determined or
    /// the directory cannot be created.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = base_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load settings, falling back to defaults when no file exists.
    ///
    /// `AFS_NOTIFY_SERVER_URL` wins over the stored value either way.
    ///
    /// # Errors
    ///
    /// Fails only when the config directory is unusable; a missing or
    /// unreadable file falls back to [`Config::default`].
    pub fn load() -> Result<Self> {
        let mut config = Self::read_file().unwrap_or_else(|_| Self::default());
        config.override_server_url(std::env::var("AFS_NOTIFY_SERVER_URL").ok());
        Ok(config)
    }

    fn read_file() -> Result<Self> {
        let content = fs::read_to_string(Self::config_path()?)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn override_server_url(&mut self, value: Option<String>) {
        if let Some(server_url) = value {
            self.server_url = server_url;
        }
    }

    /// Write settings to `config.json`, mode 0600 on unix.
    ///
    /// # Errors
    ///
    /// Fails when the config directory is unusable or the write fails.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        #[cfg(unix)]
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_localhost() {
        assert_eq!(Config::default().server_url, "http://localhost:8080");
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let config = Config {
            server_url: "http://afs.example.com:9090".to_string(),
        };
        config.save().unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.server_url, "http://afs.example.com:9090");
    }

    #[test]
    fn test_env_value_overrides_stored_url() {
        let mut config = Config::default();
        config.override_server_url(Some("http://10.0.0.2:9000".to_string()));
        assert_eq!(config.server_url, "http://10.0.0.2:9000");

        config.override_server_url(None);
        assert_eq!(config.server_url, "http://10.0.0.2:9000");
    }

    #[test]
    fn test_config_dir_in_tests_stays_inside_repo() {
        let dir = Config::config_dir().unwrap();
        assert!(dir.starts_with(env!("CARGO_MANIFEST_DIR")));
    }
}
