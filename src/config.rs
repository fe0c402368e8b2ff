//! Configuration management for Astrum
//!
//! Built-in defaults, overridden by `<config dir>/astrum/config.toml`, then by
//! `ASTRUM_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use directories::BaseDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::permissions::EscalationPolicy;

pub const APP_DIR: &str = "astrum";

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Backing file of the bookmark store
    pub bookmarks_file: String,

    /// Mount table the device list is parsed from
    pub mount_table: String,

    /// Device field prefix a mount needs to be listed
    pub device_prefix: String,

    /// Elevation helper; empty disables escalation
    pub escalation_helper: String,

    /// Program that opens files and, elevated, unreadable locations
    pub opener: String,

    /// Retry denied deletes through the helper
    /// Environment: ASTRUM_DELETE_ESCALATION=retry-elevated
    pub delete_escalation: EscalationPolicy,
}

impl EngineConfig {
    /// Load configuration from the user config directory with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let dir = config_dir();
        Self::load_from(&dir.join("config"), &dir)
    }

    /// Load with an explicit config file stem (extension optional) and app directory.
    pub fn load_from(config_file: &Path, app_dir: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default(
                "bookmarks_file",
                app_dir.join("bookmarks").to_string_lossy().into_owned(),
            )?
            .set_default("mount_table", "/proc/mounts")?
            .set_default("device_prefix", "/dev/")?
            .set_default("escalation_helper", "pkexec")?
            .set_default("opener", "xdg-open")?
            .set_default("delete_escalation", "never")?
            .add_source(File::with_name(&config_file.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("ASTRUM"))
            .build()?;

        let config: EngineConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("bookmarks_file", &self.bookmarks_file),
            ("mount_table", &self.mount_table),
            ("device_prefix", &self.device_prefix),
            ("opener", &self.opener),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("{} cannot be empty", key)));
            }
        }
        Ok(())
    }

    pub fn bookmarks_path(&self) -> PathBuf {
        PathBuf::from(&self.bookmarks_file)
    }

    pub fn mount_table_path(&self) -> PathBuf {
        PathBuf::from(&self.mount_table)
    }
}

/// `<user config dir>/astrum`, or `./.astrum` when no home is known.
pub fn config_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{}", APP_DIR)))
}

/// The user's home directory, falling back to `/`.
pub fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from(&dir.path().join("config"), dir.path()).unwrap();

        assert_eq!(config.bookmarks_path(), dir.path().join("bookmarks"));
        assert_eq!(config.mount_table, "/proc/mounts");
        assert_eq!(config.device_prefix, "/dev/");
        assert_eq!(config.opener, "xdg-open");
        assert_eq!(config.delete_escalation, EscalationPolicy::Never);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "escalation_helper = \"\"\ndelete_escalation = \"retry-elevated\"\n",
        )
        .unwrap();

        let config = EngineConfig::load_from(&dir.path().join("config"), dir.path()).unwrap();
        assert_eq!(config.escalation_helper, "");
        assert_eq!(config.delete_escalation, EscalationPolicy::RetryElevated);
    }

    #[test]
    fn test_empty_required_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "opener = \" \"\n").unwrap();

        let err = EngineConfig::load_from(&dir.path().join("config"), dir.path()).unwrap_err();
        assert!(err.to_string().contains("opener"));
    }
}
