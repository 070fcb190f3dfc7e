//! Application configuration: defaults, an optional TOML file and `HOSTA_*`
//! environment overrides, layered with the `config` crate.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{format::parse_time, store::DEFAULT_DATA_FILE};

/// Directory under the user's config/data directories owned by the app.
pub const APP_DIR: &str = "hosta";
/// Prefix for environment overrides (`HOSTA_DATA_FILE`, ...).
pub const ENV_PREFIX: &str = "HOSTA";

const DEFAULT_CHECK_IN: &str = "14:00";
const DEFAULT_CHECK_OUT: &str = "11:00";

/// Resolved runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Location of the hotel document.
    pub data_file: PathBuf,
    /// Directory receiving `hosta.log`.
    pub log_dir: PathBuf,
    /// Check-in opening time used when the document has none (`HH:mm`).
    pub default_check_in: String,
    /// Check-out deadline used when the document has none (`HH:mm`).
    pub default_check_out: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self {
            data_file: data_root.join(DEFAULT_DATA_FILE),
            log_dir: data_root.join("logs"),
            default_check_in: DEFAULT_CHECK_IN.to_string(),
            default_check_out: DEFAULT_CHECK_OUT.to_string(),
        }
    }
}

impl AppConfig {
    /// Path of the user's config file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load configuration from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration layered on top of the file at `path`, if it exists.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default("data_file", defaults.data_file.to_string_lossy().to_string())?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().to_string())?
            .set_default("default_check_in", defaults.default_check_in)?
            .set_default("default_check_out", defaults.default_check_out)?
            .add_source(File::from(path.clone()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("failed to parse configuration")?;
        // surface bad times at startup rather than at first use
        config.check_in_time()?;
        config.check_out_time()?;
        Ok(config)
    }

    /// Parsed [`AppConfig::default_check_in`].
    pub fn check_in_time(&self) -> Result<NaiveTime> {
        parse_time(&self.default_check_in).context("invalid default_check_in")
    }

    /// Parsed [`AppConfig::default_check_out`].
    pub fn check_out_time(&self) -> Result<NaiveTime> {
        parse_time(&self.default_check_out).context("invalid default_check_out")
    }
}

/// Write a commented default config file when none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(AppConfig::config_path())
}

/// [`ensure_default_config`] against an explicit path.
pub fn ensure_default_config_at(path: impl Into<PathBuf>) -> Result<()> {
    let path = path.into();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let defaults = AppConfig::default();
    let contents = format!(
        "# Hosta hotel console configuration.\n\
         # Every key can be overridden with a {ENV_PREFIX}_<KEY> environment variable.\n\
         \n\
         data_file = {data_file:?}\n\
         log_dir = {log_dir:?}\n\
         \n\
         # Used only when the data file does not define them yet.\n\
         default_check_in = \"{check_in}\"\n\
         default_check_out = \"{check_out}\"\n",
        data_file = defaults.data_file.to_string_lossy(),
        log_dir = defaults.log_dir.to_string_lossy(),
        check_in = defaults.default_check_in,
        check_out = defaults.default_check_out,
    );
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.default_check_in, "14:00");
        assert_eq!(config.check_out_time()?, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_file = \"/tmp/hosta-test.json\"\ndefault_check_in = \"15:30\"\n",
        )?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.data_file, PathBuf::from("/tmp/hosta-test.json"));
        assert_eq!(config.check_in_time()?, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
        Ok(())
    }

    #[test]
    fn invalid_time_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_check_out = \"noon\"\n")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("hosta/config.toml");
        ensure_default_config_at(&path)?;
        assert!(path.exists());
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.default_check_in, "14:00");
        // an existing file is never overwritten
        fs::write(&path, "default_check_in = \"16:00\"\n")?;
        ensure_default_config_at(&path)?;
        assert_eq!(AppConfig::load_from(&path)?.default_check_in, "16:00");
        Ok(())
    }
}
