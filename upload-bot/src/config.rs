//! Bot configuration: connector (bind address, log file) + download settings. Loaded from env.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use bot_connector::ConnectorConfig;

/// Download settings.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// DOWNLOAD_DIR; None means the OS temp dir
    pub dir: Option<PathBuf>,
    /// DOWNLOAD_CONNECT_TIMEOUT_SECS
    pub connect_timeout: Duration,
    /// DOWNLOAD_READ_TIMEOUT_SECS
    pub read_timeout: Duration,
    /// KEEP_DOWNLOADS: keep files on disk after replying
    pub keep_files: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: None,
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
            keep_files: false,
        }
    }
}

impl DownloadConfig {
    /// Load from environment variables; unset vars keep their defaults, malformed ones are errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let dir = env::var("DOWNLOAD_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let connect_timeout =
            secs_from_env("DOWNLOAD_CONNECT_TIMEOUT_SECS")?.unwrap_or(defaults.connect_timeout);
        let read_timeout =
            secs_from_env("DOWNLOAD_READ_TIMEOUT_SECS")?.unwrap_or(defaults.read_timeout);
        let keep_files = env::var("KEEP_DOWNLOADS")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.keep_files);

        Ok(Self {
            dir,
            connect_timeout,
            read_timeout,
            keep_files,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_zero() {
            anyhow::bail!("DOWNLOAD_CONNECT_TIMEOUT_SECS must be greater than zero");
        }
        if self.read_timeout.is_zero() {
            anyhow::bail!("DOWNLOAD_READ_TIMEOUT_SECS must be greater than zero");
        }
        if let Some(ref dir) = self.dir {
            if !dir.is_dir() {
                anyhow::bail!("DOWNLOAD_DIR is not an existing directory: {}", dir.display());
            }
        }
        Ok(())
    }
}

fn secs_from_env(key: &str) -> Result<Option<Duration>> {
    match env::var(key) {
        Ok(s) => s
            .trim()
            .parse()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| anyhow::anyhow!("{} is not a whole number of seconds: {}", key, s)),
        Err(_) => Ok(None),
    }
}

/// Full bot config. Use [`BotConfig::load`] for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub connector: ConnectorConfig,
    pub download: DownloadConfig,
}

impl BotConfig {
    /// Load from environment. `host` / `port` override BOT_HOST / PORT when given.
    /// Call validate() after load to fail fast before binding.
    pub fn load(host: Option<String>, port: Option<u16>) -> Result<Self> {
        let mut connector = ConnectorConfig::from_env()?;
        if let Some(host) = host {
            connector.host = host;
        }
        if let Some(port) = port {
            connector.port = port;
        }
        Ok(Self {
            connector,
            download: DownloadConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.connector.validate()?;
        self.download.validate()
    }

    pub fn log_file(&self) -> &str {
        &self.connector.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BOT_HOST",
            "PORT",
            "LOG_FILE",
            "CONNECTOR_TIMEOUT_SECS",
            "DOWNLOAD_DIR",
            "DOWNLOAD_CONNECT_TIMEOUT_SECS",
            "DOWNLOAD_READ_TIMEOUT_SECS",
            "KEEP_DOWNLOADS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();

        let config = BotConfig::load(None, None).unwrap();

        assert_eq!(config.connector.port, 3978);
        assert_eq!(config.log_file(), "logs/upload-bot.log");
        assert!(config.download.dir.is_none());
        assert_eq!(config.download.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.download.read_timeout, Duration::from_secs(30));
        assert!(!config.download.keep_files);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        env::set_var("DOWNLOAD_DIR", dir.path());
        env::set_var("DOWNLOAD_CONNECT_TIMEOUT_SECS", "5");
        env::set_var("DOWNLOAD_READ_TIMEOUT_SECS", "7");
        env::set_var("KEEP_DOWNLOADS", "true");
        env::set_var("PORT", "4000");

        let config = BotConfig::load(None, None).unwrap();

        assert_eq!(config.download.dir.as_deref(), Some(dir.path()));
        assert_eq!(config.download.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.download.read_timeout, Duration::from_secs(7));
        assert!(config.download.keep_files);
        assert_eq!(config.connector.port, 4000);
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_with_overrides() {
        clear_env();
        env::set_var("PORT", "4000");

        let config = BotConfig::load(Some("127.0.0.1".to_string()), Some(5000)).unwrap();

        assert_eq!(config.connector.bind_addr(), "127.0.0.1:5000");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_missing_download_dir() {
        clear_env();
        env::set_var("DOWNLOAD_DIR", "/nonexistent/upload-bot/downloads");

        let config = BotConfig::load(None, None).unwrap();
        assert!(config.validate().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_rejects_malformed_timeout() {
        clear_env();
        env::set_var("DOWNLOAD_READ_TIMEOUT_SECS", "3o");

        let err = BotConfig::load(None, None).unwrap_err();
        assert!(err.to_string().contains("DOWNLOAD_READ_TIMEOUT_SECS"));

        clear_env();
    }

    #[test]
    fn test_validate_rejects_zero_read_timeout() {
        let config = DownloadConfig {
            read_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
