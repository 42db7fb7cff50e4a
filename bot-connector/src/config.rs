//! Connector config: bind address, log file, reply timeout.
//! Loaded from env: BOT_HOST, PORT, LOG_FILE, CONNECTOR_TIMEOUT_SECS.

use anyhow::Result;
use std::env;

pub const DEFAULT_PORT: u16 = 3978;

/// HTTP connector config.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// BOT_HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// LOG_FILE
    pub log_file: String,
    /// CONNECTOR_TIMEOUT_SECS: timeout for each outbound reply request
    pub request_timeout_secs: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_file: "logs/upload-bot.log".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ConnectorConfig {
    /// Load from environment variables; unset vars keep their defaults, malformed numbers are errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let host = env::var("BOT_HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(s) => s
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port: {}", s))?,
            Err(_) => defaults.port,
        };
        let log_file = env::var("LOG_FILE").unwrap_or(defaults.log_file);
        let request_timeout_secs = match env::var("CONNECTOR_TIMEOUT_SECS") {
            Ok(s) => s.trim().parse().map_err(|_| {
                anyhow::anyhow!("CONNECTOR_TIMEOUT_SECS is not a whole number of seconds: {}", s)
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self {
            host,
            port,
            log_file,
            request_timeout_secs,
        })
    }

    /// Validate config before binding.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("PORT must be non-zero");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("CONNECTOR_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
