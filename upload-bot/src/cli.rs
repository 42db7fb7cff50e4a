//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "upload-bot")]
#[command(about = "Bot that downloads posted file attachments", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook server (config from env; flags override BOT_HOST / PORT).
    Run {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Load BotConfig from environment, applying CLI overrides.
pub fn load_config(host: Option<String>, port: Option<u16>) -> Result<BotConfig> {
    BotConfig::load(host, port)
}
