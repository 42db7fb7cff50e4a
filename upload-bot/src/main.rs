//! Binary for the upload bot webhook server.

use anyhow::Result;
use clap::Parser;
use upload_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { host, port } => {
            let config = load_config(host, port)?;
            run_bot(config).await
        }
    }
}
