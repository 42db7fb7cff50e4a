use std::sync::Arc;

use anyhow::Result;
use bot_connector::run_server;
use bot_core::init_tracing;
use handler_chain::HandlerChain;
use middleware::LoggingMiddleware;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::download::AttachmentDownloader;
use crate::handler::UploadBot;

/// Builds the upload bot wrapped in the logging middleware.
pub fn build_handler_chain(config: &BotConfig) -> Result<HandlerChain> {
    let downloader = Arc::new(AttachmentDownloader::new(&config.download)?);
    info!(
        download_dir = %downloader.dir().display(),
        keep_files = config.download.keep_files,
        "Attachment downloader ready"
    );
    Ok(HandlerChain::new(Arc::new(UploadBot::new(downloader)))
        .add_middleware(Arc::new(LoggingMiddleware)))
}

/// Main entry: validate config, init logging, build the chain, then serve the webhook.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        bind_addr = %config.connector.bind_addr(),
        log_file = %config.log_file(),
        "Initializing upload bot"
    );

    let handler_chain = build_handler_chain(&config)?;

    info!("Bot started successfully");

    run_server(&config.connector, handler_chain).await
}
