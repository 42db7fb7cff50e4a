//! # Upload bot
//!
//! Greets members added to a conversation and, for messages carrying a Teams file download
//! attachment, downloads the file and replies with its size and detected type.
//! Wires bot-core, handler-chain, middleware and bot-connector; loads config from env.

pub mod cli;
pub mod config;
pub mod download;
pub mod file_info;
pub mod handler;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use config::{BotConfig, DownloadConfig};
pub use download::{AttachmentDownloader, DownloadError, DownloadResult, DownloadedFile};
pub use file_info::{file_size, file_type, UNKNOWN_TYPE};
pub use handler::{UploadBot, DOWNLOAD_FAILED_TEXT, PROMPT_TEXT, WELCOME_TEXT};
pub use runner::{build_handler_chain, run_bot};
