//! # bot-core
//!
//! Core types and traits for the upload bot: [`Activity`] and friends, [`TurnContext`],
//! [`ActivityHandler`], [`Middleware`], errors and tracing initialization. Transport-agnostic;
//! used by handler-chain, middleware, bot-connector and upload-bot.

pub mod context;
pub mod error;
pub mod handler;
pub mod logger;
pub mod types;

pub use context::TurnContext;
pub use error::{BotError, HandlerError, Result};
pub use handler::{ActivityHandler, Middleware, TurnOutcome};
pub use logger::init_tracing;
pub use types::{
    Activity, ActivityType, Attachment, ChannelAccount, ConversationAccount, FileDownloadInfo,
    ResourceResponse,
};
