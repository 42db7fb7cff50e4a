//! # bot-connector
//!
//! HTTP connector layer: webhook router, [`bot_core::TurnContext`] implementation, reply client,
//! minimal config and server runner. Handles only transport and handler-chain execution; no bot logic.

mod client;
mod config;
mod context;
mod runner;
mod server;

pub use client::{activities_url, ConnectorClient};
pub use config::{ConnectorConfig, DEFAULT_PORT};
pub use context::{address_reply, ConnectorTurnContext};
pub use runner::run_server;
pub use server::{router, ConnectorState};
