//! # middleware
//!
//! [`bot_core::Middleware`] implementations shared by bots built on handler-chain.

mod logging;

#[cfg(test)]
mod test;

pub use logging::LoggingMiddleware;
