//! Turn context: the inbound activity plus a way to answer it.
//!
//! [`TurnContext`] is transport-agnostic; `bot-connector` implements it over HTTP and tests use fakes.

use crate::error::Result;
use crate::types::{Activity, ResourceResponse};
use async_trait::async_trait;

/// One turn of a conversation. Implementations map to a transport (e.g. the Bot Framework REST API).
#[async_trait]
pub trait TurnContext: Send + Sync {
    /// The activity that started this turn.
    fn activity(&self) -> &Activity;

    /// Sends an activity back into the conversation of the inbound activity.
    async fn send_activity(&self, activity: Activity) -> Result<ResourceResponse>;

    /// Sends a plain text message.
    async fn send_text(&self, text: &str) -> Result<ResourceResponse> {
        self.send_activity(Activity::text(text)).await
    }
}
