//! [`TurnContext`] over the Bot Framework REST API.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Activity, ResourceResponse, Result, TurnContext};

use crate::client::ConnectorClient;

/// Turn context for one inbound activity received on the webhook.
pub struct ConnectorTurnContext {
    activity: Activity,
    client: Arc<ConnectorClient>,
}

impl ConnectorTurnContext {
    pub fn new(activity: Activity, client: Arc<ConnectorClient>) -> Self {
        Self { activity, client }
    }
}

#[async_trait]
impl TurnContext for ConnectorTurnContext {
    fn activity(&self) -> &Activity {
        &self.activity
    }

    async fn send_activity(&self, activity: Activity) -> Result<ResourceResponse> {
        let outgoing = address_reply(&self.activity, activity);
        self.client.send(&outgoing).await
    }
}

/// Addresses `outgoing` as a reply to `inbound`: swaps from/recipient, copies conversation,
/// channel and service url, and replies to the inbound id unless a reply id is already set.
pub fn address_reply(inbound: &Activity, mut outgoing: Activity) -> Activity {
    outgoing.from = inbound.recipient.clone();
    outgoing.recipient = inbound.from.clone();
    outgoing.conversation = inbound.conversation.clone();
    outgoing.channel_id = inbound.channel_id.clone();
    outgoing.service_url = inbound.service_url.clone();
    if outgoing.reply_to_id.is_none() {
        outgoing.reply_to_id = inbound.id.clone();
    }
    if outgoing.locale.is_none() {
        outgoing.locale = inbound.locale.clone();
    }
    outgoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::{ChannelAccount, ConversationAccount};

    fn inbound() -> Activity {
        let mut activity = Activity::text("hi bot");
        activity.id = Some("in-1".to_string());
        activity.channel_id = Some("msteams".to_string());
        activity.service_url = Some("https://smba.example.com/".to_string());
        activity.from = Some(ChannelAccount::new("user-1"));
        activity.recipient = Some(ChannelAccount::new("bot-1"));
        activity.conversation = Some(ConversationAccount {
            id: "conv-1".to_string(),
            ..Default::default()
        });
        activity.locale = Some("en-US".to_string());
        activity
    }

    #[test]
    fn test_address_reply_swaps_accounts() {
        let reply = address_reply(&inbound(), Activity::text("hello"));

        assert_eq!(reply.from.as_ref().unwrap().id, "bot-1");
        assert_eq!(reply.recipient.as_ref().unwrap().id, "user-1");
        assert_eq!(reply.conversation_id(), Some("conv-1"));
        assert_eq!(reply.channel_id.as_deref(), Some("msteams"));
        assert_eq!(reply.service_url.as_deref(), Some("https://smba.example.com/"));
        assert_eq!(reply.reply_to_id.as_deref(), Some("in-1"));
        assert_eq!(reply.locale.as_deref(), Some("en-US"));
        assert_eq!(reply.text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_address_reply_keeps_explicit_reply_id() {
        let mut outgoing = Activity::text("hello");
        outgoing.reply_to_id = Some("other".to_string());
        let reply = address_reply(&inbound(), outgoing);
        assert_eq!(reply.reply_to_id.as_deref(), Some("other"));
    }
}
