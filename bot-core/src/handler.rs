//! Activity handler and middleware traits.
//!
//! [`ActivityHandler::on_turn`] routes an activity to the matching hook by type; every hook
//! defaults to a no-op so a bot only overrides what it reacts to.

use async_trait::async_trait;
use tracing::debug;

use crate::context::TurnContext;
use crate::error::Result;
use crate::types::{ActivityType, ChannelAccount};

/// Outcome of one turn through the chain, handed to middleware `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The handler ran to completion.
    Completed,
    /// A middleware stopped the turn before the handler ran.
    Stopped,
}

/// Reacts to activities. Override the hooks the bot cares about.
#[async_trait]
pub trait ActivityHandler: Send + Sync {
    /// Entry point for a turn: dispatches on the activity type.
    async fn on_turn(&self, ctx: &dyn TurnContext) -> Result<()> {
        match ctx.activity().activity_type {
            ActivityType::Message => self.on_message_activity(ctx).await,
            ActivityType::ConversationUpdate => self.on_conversation_update_activity(ctx).await,
            _ => self.on_unrecognized_activity_type(ctx).await,
        }
    }

    async fn on_message_activity(&self, _ctx: &dyn TurnContext) -> Result<()> {
        Ok(())
    }

    /// Calls `on_members_added` / `on_members_removed` when the change involves someone other than the bot.
    async fn on_conversation_update_activity(&self, ctx: &dyn TurnContext) -> Result<()> {
        let activity = ctx.activity();
        let recipient_id = activity.recipient_id();
        let not_bot = |m: &ChannelAccount| Some(m.id.as_str()) != recipient_id;

        if activity.members_added.iter().any(not_bot) {
            self.on_members_added(&activity.members_added, ctx).await?;
        }
        if activity.members_removed.iter().any(not_bot) {
            self.on_members_removed(&activity.members_removed, ctx).await?;
        }
        Ok(())
    }

    async fn on_members_added(
        &self,
        _members_added: &[ChannelAccount],
        _ctx: &dyn TurnContext,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_members_removed(
        &self,
        _members_removed: &[ChannelAccount],
        _ctx: &dyn TurnContext,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_unrecognized_activity_type(&self, ctx: &dyn TurnContext) -> Result<()> {
        debug!(
            activity_type = ?ctx.activity().activity_type,
            "Ignoring activity type"
        );
        Ok(())
    }
}

/// Runs around the handler. Chain runs all `before` in order, the handler, then all `after` in reverse.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Name used in chain log lines. Defaults to the implementing type's path.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Return false to stop the turn; the handler is then skipped.
    async fn before(&self, _ctx: &dyn TurnContext) -> Result<bool> {
        Ok(true)
    }

    async fn after(&self, _ctx: &dyn TurnContext, _outcome: TurnOutcome) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Activity, ResourceResponse};
    use std::sync::Mutex;

    struct StubContext {
        activity: Activity,
    }

    #[async_trait]
    impl TurnContext for StubContext {
        fn activity(&self) -> &Activity {
            &self.activity
        }

        async fn send_activity(&self, _activity: Activity) -> Result<ResourceResponse> {
            Ok(ResourceResponse::default())
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ActivityHandler for RecordingHandler {
        async fn on_message_activity(&self, _ctx: &dyn TurnContext) -> Result<()> {
            self.calls.lock().unwrap().push("message".to_string());
            Ok(())
        }

        async fn on_members_added(
            &self,
            members_added: &[ChannelAccount],
            _ctx: &dyn TurnContext,
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("added:{}", members_added.len()));
            Ok(())
        }

        async fn on_members_removed(
            &self,
            members_removed: &[ChannelAccount],
            _ctx: &dyn TurnContext,
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("removed:{}", members_removed.len()));
            Ok(())
        }
    }

    fn update(added: &[&str], removed: &[&str]) -> Activity {
        let mut activity = Activity::new(ActivityType::ConversationUpdate);
        activity.recipient = Some(ChannelAccount::new("bot"));
        activity.members_added = added.iter().map(|id| ChannelAccount::new(*id)).collect();
        activity.members_removed = removed.iter().map(|id| ChannelAccount::new(*id)).collect();
        activity
    }

    #[tokio::test]
    async fn test_message_routes_to_on_message_activity() {
        let handler = RecordingHandler::default();
        let ctx = StubContext {
            activity: Activity::text("hello"),
        };
        handler.on_turn(&ctx).await.unwrap();
        assert_eq!(*handler.calls.lock().unwrap(), vec!["message"]);
    }

    #[tokio::test]
    async fn test_conversation_update_routes_members() {
        let handler = RecordingHandler::default();
        let ctx = StubContext {
            activity: update(&["bot", "user-1"], &["user-2"]),
        };
        handler.on_turn(&ctx).await.unwrap();
        assert_eq!(*handler.calls.lock().unwrap(), vec!["added:2", "removed:1"]);
    }

    #[tokio::test]
    async fn test_bot_only_added_skips_members_added() {
        let handler = RecordingHandler::default();
        let ctx = StubContext {
            activity: update(&["bot"], &[]),
        };
        handler.on_turn(&ctx).await.unwrap();
        assert!(handler.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_type_is_ignored() {
        let handler = RecordingHandler::default();
        let ctx = StubContext {
            activity: Activity::new(ActivityType::Typing),
        };
        handler.on_turn(&ctx).await.unwrap();
        assert!(handler.calls.lock().unwrap().is_empty());
    }

    struct PassThrough;

    impl Middleware for PassThrough {}

    #[test]
    fn test_default_middleware_name_is_concrete_type() {
        let mw: std::sync::Arc<dyn Middleware> = std::sync::Arc::new(PassThrough);
        assert!(mw.name().ends_with("PassThrough"), "{}", mw.name());
    }
}
