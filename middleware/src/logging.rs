use async_trait::async_trait;
use bot_core::{Middleware, Result, TurnContext, TurnOutcome};
use tracing::{debug, info, instrument};

/// Logs each inbound activity in before() and the turn outcome in after(); always continues.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    fn name(&self) -> &'static str {
        "logging"
    }

    #[instrument(skip(self, ctx))]
    async fn before(&self, ctx: &dyn TurnContext) -> Result<bool> {
        let activity = ctx.activity();
        info!(
            activity_id = %activity.id.as_deref().unwrap_or(""),
            activity_type = ?activity.activity_type,
            channel_id = %activity.channel_id.as_deref().unwrap_or("unknown"),
            from_id = %activity.from.as_ref().map(|f| f.id.as_str()).unwrap_or("unknown"),
            attachments = activity.attachments.len(),
            members_added = activity.members_added.len(),
            "Received activity"
        );
        Ok(true)
    }

    #[instrument(skip(self, ctx))]
    async fn after(&self, ctx: &dyn TurnContext, outcome: TurnOutcome) -> Result<()> {
        debug!(
            activity_id = ?ctx.activity().id,
            outcome = ?outcome,
            "Processed activity"
        );
        Ok(())
    }
}
