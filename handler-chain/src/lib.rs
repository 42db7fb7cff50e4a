//! # Handler chain
//!
//! Runs a sequence of middleware (before/after) around one [`ActivityHandler`] for each turn.
//! Middleware can stop the turn before the handler runs; after callbacks run in reverse order.

use bot_core::{ActivityHandler, Middleware, Result, TurnContext, TurnOutcome};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Middleware around a single activity handler. Cheap to clone; shared across requests.
#[derive(Clone)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handler: Arc<dyn ActivityHandler>,
}

impl HandlerChain {
    /// Creates a chain with no middleware around `handler`.
    pub fn new(handler: Arc<dyn ActivityHandler>) -> Self {
        Self {
            middleware: Vec::new(),
            handler,
        }
    }

    /// Appends a middleware (runs before the handler, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Runs middleware before, the handler turn, then middleware after in reverse.
    #[instrument(skip(self, ctx))]
    pub async fn handle(&self, ctx: &dyn TurnContext) -> Result<TurnOutcome> {
        let activity = ctx.activity();
        let activity_id = activity.id.as_deref().unwrap_or("");
        let conversation_id = activity.conversation_id().unwrap_or("");

        info!(
            activity_id = %activity_id,
            conversation_id = %conversation_id,
            activity_type = ?activity.activity_type,
            "step: turn started"
        );

        let mut outcome = TurnOutcome::Completed;
        for mw in &self.middleware {
            if !mw.before(ctx).await? {
                info!(
                    activity_id = %activity_id,
                    middleware = %mw.name(),
                    "step: middleware before returned false, turn stopped"
                );
                outcome = TurnOutcome::Stopped;
                break;
            }
        }

        if outcome == TurnOutcome::Completed {
            if let Err(e) = self.handler.on_turn(ctx).await {
                error!(activity_id = %activity_id, error = %e, "Activity handler failed");
                return Err(e);
            }
        }

        for mw in self.middleware.iter().rev() {
            mw.after(ctx, outcome).await?;
        }

        info!(
            activity_id = %activity_id,
            conversation_id = %conversation_id,
            outcome = ?outcome,
            "step: turn finished"
        );

        Ok(outcome)
    }
}
