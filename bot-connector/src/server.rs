//! Webhook routes: `POST /api/messages` runs one turn through the chain, `GET /health` answers `ok`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use bot_core::Activity;
use handler_chain::HandlerChain;
use tracing::{error, instrument, warn};

use crate::client::ConnectorClient;
use crate::context::ConnectorTurnContext;

/// Shared state for the webhook handlers.
#[derive(Clone)]
pub struct ConnectorState {
    pub chain: HandlerChain,
    pub client: Arc<ConnectorClient>,
}

/// Builds the connector router.
pub fn router(state: ConnectorState) -> Router {
    Router::new()
        .route("/api/messages", post(post_messages))
        .route("/health", get(health))
        .with_state(state)
}

/// Parses the activity and awaits its turn. Malformed bodies get 400, failed turns 500.
#[instrument(skip(state, body))]
async fn post_messages(State(state): State<ConnectorState>, body: Bytes) -> StatusCode {
    let activity: Activity = match serde_json::from_slice(&body) {
        Ok(activity) => activity,
        Err(e) => {
            warn!(error = %e, "Rejected malformed activity");
            return StatusCode::BAD_REQUEST;
        }
    };

    let ctx = ConnectorTurnContext::new(activity, state.client.clone());
    match state.chain.handle(&ctx).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            error!(error = %e, "Turn failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
