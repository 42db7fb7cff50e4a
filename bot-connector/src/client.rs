//! Reply client for the Bot Framework REST API. Production code posts replies to the channel's
//! service url; tests point the service url at a local mock server.

use std::time::Duration;

use bot_core::{Activity, BotError, HandlerError, ResourceResponse, Result};
use reqwest::Url;
use tracing::{debug, instrument};

/// Thin wrapper around a reqwest client that posts activities to a conversation.
pub struct ConnectorClient {
    http: reqwest::Client,
}

impl ConnectorClient {
    /// Creates a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Connector(e.to_string()))?;
        Ok(Self { http })
    }

    /// Posts an already addressed activity. Uses the reply endpoint when `reply_to_id` is set.
    #[instrument(skip(self, activity))]
    pub async fn send(&self, activity: &Activity) -> Result<ResourceResponse> {
        let service_url = activity
            .service_url
            .as_deref()
            .ok_or(HandlerError::MissingServiceUrl)?;
        let conversation_id = activity
            .conversation_id()
            .ok_or(HandlerError::MissingConversation)?;
        let url = activities_url(service_url, conversation_id, activity.reply_to_id.as_deref())?;

        debug!(url = %url, "Posting activity");
        let response = self
            .http
            .post(url)
            .json(activity)
            .send()
            .await
            .map_err(|e| BotError::Connector(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Connector(format!(
                "Activity rejected with {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::Connector(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(ResourceResponse::default());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Builds `{service_url}/v3/conversations/{conversation_id}/activities[/{reply_to_id}]`.
/// Path segments are percent-encoded as needed.
pub fn activities_url(
    service_url: &str,
    conversation_id: &str,
    reply_to_id: Option<&str>,
) -> Result<Url> {
    let mut url = Url::parse(service_url)
        .map_err(|e| BotError::Connector(format!("Invalid service url {}: {}", service_url, e)))?;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            BotError::Connector(format!("Service url cannot be a base: {}", service_url))
        })?;
        segments
            .pop_if_empty()
            .extend(["v3", "conversations", conversation_id, "activities"]);
        if let Some(id) = reply_to_id {
            segments.push(id);
        }
    }
    Ok(url)
}
