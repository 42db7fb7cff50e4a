//! Recording implementation of [`bot_core::TurnContext`] for integration tests.
//!
//! Stores every sent activity so tests can assert on the reply texts without a channel.

use std::sync::Mutex;

use async_trait::async_trait;
use bot_core::{Activity, BotError, ResourceResponse, Result, TurnContext};

pub struct MockContext {
    activity: Activity,
    sent: Mutex<Vec<Activity>>,
    fail_sends: bool,
}

impl MockContext {
    pub fn new(activity: Activity) -> Self {
        Self {
            activity,
            sent: Mutex::new(Vec::new()),
            fail_sends: false,
        }
    }

    /// A context whose sends all fail with a connector error.
    pub fn failing(activity: Activity) -> Self {
        Self {
            fail_sends: true,
            ..Self::new(activity)
        }
    }

    /// Texts of all sent activities, in send order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.text.clone().unwrap_or_default())
            .collect()
    }
}

#[async_trait]
impl TurnContext for MockContext {
    fn activity(&self) -> &Activity {
        &self.activity
    }

    async fn send_activity(&self, activity: Activity) -> Result<ResourceResponse> {
        if self.fail_sends {
            return Err(BotError::Connector("channel unavailable".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(activity);
        Ok(ResourceResponse {
            id: format!("reply-{}", sent.len()),
        })
    }
}
