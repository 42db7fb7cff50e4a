//! Upload bot: welcomes new members and reports on downloaded file attachments.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Activity, ActivityHandler, Attachment, ChannelAccount, Result, TurnContext};
use futures::future::try_join_all;
use tracing::{debug, info, instrument, warn};

use crate::download::AttachmentDownloader;
use crate::file_info::{file_size, file_type};

pub const WELCOME_TEXT: &str = "Welcome! Post a message with an attachment and I'll download it!";
pub const PROMPT_TEXT: &str = "Post a message with an attachment and I'll download it!";
pub const DOWNLOAD_FAILED_TEXT: &str = "Failed to download the attachment";

/// Activity handler of the upload bot.
pub struct UploadBot {
    downloader: Arc<AttachmentDownloader>,
}

impl UploadBot {
    pub fn new(downloader: Arc<AttachmentDownloader>) -> Self {
        Self { downloader }
    }

    /// Downloads the attachment and builds the reply text. Never fails: errors become the failure text.
    async fn describe_download(&self, attachment: &Attachment) -> String {
        let name = attachment.name.clone().unwrap_or_default();
        match self
            .downloader
            .download_in_background(attachment.clone())
            .await
        {
            Ok(file) => {
                let size = file_size(file.path()).await;
                let file_type = file_type(file.path()).await;
                info!(
                    attachment = %name,
                    path = %file.path().display(),
                    size = size,
                    file_type = %file_type,
                    kept = file.is_kept(),
                    "Attachment inspected"
                );
                downloaded_text(&name, size, &file_type)
            }
            Err(e) => {
                warn!(attachment = %name, error = %e, "Failed to download attachment");
                DOWNLOAD_FAILED_TEXT.to_string()
            }
        }
    }
}

/// First attachment of the activity when it is a file download; later attachments are not considered.
pub fn download_attachment(activity: &Activity) -> Option<&Attachment> {
    activity
        .first_attachment()
        .filter(|attachment| attachment.is_file_download())
}

/// Reply sent after a successful download.
pub fn downloaded_text(name: &str, size: i64, file_type: &str) -> String {
    format!(
        "Downloaded file {}. It was {} bytes long and appears to be of type {}",
        name, size, file_type
    )
}

#[async_trait]
impl ActivityHandler for UploadBot {
    /// Welcomes every added member except the bot itself; sends run concurrently.
    #[instrument(skip(self, members_added, ctx))]
    async fn on_members_added(
        &self,
        members_added: &[ChannelAccount],
        ctx: &dyn TurnContext,
    ) -> Result<()> {
        let recipient_id = ctx.activity().recipient_id();
        let sends = members_added
            .iter()
            .filter(|member| Some(member.id.as_str()) != recipient_id)
            .map(|member| {
                debug!(member_id = %member.id, "Welcoming member");
                ctx.send_text(WELCOME_TEXT)
            });

        let sent = try_join_all(sends).await?;
        info!(welcomed = sent.len(), "Welcome messages sent");
        Ok(())
    }

    #[instrument(skip(self, ctx))]
    async fn on_message_activity(&self, ctx: &dyn TurnContext) -> Result<()> {
        let reply = match download_attachment(ctx.activity()) {
            Some(attachment) => self.describe_download(attachment).await,
            None => PROMPT_TEXT.to_string(),
        };
        ctx.send_text(&reply).await?;
        Ok(())
    }
}
