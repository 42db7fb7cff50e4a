//! Attachment downloader: resolves a Teams file download attachment and streams it into a
//! uniquely named local file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bot_core::{Attachment, FileDownloadInfo};
use tempfile::TempPath;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::config::DownloadConfig;

/// Why a download failed. `Display` is the human-readable cause.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid download payload: {0}")]
    Payload(String),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Fetch(reqwest::Error),

    #[error("Download failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Download task aborted: {0}")]
    Aborted(String),
}

/// Drops the request url; download urls carry an access token in their query.
impl From<reqwest::Error> for DownloadError {
    fn from(e: reqwest::Error) -> Self {
        DownloadError::Fetch(e.without_url())
    }
}

pub type DownloadResult = std::result::Result<DownloadedFile, DownloadError>;

/// A downloaded file. Removed from disk when dropped unless the downloader keeps files.
#[derive(Debug)]
pub struct DownloadedFile {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl DownloadedFile {
    /// Absolute path of the local file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the file outlives this value.
    pub fn is_kept(&self) -> bool {
        self.temp.is_none()
    }
}

/// Downloads file attachments with bounded connect/read timeouts.
pub struct AttachmentDownloader {
    http: reqwest::Client,
    dir: PathBuf,
    keep_files: bool,
}

impl AttachmentDownloader {
    /// Builds the HTTP client. A relative download dir is resolved against the current directory.
    pub fn new(config: &DownloadConfig) -> Result<Self, DownloadError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;
        let dir = match &config.dir {
            Some(dir) if dir.is_relative() => std::env::current_dir()?.join(dir),
            Some(dir) => dir.clone(),
            None => std::env::temp_dir(),
        };
        Ok(Self {
            http,
            dir,
            keep_files: config.keep_files,
        })
    }

    /// Directory new files are created in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs [`Self::download`] on its own task so a panic inside it becomes an error.
    pub async fn download_in_background(self: &Arc<Self>, attachment: Attachment) -> DownloadResult {
        let downloader = Arc::clone(self);
        join_download(tokio::spawn(async move { downloader.download(&attachment).await })).await
    }

    /// Downloads a file download attachment into a new file named after the attachment.
    #[instrument(skip(self, attachment), fields(attachment = ?attachment.name))]
    pub async fn download(&self, attachment: &Attachment) -> DownloadResult {
        let info = parse_download_info(attachment)?;
        let (prefix, suffix) = temp_name_parts(attachment.name.as_deref());

        let named = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;
        let (file, temp) = named.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        debug!(
            source = %redacted_url(&info.download_url),
            path = %temp.display(),
            "Fetching attachment"
        );
        let mut response = self.http.get(&info.download_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        let path = temp.to_path_buf();
        info!(path = %path.display(), bytes = written, "Attachment downloaded");

        let temp = if self.keep_files {
            temp.keep().map_err(|e| DownloadError::File(e.error))?;
            None
        } else {
            Some(temp)
        };
        Ok(DownloadedFile { path, temp })
    }
}

/// Waits for a spawned download; a panicked or cancelled task becomes [`DownloadError::Aborted`].
pub async fn join_download(handle: JoinHandle<DownloadResult>) -> DownloadResult {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(DownloadError::Aborted(e.to_string())),
    }
}

/// Host and path of a download url, without query or fragment.
pub fn redacted_url(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => format!("{}{}", parsed.host_str().unwrap_or(""), parsed.path()),
        Err(_) => "<invalid url>".to_string(),
    }
}

/// Reads the attachment's opaque content as [`FileDownloadInfo`].
pub fn parse_download_info(attachment: &Attachment) -> Result<FileDownloadInfo, DownloadError> {
    let content = attachment
        .content
        .clone()
        .ok_or_else(|| DownloadError::Payload("attachment has no content".to_string()))?;
    serde_json::from_value(content).map_err(|e| DownloadError::Payload(e.to_string()))
}

/// Splits a declared file name into a temp file prefix (base name) and suffix (`.ext`, or empty).
/// Directory components are ignored.
pub fn temp_name_parts(name: Option<&str>) -> (String, String) {
    let file_name = name
        .and_then(|n| Path::new(n).file_name())
        .map(Path::new)
        .unwrap_or_else(|| Path::new(""));
    let prefix = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = file_name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (prefix, suffix)
}
