//! Size and type probes for downloaded files. Both degrade to a sentinel instead of failing.

use std::path::Path;

use tokio::io::AsyncReadExt;

/// Returned by [`file_type`] when no type can be determined.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Bytes read from the start of a file for signature sniffing.
const SNIFF_LEN: u64 = 8192;

/// File size in bytes, or -1 if the file cannot be stat'ed.
pub async fn file_size(path: &Path) -> i64 {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len() as i64,
        Err(_) => -1,
    }
}

/// MIME type by magic bytes, falling back to the file extension; [`UNKNOWN_TYPE`] otherwise.
pub async fn file_type(path: &Path) -> String {
    let mut head = Vec::new();
    let read = match tokio::fs::File::open(path).await {
        Ok(file) => file.take(SNIFF_LEN).read_to_end(&mut head).await,
        Err(e) => Err(e),
    };
    if read.is_err() {
        return UNKNOWN_TYPE.to_string();
    }

    if let Some(kind) = infer::get(&head) {
        return kind.mime_type().to_string();
    }
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}
