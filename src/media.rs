use std::io::Write;

use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;

use crate::fetcher::Fetcher;
use crate::types::{CuratorError, Result};

/// MIME type and file suffix for an image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKind {
    pub mime: String,
    pub suffix: String,
}

/// Guess the image kind from the URL path. `None` means the media type
/// cannot be determined and the candidate must be discarded.
pub fn image_kind(url: &str) -> Option<ImageKind> {
    let parsed = Url::parse(url).ok()?;
    let mime = mime_guess::from_path(parsed.path()).first()?;

    let essence = mime.essence_str().to_string();
    let suffix = match essence.as_str() {
        "image/svg+xml" => "svg".to_string(),
        _ => mime.subtype().as_str().to_string(),
    };

    Some(ImageKind {
        mime: essence,
        suffix,
    })
}

/// Download an image into a named temporary file with the given suffix.
///
/// The returned handle owns the file; dropping it removes the file, so
/// the image never outlives the upload attempt.
pub async fn download_to_temp(
    fetcher: &Fetcher,
    url: &str,
    suffix: &str,
) -> Result<NamedTempFile> {
    let bytes = fetcher
        .fetch_bytes(url)
        .await
        .map_err(|e| CuratorError::ImageUnresolvable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    debug!("Downloaded image {} ({} bytes)", url, bytes.len());
    write_temp(&bytes, suffix)
}

fn write_temp(bytes: &[u8], suffix: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("curator-")
        .suffix(&format!(".{suffix}"))
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
