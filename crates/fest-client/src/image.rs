//! Inline image payloads for event submissions.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{Error, Result};

/// MIME type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
  let ext = path
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);
  match ext.as_deref() {
    Some("png") => "image/png",
    Some("jpg" | "jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("svg") => "image/svg+xml",
    _ => "application/octet-stream",
  }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
  format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read `path` and encode it as a data URL.
pub async fn data_url_from_file(path: &Path) -> Result<String> {
  let bytes = tokio::fs::read(path).await.map_err(|source| Error::Image {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(data_url(mime_for(path), &bytes))
}
