use crate::error::{GenerationError, GenerationResult};
use crate::types::UploadedImage;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Reads and base64-encodes every file concurrently.
///
/// Fails on the first unreadable file; no partial result is returned. Output
/// order matches `paths`. File type and size are not checked here, the model
/// rejects what it cannot use.
pub async fn encode_images(paths: &[PathBuf]) -> GenerationResult<Vec<UploadedImage>> {
    try_join_all(paths.iter().map(|path| encode_image(path))).await
}

pub async fn encode_image(path: &Path) -> GenerationResult<UploadedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| GenerationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "encoded image");

    Ok(UploadedImage {
        mime_type: mime_type_for_path(path).to_string(),
        data: STANDARD.encode(&bytes),
    })
}

pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("bmp") => "image/bmp",
        _ => FALLBACK_MIME_TYPE,
    }
}
