//! services/client/src/adapters/decoder.rs
//!
//! Reads local files and turns them into inline `data:` URLs.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use skimmly_core::domain::UploadFile;
use skimmly_core::ports::{FileDecoder, PortError, PortResult};
use std::path::Path;

#[derive(Clone, Default)]
pub struct FsImageDecoder;

#[async_trait]
impl FileDecoder for FsImageDecoder {
    async fn read_as_data_url(&self, file: &UploadFile) -> PortResult<String> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", file.path.display(), e)))?;
        Ok(format!("data:{};base64,{}", file.mime_type, STANDARD.encode(bytes)))
    }
}

/// Describes a local file the way a browser file picker would.
pub fn upload_from_path(path: &Path) -> UploadFile {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let mime_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        _ => "application/octet-stream",
    };
    UploadFile {
        name,
        mime_type: mime_type.to_string(),
        path: path.to_path_buf(),
    }
}
