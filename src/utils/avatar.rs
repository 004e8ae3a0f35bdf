//! Avatar encoding.
//!
//! Turns an image file into the base64 data URL stored in the profile. The
//! image itself is not decoded or resized.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

use crate::error::{ProfileError, Result};

/// MIME type guessed from the file extension.
pub fn mime_for_path(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(ProfileError::InvalidInput(format!(
            "Unsupported avatar format '{}'. Use png, jpg, gif, webp or svg",
            path.display()
        ))),
    }
}

/// Build a `data:<mime>;base64,<payload>` URL from raw bytes.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file and encode it as a data URL.
pub fn encode_avatar_file(path: &Path) -> Result<String> {
    let mime = mime_for_path(path)?;
    let bytes = std::fs::read(path)?;
    log::debug!("Encoding {} ({} bytes) as {}", path.display(), bytes.len(), mime);
    Ok(encode_data_url(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_data_url() {
        assert_eq!(
            encode_data_url("image/png", b"hello"),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("me.JPG")).unwrap(), "image/jpeg");
        assert!(mime_for_path(Path::new("notes.txt")).is_err());
        assert!(mime_for_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_encode_avatar_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.gif");
        std::fs::write(&path, [0x47, 0x49, 0x46]).unwrap();

        assert_eq!(
            encode_avatar_file(&path).unwrap(),
            "data:image/gif;base64,R0lG"
        );
    }
}
