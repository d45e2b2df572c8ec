// Image encoding helpers
// Author: kelexine (https://github.com/kelexine)

use super::models::{validate_image_size, ImageFormat};
use crate::error::{Result, SpriteForgeError};
use base64::Engine;
use std::fs;
use std::path::Path;

/// Read an image file and return its base64 encoding.
///
/// The format is validated from magic bytes and the data is checked
/// against the upstream inline size limit before encoding.
pub fn encode_image_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;

    ImageFormat::from_bytes(&bytes).ok_or_else(|| {
        SpriteForgeError::InvalidRequest(format!(
            "Could not detect a supported image format in {}",
            path.display()
        ))
    })?;

    validate_image_size(bytes.len()).map_err(SpriteForgeError::InvalidRequest)?;

    Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
}

/// Decode a base64 image payload back into raw bytes.
pub fn decode_base64_image(data: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| SpriteForgeError::MalformedResponse(format!("Invalid base64 image data: {}", e)))
}

/// Build an inline `data:` URL from base64 image data.
///
/// The MIME type is detected from the decoded magic bytes; PNG is assumed
/// when the payload cannot be decoded cheaply (the API rejects it anyway).
pub fn image_data_url(base64_image: &str) -> String {
    let mime = base64::engine::general_purpose::STANDARD
        .decode(base64_image)
        .ok()
        .and_then(|bytes| ImageFormat::from_bytes(&bytes))
        .map(|f| f.mime_type())
        .unwrap_or("image/png");

    format!("data:{};base64,{}", mime, base64_image)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tiny 1x1 PNG (base64 encoded)
    const PNG_B64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn test_decode_roundtrip() {
        let bytes = decode_base64_image(PNG_B64).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(decode_base64_image("not-valid-base64!!!").is_err());
    }

    #[test]
    fn test_data_url_detects_png() {
        let url = image_data_url(PNG_B64);
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_encode_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        let bytes = decode_base64_image(PNG_B64).unwrap();
        std::fs::write(&path, &bytes).unwrap();

        let encoded = encode_image_file(&path).unwrap();
        assert_eq!(encoded, PNG_B64);
    }

    #[test]
    fn test_encode_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.bin");
        std::fs::write(&path, b"definitely not an image").unwrap();

        assert!(encode_image_file(&path).is_err());
    }
}
