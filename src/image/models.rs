// Image format models and validation limits
// Author: kelexine (https://github.com/kelexine)

/// Supported sprite image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from magic bytes at the start of image data
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
            Some(ImageFormat::WebP)
        } else {
            None
        }
    }
}

/// Validation limits
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB inline limit

/// Validate image data size
pub fn validate_image_size(data_len: usize) -> Result<(), String> {
    if data_len > MAX_IMAGE_SIZE_BYTES {
        return Err(format!(
            "Image size {} bytes exceeds maximum of {} bytes (20MB)",
            data_len, MAX_IMAGE_SIZE_BYTES
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png_magic_bytes() {
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.extend_from_slice(&[0u8; 8]);
        assert_eq!(ImageFormat::from_bytes(&data), Some(ImageFormat::Png));
    }

    #[test]
    fn test_detect_webp_magic_bytes() {
        let data = b"RIFF\x00\x00\x00\x00WEBPVP8 ".to_vec();
        assert_eq!(ImageFormat::from_bytes(&data), Some(ImageFormat::WebP));
    }

    #[test]
    fn test_unknown_magic_bytes() {
        let data = b"BM\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00".to_vec();
        assert_eq!(ImageFormat::from_bytes(&data), None);
    }

    #[test]
    fn test_size_validation() {
        assert!(validate_image_size(1024).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES + 1).is_err());
    }
}
