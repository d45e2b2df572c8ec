//! Sprite image generation clients.
//!
//! Stateless, uncached wrappers around the OpenAI image tooling: each call
//! embeds JSON descriptions into a prompt, attaches the reference sprite,
//! and returns the generated image bytes.
//!
//! # Submodules
//!
//! - `pose`: New-pose generation from a reference sprite + description.
//! - `variant`: Character variant generation from original/variant descriptions.
//! - `keyframes`: Animation keyframe sheets via the image edit endpoint.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod keyframes;
pub mod pose;
pub mod variant;

pub use keyframes::KeyframeSheetGenerator;
pub use pose::CharacterImageGenerator;
pub use variant::CharacterVariantGenerator;

use crate::error::Result;
use crate::image::decode_base64_image;

/// A generated image in both transport and raw form.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Base64 payload as returned by the API.
    pub base64: String,

    /// Decoded image bytes, ready to write to disk.
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Build from an API base64 payload, decoding eagerly so transport
    /// corruption surfaces here rather than at file-write time.
    pub fn from_base64(base64: String) -> Result<Self> {
        let bytes = decode_base64_image(&base64)?;
        Ok(Self { base64, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_image_decodes() {
        let image = GeneratedImage::from_base64("QUJD".to_string()).unwrap();
        assert_eq!(image.bytes, b"ABC");
    }

    #[test]
    fn test_generated_image_rejects_bad_base64() {
        assert!(GeneratedImage::from_base64("!!!".to_string()).is_err());
    }
}
