// Animation keyframe sheet generation
// Author: kelexine (https://github.com/kelexine)

use super::GeneratedImage;
use crate::error::{Result, SpriteForgeError};
use crate::image::ImageFormat;
use crate::openai::OpenAiClient;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Default instruction: a square sheet of four jump keyframes.
pub const DEFAULT_KEYFRAME_PROMPT: &str = "You are an animation assistant. Create image with 4 keyframes for the animation sequence of a jumping character that I attached. \
- output a square image \
- make sure that all frames fit into the image \
- make sure that the anatomy of the character is accurate \
- follow this sequence: \
frame 1: character takes off \
frame 2: character reaches the peak of its jump \
frame 3: character is landing \
frame 4: character has landed";

/// Generates animation keyframe sheets via the image edit endpoint.
pub struct KeyframeSheetGenerator {
    client: Arc<OpenAiClient>,
}

impl KeyframeSheetGenerator {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    /// Generate a keyframe sheet from the sprite at `input_path`.
    ///
    /// The MIME type is detected from the file's magic bytes; the edit
    /// endpoint only accepts png/jpeg/webp.
    pub async fn generate_sheet(&self, input_path: &Path, prompt: &str) -> Result<GeneratedImage> {
        let bytes = fs::read(input_path)?;

        let format = ImageFormat::from_bytes(&bytes).ok_or_else(|| {
            SpriteForgeError::InvalidRequest(format!(
                "Could not detect a supported image format in {}",
                input_path.display()
            ))
        })?;

        if format == ImageFormat::Gif {
            return Err(SpriteForgeError::InvalidRequest(
                "Image edits accept png, jpeg, or webp input".to_string(),
            ));
        }

        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "sprite.png".to_string());

        info!("Generating keyframe sheet from {}", input_path.display());
        let base64 = self
            .client
            .edit_image(bytes, &file_name, format.mime_type(), prompt)
            .await?;

        GeneratedImage::from_base64(base64)
    }
}
