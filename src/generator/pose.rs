// New-pose sprite generation
// Author: kelexine (https://github.com/kelexine)

use super::GeneratedImage;
use crate::error::Result;
use crate::image::{encode_image_file, image_data_url};
use crate::models::CharacterDescription;
use crate::openai::models::{
    ContentPart, InputContent, InputItem, ResponsesRequest, ToolDeclaration,
};
use crate::openai::OpenAiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Inputs for a new-pose generation call.
#[derive(Debug, Clone)]
pub struct NewPoseOptions {
    /// Reference sprite on disk.
    pub input_path: PathBuf,

    /// Free-form pose instruction.
    pub prompt: String,

    /// Description of the character whose pose is being changed; invariant
    /// details in it anchor the generation.
    pub description: CharacterDescription,
}

/// Generates a sprite with a changed pose from a reference sprite and its
/// structured description.
pub struct CharacterImageGenerator {
    client: Arc<OpenAiClient>,
}

impl CharacterImageGenerator {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    /// Generate a new-pose sprite. Stateless; no caching.
    pub async fn generate_new_pose(&self, options: &NewPoseOptions) -> Result<GeneratedImage> {
        let base64_image = encode_image_file(&options.input_path)?;
        let description_text = options.description.to_pretty_json()?;

        let full_prompt = format!(
            "{}\n\nCharacter description (JSON for the character whose pose you must change, keep all invariant details consistent):\n{}",
            options.prompt.trim(),
            description_text
        );

        let config = self.client.config();
        let request = ResponsesRequest {
            model: config.image_model.clone(),
            temperature: None,
            input: vec![InputItem {
                role: "user".to_string(),
                content: InputContent::Parts(vec![
                    ContentPart::InputText { text: full_prompt },
                    ContentPart::InputImage {
                        image_url: image_data_url(&base64_image),
                        detail: "high".to_string(),
                    },
                ]),
            }],
            tools: Some(vec![ToolDeclaration::sprite_image_generation()]),
        };

        info!("Generating new pose for {}", options.description.character_id);
        let base64 = self.client.generate_image(&request).await?;
        GeneratedImage::from_base64(base64)
    }
}
