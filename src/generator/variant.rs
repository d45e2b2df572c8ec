// Character variant sprite generation
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

/// Inputs for a variant generation call.
#[derive(Debug, Clone)]
pub struct VariantOptions {
    /// Reference sprite on disk, matching `original`.
    pub input_path: PathBuf,

    /// Description matching the reference sprite.
    pub original: CharacterDescription,

    /// Description of the desired variant.
    pub variant: CharacterDescription,
}

const VARIANT_RULES: &str = "You are a game art assistant that generates a new 2D character sprite variant from a base sprite.\n\n\
You are given:\n\
- A reference sprite image (the input image).\n\
- A JSON description of the original character that matches the reference sprite.\n\
- A JSON description of the desired character variant.\n\n\
Rules:\n\
- Use the original JSON and image as the canonical source of style and invariant details.\n\
- Compare the original and variant JSON objects.\n\
- Only change visual aspects that differ between the original and variant JSON.\n\
- Keep all other visual details identical (art style, proportions, colors, etc.).\n\
- The output should be a full-body sprite of the variant character on a transparent background in the same style as the reference image.\n";

/// Generates a character variant sprite by diffing two descriptions against
/// a reference sprite.
pub struct CharacterVariantGenerator {
    client: Arc<OpenAiClient>,
}

impl CharacterVariantGenerator {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    /// Generate a variant sprite. Stateless; no caching.
    pub async fn generate_variant(&self, options: &VariantOptions) -> Result<GeneratedImage> {
        let base64_image = encode_image_file(&options.input_path)?;
        let original_text = options.original.to_pretty_json()?;
        let variant_text = options.variant.to_pretty_json()?;

        let user_text = format!(
            "{}\nOriginal character JSON:\n{}\n\nTarget variant JSON:\n{}\n",
            VARIANT_RULES, original_text, variant_text
        );

        let config = self.client.config();
        let request = ResponsesRequest {
            model: config.image_model.clone(),
            temperature: None,
            input: vec![InputItem {
                role: "user".to_string(),
                content: InputContent::Parts(vec![
                    ContentPart::InputText { text: user_text },
                    ContentPart::InputImage {
                        image_url: image_data_url(&base64_image),
                        detail: "high".to_string(),
                    },
                ]),
            }],
            tools: Some(vec![ToolDeclaration::sprite_image_generation()]),
        };

        info!(
            "Generating variant {} from {}",
            options.variant.character_id, options.original.character_id
        );
        let base64 = self.client.generate_image(&request).await?;
        GeneratedImage::from_base64(base64)
    }
}
