// OpenAI-backed character describer
// Author: kelexine (https://github.com/kelexine)

use super::resources::PromptLibrary;
use super::CharacterDescriber;
use crate::error::{Result, SpriteForgeError};
use crate::image::image_data_url;
use crate::models::{merge_pose_update, normalize_against_template, CharacterDescription};
use crate::openai::models::{ContentPart, InputContent, InputItem, ResponsesRequest};
use crate::openai::OpenAiClient;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Describer backed by the OpenAI `/responses` vision API.
///
/// Raw model output is parsed as JSON and normalized against the bundled
/// template, so callers always receive a structurally complete description.
pub struct OpenAiDescriber {
    client: Arc<OpenAiClient>,
    prompts: PromptLibrary,
}

impl OpenAiDescriber {
    pub fn new(client: Arc<OpenAiClient>, prompts: PromptLibrary) -> Self {
        Self { client, prompts }
    }

    fn describe_request(&self, base64_image: &str) -> Result<ResponsesRequest> {
        let config = self.client.config();

        Ok(ResponsesRequest {
            model: config.describe_model.clone(),
            temperature: Some(0.0),
            input: vec![
                InputItem {
                    role: "user".to_string(),
                    content: InputContent::Parts(vec![
                        ContentPart::InputText {
                            text: self.prompts.describe_user_prompt()?,
                        },
                        ContentPart::InputImage {
                            image_url: image_data_url(base64_image),
                            detail: config.image_detail.clone(),
                        },
                    ]),
                },
                InputItem {
                    role: "developer".to_string(),
                    content: InputContent::Text(self.prompts.describe_developer_prompt().to_string()),
                },
            ],
            tools: None,
        })
    }

    fn pose_request(
        &self,
        description: &CharacterDescription,
        pose_prompt: &str,
    ) -> Result<ResponsesRequest> {
        let config = self.client.config();

        Ok(ResponsesRequest {
            model: config.describe_model.clone(),
            temperature: Some(0.0),
            input: vec![
                InputItem {
                    role: "user".to_string(),
                    content: InputContent::Parts(vec![ContentPart::InputText {
                        text: self.prompts.pose_user_prompt(description, pose_prompt)?,
                    }]),
                },
                InputItem {
                    role: "developer".to_string(),
                    content: InputContent::Text(self.prompts.pose_developer_prompt().to_string()),
                },
            ],
            tools: None,
        })
    }
}

#[async_trait]
impl CharacterDescriber for OpenAiDescriber {
    async fn describe_from_base64(&self, base64_image: &str) -> Result<CharacterDescription> {
        let request = self.describe_request(base64_image)?;
        let text = self.client.generate_text(&request).await?;

        let raw = parse_json_response(&text)?;
        let normalized = normalize_against_template(self.prompts.template(), &raw);

        serde_json::from_value(normalized).map_err(|e| {
            SpriteForgeError::MalformedResponse(format!(
                "Normalized description does not match the schema: {}",
                e
            ))
        })
    }

    async fn update_pose(
        &self,
        description: &CharacterDescription,
        pose_prompt: &str,
    ) -> Result<CharacterDescription> {
        let request = self.pose_request(description, pose_prompt)?;
        let text = self.client.generate_text(&request).await?;

        let candidate = parse_json_response(&text)?;
        debug!("Merging pose candidate into description {}", description.character_id);
        Ok(merge_pose_update(description, &candidate))
    }
}

/// Parse model output as JSON, tolerating Markdown code fences.
///
/// Failure here is a malformed-response error, distinct from upstream
/// transport failures.
pub(crate) fn parse_json_response(text: &str) -> Result<Value> {
    let stripped = strip_code_fences(text);
    serde_json::from_str(stripped).map_err(|e| {
        SpriteForgeError::MalformedResponse(format!("Model output is not valid JSON: {}", e))
    })
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the fence's language tag line and the closing fence
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let value = parse_json_response(r#"{"character_id": "c1"}"#).unwrap();
        assert_eq!(value["character_id"], "c1");
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"character_id\": \"c1\"}\n```";
        let value = parse_json_response(text).unwrap();
        assert_eq!(value["character_id"], "c1");
    }

    #[test]
    fn test_parse_garbage_is_malformed_response() {
        let err = parse_json_response("I cannot describe this image.").unwrap_err();
        assert!(matches!(err, SpriteForgeError::MalformedResponse(_)));
    }
}
