// OpenAI REST API type definitions
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Request body for the `/responses` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    /// Target model name (e.g. `gpt-4.1-mini`).
    pub model: String,

    /// Sampling temperature; pinned to 0 for deterministic descriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Conversation input items.
    pub input: Vec<InputItem>,

    /// Tool declarations (image generation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDeclaration>>,
}

/// A single input item in a `/responses` request.
#[derive(Debug, Clone, Serialize)]
pub struct InputItem {
    /// `user` or `developer`.
    pub role: String,

    /// Either a bare instruction string or a list of content parts.
    pub content: InputContent,
}

/// Content of an input item.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InputContent {
    /// Plain instruction text (developer messages).
    Text(String),

    /// Mixed text/image parts (user messages).
    Parts(Vec<ContentPart>),
}

/// Individual content part of a user input item.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content part.
    InputText { text: String },

    /// Inline image content part (`data:` URL).
    InputImage {
        image_url: String,

        /// Vision detail level (`low`, `high`, `auto`).
        detail: String,
    },
}

/// Tool declaration enabling server-side image generation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDeclaration {
    ImageGeneration {
        input_fidelity: String,
        background: String,
    },
}

impl ToolDeclaration {
    /// The image generation tool as used for sprite work: high input
    /// fidelity against the reference image, transparent background.
    pub fn sprite_image_generation() -> Self {
        ToolDeclaration::ImageGeneration {
            input_fidelity: "high".to_string(),
            background: "transparent".to_string(),
        }
    }
}

/// Response body of the `/responses` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

/// A single output item in a `/responses` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    /// Assistant message with text content.
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },

    /// Result of a server-side image generation tool call.
    ImageGenerationCall {
        #[serde(default)]
        status: Option<String>,

        /// Base64 image payload, absent while in progress or on failure.
        #[serde(default)]
        result: Option<String>,
    },

    /// Output kinds this client doesn't consume (reasoning, tool traces).
    #[serde(other)]
    Other,
}

/// Content block inside an assistant message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputContent {
    OutputText { text: String },

    #[serde(other)]
    Other,
}

impl ResponsesResponse {
    /// Concatenate all assistant text output.
    pub fn output_text(&self) -> String {
        let mut text = String::new();
        for item in &self.output {
            if let OutputItem::Message { content } = item {
                for block in content {
                    if let OutputContent::OutputText { text: t } = block {
                        text.push_str(t);
                    }
                }
            }
        }
        text
    }

    /// Base64 payloads of all completed image generation calls.
    pub fn image_results(&self) -> Vec<&str> {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::ImageGenerationCall {
                    result: Some(data), ..
                } => Some(data.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Response body of the `/images/edits` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEditResponse {
    #[serde(default)]
    pub data: Vec<ImageEditDatum>,
}

/// One generated image from an edit call.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEditDatum {
    #[serde(default)]
    pub b64_json: Option<String>,
}
