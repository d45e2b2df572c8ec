// Bundled description template and prompt definitions
// Author: kelexine (https://github.com/kelexine)

use crate::config::ResourceConfig;
use crate::error::{Result, SpriteForgeError};
use crate::models::CharacterDescription;
use serde::Deserialize;
use serde_json::Value;
use std::fs;

const DEFAULT_TEMPLATE: &str = include_str!("../../resources/character_description_template.json");
const DEFAULT_DESCRIBE_PROMPT: &str =
    include_str!("../../resources/prompts/character_description_v1.json");
const DEFAULT_POSE_PROMPT: &str = include_str!("../../resources/prompts/pose_update_v1.json");

/// A prompt definition: a developer instruction plus a user-facing template
/// with `{{...}}` substitution slots.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptDefinition {
    pub developer: String,
    pub user_template: String,
}

/// The schema template and prompt definitions the describer works from.
///
/// Bundled copies are embedded in the binary; paths in [`ResourceConfig`]
/// override them.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    template: Value,
    describe_prompt: PromptDefinition,
    pose_prompt: PromptDefinition,
}

impl PromptLibrary {
    /// Load the library, honoring config path overrides.
    pub fn load(config: &ResourceConfig) -> Result<Self> {
        let template_json = read_resource(&config.template_path, DEFAULT_TEMPLATE)?;
        let template: Value = serde_json::from_str(&template_json)
            .map_err(|e| SpriteForgeError::Config(format!("Invalid description template: {}", e)))?;

        let describe_prompt: PromptDefinition =
            serde_json::from_str(&read_resource(&config.describe_prompt_path, DEFAULT_DESCRIBE_PROMPT)?)
                .map_err(|e| SpriteForgeError::Config(format!("Invalid describe prompt: {}", e)))?;

        let pose_prompt: PromptDefinition =
            serde_json::from_str(&read_resource(&config.pose_prompt_path, DEFAULT_POSE_PROMPT)?)
                .map_err(|e| SpriteForgeError::Config(format!("Invalid pose prompt: {}", e)))?;

        Ok(Self {
            template,
            describe_prompt,
            pose_prompt,
        })
    }

    /// The description schema template.
    pub fn template(&self) -> &Value {
        &self.template
    }

    /// Developer instruction for the describe operation.
    pub fn describe_developer_prompt(&self) -> &str {
        &self.describe_prompt.developer
    }

    /// User prompt for the describe operation, with the template JSON
    /// substituted in.
    pub fn describe_user_prompt(&self) -> Result<String> {
        let template_string = serde_json::to_string_pretty(&self.template)?;
        Ok(self
            .describe_prompt
            .user_template
            .replace("{{TEMPLATE_JSON}}", &template_string))
    }

    /// Developer instruction for the pose update operation.
    pub fn pose_developer_prompt(&self) -> &str {
        &self.pose_prompt.developer
    }

    /// User prompt for the pose update operation.
    pub fn pose_user_prompt(
        &self,
        description: &CharacterDescription,
        pose_prompt: &str,
    ) -> Result<String> {
        let description_json = description.to_pretty_json()?;
        Ok(self
            .pose_prompt
            .user_template
            .replace("{{DESCRIPTION_JSON}}", &description_json)
            .replace("{{POSE_PROMPT}}", pose_prompt))
    }
}

fn read_resource(override_path: &Option<String>, embedded: &str) -> Result<String> {
    match override_path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(embedded.to_string()),
    }
}
