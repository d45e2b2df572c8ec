// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{Result, SpriteForgeError};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&Self::default_config_path()).required(false))
            // Override with environment variables (prefix: SPRITEFORGE_)
            .add_source(Environment::with_prefix("SPRITEFORGE").separator("_"))
            .build()
            .map_err(|e| SpriteForgeError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SpriteForgeError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".spriteforge")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

impl OpenAiConfig {
    /// Resolve the API credential, falling back to the `OPENAI_API_KEY`
    /// process environment variable when the config value is empty.
    ///
    /// A missing credential is a fatal configuration error at first use.
    pub fn resolve_api_key(&self) -> Result<String> {
        if !self.api_key.trim().is_empty() {
            return Ok(self.api_key.clone());
        }

        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(SpriteForgeError::Config(
                "Missing OPENAI_API_KEY. Add it to your environment or set openai.api_key in config.toml".to_string(),
            )),
        }
    }
}
