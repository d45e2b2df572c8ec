//! Configuration data structures for the spriteforge toolkit.
//!
//! This module defines the schema for the application settings, including
//! upstream OpenAI API parameters, cache lifecycle, resource overrides,
//! and logging options.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Upstream OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Description cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Overrides for bundled prompt/template resources.
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output location for generated images.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the upstream OpenAI API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API credential. Usually left empty here and supplied via the
    /// `OPENAI_API_KEY` environment variable instead.
    #[serde(default)]
    pub api_key: String,

    /// Base URL for the OpenAI REST API.
    /// Default: `https://api.openai.com/v1`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model used for image description (vision → JSON).
    /// Default: `gpt-4.1-mini`
    #[serde(default = "default_describe_model")]
    pub describe_model: String,

    /// Model used for sprite image generation.
    /// Default: `gpt-5`
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Model used for image edits (keyframe sheets).
    /// Default: `gpt-image-1`
    #[serde(default = "default_edit_model")]
    pub edit_model: String,

    /// Connection and request timeout in seconds.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Vision input detail level (`low`, `high`, `auto`).
    /// Default: `high`
    #[serde(default = "default_image_detail")]
    pub image_detail: String,
}

/// Settings for the file-backed description cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether description results are cached at all.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Root directory for cache storage.
    /// Default: `~/.spriteforge/cache`
    #[serde(default = "default_cache_root")]
    pub root_dir: String,

    /// Maximum age of a cache entry before it is refreshed.
    /// Default: `60` minutes
    #[serde(default = "default_cache_ttl_minutes")]
    pub ttl_minutes: u64,
}

impl CacheConfig {
    /// Directory holding the character describer's cache entries.
    pub fn describer_dir(&self) -> PathBuf {
        PathBuf::from(&self.root_dir).join("character-describer")
    }
}

/// Optional overrides for the bundled JSON resources.
///
/// When a path is unset the copy embedded in the binary is used.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourceConfig {
    /// Path to the character description template JSON.
    #[serde(default)]
    pub template_path: Option<String>,

    /// Path to the image-description prompt definition JSON.
    #[serde(default)]
    pub describe_prompt_path: Option<String>,

    /// Path to the pose-update prompt definition JSON.
    #[serde(default)]
    pub pose_prompt_path: Option<String>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Settings for where generated images land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated images are written to.
    /// Default: `output`
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

// Default trait implementations linking to custom logic

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            describe_model: default_describe_model(),
            image_model: default_image_model(),
            edit_model: default_edit_model(),
            timeout_seconds: default_timeout(),
            image_detail: default_image_detail(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root_dir: default_cache_root(),
            ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_describe_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_image_model() -> String {
    "gpt-5".to_string()
}

fn default_edit_model() -> String {
    "gpt-image-1".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_image_detail() -> String {
    "high".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cache_root() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".spriteforge")
        .join("cache")
        .to_string_lossy()
        .to_string()
}

fn default_cache_ttl_minutes() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}
