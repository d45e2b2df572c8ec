// spriteforge - Character sprite description and generation toolkit
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use spriteforge::cache::{CacheOptions, CachingDescriber};
use spriteforge::cli::{Args, Command};
use spriteforge::config::AppConfig;
use spriteforge::describer::{CharacterDescriber, OpenAiDescriber, PromptLibrary};
use spriteforge::generator::pose::NewPoseOptions;
use spriteforge::generator::variant::VariantOptions;
use spriteforge::generator::{
    CharacterImageGenerator, CharacterVariantGenerator, KeyframeSheetGenerator,
};
use spriteforge::models::CharacterDescription;
use spriteforge::openai::OpenAiClient;
use spriteforge::utils::logging;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting spriteforge v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Dispatch subcommand
    match args.command {
        Command::Describe { image, no_cache } => describe(&config, &image, no_cache).await?,
        Command::NewPose { image, prompt, out } => new_pose(&config, &image, &prompt, out).await?,
        Command::Variant {
            image,
            variant,
            out,
        } => generate_variant(&config, &image, &variant, out).await?,
        Command::Keyframes { image, prompt, out } => {
            keyframes(&config, &image, prompt.as_deref(), out).await?
        }
        Command::ClearCache => clear_cache(&config)?,
    }

    Ok(())
}

/// Build the describer, wrapped in the file cache unless disabled.
fn build_describer(
    config: &AppConfig,
    client: Arc<OpenAiClient>,
    use_cache: bool,
) -> Result<Box<dyn CharacterDescriber>> {
    let prompts = PromptLibrary::load(&config.resources)?;
    let describer = OpenAiDescriber::new(client, prompts);

    if use_cache && config.cache.enabled {
        let options = CacheOptions::new(config.cache.describer_dir())
            .with_ttl(Duration::from_secs(config.cache.ttl_minutes * 60));
        Ok(Box::new(CachingDescriber::new(describer, options)))
    } else {
        Ok(Box::new(describer))
    }
}

async fn describe(config: &AppConfig, image: &Path, no_cache: bool) -> Result<()> {
    let client = Arc::new(OpenAiClient::new(&config.openai)?);
    let describer = build_describer(config, client, !no_cache)?;

    let description = describer.describe_from_path(image).await?;
    println!("{}", description.to_pretty_json()?);
    Ok(())
}

async fn new_pose(
    config: &AppConfig,
    image: &Path,
    prompt: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let client = Arc::new(OpenAiClient::new(&config.openai)?);
    let describer = build_describer(config, client.clone(), true)?;
    let generator = CharacterImageGenerator::new(client);

    let description = describer.describe_from_path(image).await?;
    let generated = generator
        .generate_new_pose(&NewPoseOptions {
            input_path: image.to_path_buf(),
            prompt: prompt.to_string(),
            description,
        })
        .await?;

    let target = out.unwrap_or_else(|| default_output_path(config, "character_new_pose.png"));
    write_image(&target, &generated.bytes)?;
    Ok(())
}

async fn generate_variant(
    config: &AppConfig,
    image: &Path,
    variant_path: &Path,
    out: Option<PathBuf>,
) -> Result<()> {
    let client = Arc::new(OpenAiClient::new(&config.openai)?);
    let describer = build_describer(config, client.clone(), true)?;
    let generator = CharacterVariantGenerator::new(client);

    let original = describer.describe_from_path(image).await?;
    let variant: CharacterDescription = serde_json::from_str(&fs::read_to_string(variant_path)?)?;

    let generated = generator
        .generate_variant(&VariantOptions {
            input_path: image.to_path_buf(),
            original,
            variant,
        })
        .await?;

    let target = out.unwrap_or_else(|| default_output_path(config, "character_variant.png"));
    write_image(&target, &generated.bytes)?;
    Ok(())
}

async fn keyframes(
    config: &AppConfig,
    image: &Path,
    prompt: Option<&str>,
    out: Option<PathBuf>,
) -> Result<()> {
    let client = Arc::new(OpenAiClient::new(&config.openai)?);
    let generator = KeyframeSheetGenerator::new(client);

    let prompt = prompt.unwrap_or(spriteforge::generator::keyframes::DEFAULT_KEYFRAME_PROMPT);
    let generated = generator.generate_sheet(image, prompt).await?;

    let target = out.unwrap_or_else(|| default_output_path(config, "jump_keyframes_4frames.png"));
    write_image(&target, &generated.bytes)?;
    Ok(())
}

fn clear_cache(config: &AppConfig) -> Result<()> {
    let cache_dir = config.cache.describer_dir();

    if !cache_dir.exists() {
        println!("No cache directory found at: {}", cache_dir.display());
        return Ok(());
    }

    fs::remove_dir_all(&cache_dir)?;
    println!("Cleared character describer cache at: {}", cache_dir.display());
    Ok(())
}

fn default_output_path(config: &AppConfig, file_name: &str) -> PathBuf {
    PathBuf::from(&config.output.dir).join(file_name)
}

fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    println!("Wrote: {}", path.display());
    Ok(())
}
