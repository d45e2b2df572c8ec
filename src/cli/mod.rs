// CLI module for spriteforge
// Author: kelexine (https://github.com/kelexine)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// spriteforge - Character sprite description and generation toolkit
#[derive(Parser, Debug)]
#[command(name = "spriteforge", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Describe a character sprite as structured JSON
    Describe {
        /// Path to the sprite image
        #[arg(long)]
        image: PathBuf,

        /// Bypass the description cache for this call
        #[arg(long)]
        no_cache: bool,
    },

    /// Generate a sprite with a changed pose
    NewPose {
        /// Path to the reference sprite image
        #[arg(long)]
        image: PathBuf,

        /// Pose instruction for the model
        #[arg(long)]
        prompt: String,

        /// Output image path (default: <output dir>/character_new_pose.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a character variant sprite
    Variant {
        /// Path to the reference sprite image
        #[arg(long)]
        image: PathBuf,

        /// Path to the variant description JSON
        #[arg(long)]
        variant: PathBuf,

        /// Output image path (default: <output dir>/character_variant.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate an animation keyframe sheet
    Keyframes {
        /// Path to the reference sprite image
        #[arg(long)]
        image: PathBuf,

        /// Custom sheet instruction (default: 4-frame jump sequence)
        #[arg(long)]
        prompt: Option<String>,

        /// Output image path (default: <output dir>/jump_keyframes_4frames.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete the description cache directory
    ClearCache,
}
