//! Character description operations.
//!
//! The [`CharacterDescriber`] trait is the seam between callers and the
//! remote model: the caching proxy wraps any implementation of it, and
//! tests substitute a fake. [`OpenAiDescriber`] is the real implementation
//! backed by the `/responses` vision API.
//!
//! # Submodules
//!
//! - `remote`: OpenAI-backed describer (prompting, parsing, normalization).
//! - `resources`: Bundled template and prompt definitions.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod remote;
pub mod resources;

pub use remote::OpenAiDescriber;
pub use resources::{PromptDefinition, PromptLibrary};

use crate::error::Result;
use crate::models::CharacterDescription;
use async_trait::async_trait;
use std::path::Path;

/// Capability interface for describing sprites and editing poses.
///
/// All operations are idempotent and semantically pure for identical
/// inputs, which is what makes them cacheable.
#[async_trait]
pub trait CharacterDescriber: Send + Sync {
    /// Describe a sprite supplied as base64-encoded image bytes.
    async fn describe_from_base64(&self, base64_image: &str) -> Result<CharacterDescription>;

    /// Describe a sprite on disk.
    ///
    /// Reads and encodes the file, then delegates to
    /// [`describe_from_base64`](Self::describe_from_base64) so caching
    /// implementations see the same code path. Filesystem errors surface
    /// to the caller.
    async fn describe_from_path(&self, path: &Path) -> Result<CharacterDescription> {
        let base64_image = crate::image::encode_image_file(path)?;
        self.describe_from_base64(&base64_image).await
    }

    /// Apply a pose-only edit to an existing description.
    ///
    /// Only the pose sub-record of the result may differ from
    /// `description`; all other fields are returned unchanged.
    async fn update_pose(
        &self,
        description: &CharacterDescription,
        pose_prompt: &str,
    ) -> Result<CharacterDescription>;
}
