//! Data model for structured character descriptions.
//!
//! # Submodules
//!
//! - `character`: The `CharacterDescription` record and its `PoseDescription`
//!   sub-record, as returned by the describe pipeline.
//! - `normalize`: Template-driven normalization of raw model output.
//! - `pose`: Type-checked merging of pose-only model edits.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod character;
pub mod normalize;
pub mod pose;

pub use character::{CharacterDescription, PoseDescription};
pub use normalize::normalize_against_template;
pub use pose::{merge_pose_candidate, merge_pose_update};
