//! Sprite image handling for the describe/generate pipeline.
//!
//! This module covers reading reference sprites from disk, base64
//! encoding/decoding for inline API transport, MIME type detection,
//! and size validation against the upstream inline-image limit.
//!
//! # Submodules
//!
//! - `models`: Format constants and validation constraints for image data.
//! - `encode`: File/byte conversion helpers used by the clients.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod encode;
pub mod models;

pub use encode::{decode_base64_image, encode_image_file, image_data_url};
pub use models::ImageFormat;
