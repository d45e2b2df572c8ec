//! OpenAI API client module.
//!
//! This is the only place that talks to the network. It shapes requests for
//! the `/responses` endpoint (text and tool-driven image generation) and the
//! `/images/edits` endpoint (keyframe sheets), and maps upstream failures to
//! the crate's error taxonomy.
//!
//! # Submodules
//!
//! - `client`: The HTTP client with auth, timeouts, and response decoding.
//! - `models`: Typed request/response structures for the REST API.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod client;
pub mod models;

pub use client::OpenAiClient;
