//! Utility functions and helpers for the spriteforge toolkit.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with security filters.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
