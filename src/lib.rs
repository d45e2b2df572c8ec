// spriteforge - Character sprite description and generation toolkit
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod describer;
pub mod error;
pub mod generator;
pub mod image;
pub mod models;
pub mod openai;
pub mod utils;
