//! Generation backend for the devotional job
//!
//! An OpenAI-compatible chat completions client behind the
//! [`GenerationBackend`] trait, plus the devotional prompt.

pub mod ai_types;
mod backend;
mod client;
mod error;
mod prompt;


pub use backend::GenerationBackend;
pub use client::{LlmClient, truncate};
pub use error::LlmError;
pub use prompt::build_devotional_prompt;
