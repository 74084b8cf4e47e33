//! Core types for the devotional job
//!
//! Reference parsing, generated-document handling and the configuration
//! shared by every other crate. Nothing in here does I/O beyond reading
//! environment variables.

mod backoff;
mod canon;
mod config;
pub mod constants;
mod devotional;
mod digest;
pub mod document;
pub mod env_config;
mod error;
mod markers;
mod reference;
mod template;

pub use backoff::{BackoffPolicy, FailureKind};
pub use canon::Testament;
pub use config::{
    AppConfig, BackendConfig, DataPaths, DeliveryConfig, ModelLadder, PipelineConfig,
};
pub use devotional::{Devotional, NewDevotional};
pub use digest::content_hash;
pub use error::*;
pub use markers::{MarkerSet, MarkerSpelling, Section};
pub use reference::{ReferenceKey, VerseRange, parse_reference};
pub use template::MessageTemplate;
