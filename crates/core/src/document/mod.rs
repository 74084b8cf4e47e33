//! Parsing of generated devotional documents.
//!
//! The pipeline is validate → normalize → extract: validation tolerates the
//! formatting variants generators produce, normalization collapses them into
//! one shape, and extraction only has to understand that shape.

mod extractor;
mod normalizer;
mod patterns;
#[cfg(test)]
mod test_fixtures;
mod validator;

pub use extractor::{ExtractError, extract_reference};
pub use normalizer::normalize;
pub use validator::{VERSES_MARKER_WINDOW, ValidationFailure, validate};
