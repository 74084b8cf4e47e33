//! Content digests used for verbatim-repeat detection.

use sha2::{Digest, Sha256};

/// SHA-256 of the trimmed body, lower-case hex.
///
/// Leading and trailing whitespace never makes two bodies distinct.
#[must_use]
pub fn content_hash(body: &str) -> String {
    hex::encode(Sha256::digest(body.trim().as_bytes()))
}
