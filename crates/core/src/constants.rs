//! Shared constants for the devotional job.

/// Generation attempts per invocation before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Backend model variants, consulted by attempt index. Later attempts fall
/// back to more widely available variants; the last entry repeats.
pub const DEFAULT_MODEL_LADDER: &[&str] = &[
    "gemini-3-pro-preview",
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.0-pro",
    "gemini-2.0-flash",
];

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Per-request timeout for the generation backend.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 180;

/// Translation requested from the generator.
pub const DEFAULT_TRANSLATION: &str = "NVI";

pub const DATABASE_FILE: &str = "database.db";
pub const OUTBOX_FILE: &str = "outbox.txt";
pub const SEND_STATUS_FILE: &str = "send_status.json";
pub const BACKUP_DIR: &str = "backups";
