//! Job configuration, assembled once from the environment and passed down
//! explicitly. Nothing here is global.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backoff::BackoffPolicy;
use crate::constants::{
    BACKUP_DIR, DATABASE_FILE, DEFAULT_API_URL, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MODEL_LADDER, DEFAULT_TRANSLATION, OUTBOX_FILE, SEND_STATUS_FILE,
};
use crate::env_config::{env_flag, env_parse_with_default, first_env, require_env};
use crate::error::{CoreError, Result};
use crate::markers::MarkerSet;
use crate::template::MessageTemplate;

/// Ordered model variants; attempt `i` uses entry `min(i, len - 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLadder(Vec<String>);

impl Default for ModelLadder {
    fn default() -> Self {
        Self(DEFAULT_MODEL_LADDER.iter().map(|m| (*m).to_owned()).collect())
    }
}

impl ModelLadder {
    /// Returns `None` when no non-blank model is given.
    #[must_use]
    pub fn new<I, S>(models: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let models: Vec<String> = models
            .into_iter()
            .map(Into::into)
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .collect();
        if models.is_empty() { None } else { Some(Self(models)) }
    }

    /// Parse a comma-separated list.
    #[must_use]
    pub fn parse(csv: &str) -> Option<Self> {
        Self::new(csv.split(','))
    }

    #[must_use]
    pub fn model_for(&self, attempt: u32) -> &str {
        let last = self.0.len().saturating_sub(1);
        let index = usize::try_from(attempt).map_or(last, |a| a.min(last));
        self.0.get(index).map_or("", String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Policy knobs of the generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub markers: MarkerSet,
    pub template: MessageTemplate,
    pub max_attempts: u32,
    pub models: ModelLadder,
    pub backoff: BackoffPolicy,
    pub translation: String,
    /// Skip the "already sent today" short-circuit.
    pub test_mode: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            markers: MarkerSet::default(),
            template: MessageTemplate::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            models: ModelLadder::default(),
            backoff: BackoffPolicy::default(),
            translation: DEFAULT_TRANSLATION.to_owned(),
            test_mode: false,
        }
    }
}

impl PipelineConfig {
    /// # Errors
    /// Returns `CoreError::InvalidConfig` for a zero attempt budget or an
    /// empty model list.
    pub fn from_env() -> Result<Self> {
        let max_attempts = env_parse_with_default("DEVOTIONAL_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(CoreError::InvalidConfig(
                "DEVOTIONAL_MAX_ATTEMPTS must be at least 1".to_owned(),
            ));
        }
        let models = match std::env::var("DEVOTIONAL_MODELS") {
            Ok(csv) => ModelLadder::parse(&csv).ok_or_else(|| {
                CoreError::InvalidConfig("DEVOTIONAL_MODELS lists no models".to_owned())
            })?,
            Err(_) => ModelLadder::default(),
        };
        let translation = first_env(&["DEVOTIONAL_TRANSLATION"])
            .unwrap_or_else(|| DEFAULT_TRANSLATION.to_owned());

        Ok(Self {
            max_attempts,
            models,
            translation,
            test_mode: env_flag("TEST_MODE"),
            ..Self::default()
        })
    }
}

/// Files the job reads and writes, all under one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `DEVOTIONAL_DATA_DIR`, else `<local data dir>/devotional`.
    #[must_use]
    pub fn from_env() -> Self {
        let root = first_env(&["DEVOTIONAL_DATA_DIR"]).map_or_else(
            || dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("devotional"),
            PathBuf::from,
        );
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn database(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    #[must_use]
    pub fn outbox(&self) -> PathBuf {
        self.root.join(OUTBOX_FILE)
    }

    #[must_use]
    pub fn send_status(&self) -> PathBuf {
        self.root.join(SEND_STATUS_FILE)
    }

    #[must_use]
    pub fn backups(&self) -> PathBuf {
        self.root.join(BACKUP_DIR)
    }
}

/// Connection settings for the generation backend.
#[derive(Clone)]
pub struct BackendConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BackendConfig {
    /// # Errors
    /// Returns `CoreError::MissingEnv` when no API key is set.
    pub fn from_env() -> Result<Self> {
        let api_key = first_env(&["DEVOTIONAL_API_KEY", "GEMINI_API_KEY"])
            .ok_or(CoreError::MissingEnv("GEMINI_API_KEY"))?;
        let base_url = first_env(&["DEVOTIONAL_API_URL"])
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Ok(Self {
            api_key,
            base_url,
            timeout_secs: env_parse_with_default(
                "DEVOTIONAL_LLM_TIMEOUT_SECS",
                DEFAULT_LLM_TIMEOUT_SECS,
            ),
        })
    }
}

/// Where and how the external sender is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub group_id: String,
    /// Command line run after a successful generation. Split on whitespace
    /// with no shell parsing: quotes are not honoured, so the program path
    /// and arguments cannot contain spaces. Wrap anything more complex in a
    /// script.
    pub command: Option<String>,
}

impl DeliveryConfig {
    /// # Errors
    /// Returns `CoreError::MissingEnv` when `GROUP_ID` is unset.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            group_id: require_env("GROUP_ID")?,
            command: first_env(&["DEVOTIONAL_DELIVERY_CMD"]),
        })
    }
}

/// Everything `devotional run` needs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub delivery: DeliveryConfig,
    pub paths: DataPaths,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Credentials are checked first so a misconfigured job fails before
    /// touching anything.
    ///
    /// # Errors
    /// Returns a `CoreError` for missing credentials or invalid settings.
    pub fn from_env() -> Result<Self> {
        let delivery = DeliveryConfig::from_env()?;
        let backend = BackendConfig::from_env()?;
        Ok(Self {
            backend,
            delivery,
            paths: DataPaths::from_env(),
            pipeline: PipelineConfig::from_env()?,
        })
    }
}
