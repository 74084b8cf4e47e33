//! The daily job: generate, vet, stage, persist, hand off.

use chrono::NaiveDate;
use devotional_core::document::{ExtractError, ValidationFailure, extract_reference, normalize, validate};
use devotional_core::{FailureKind, NewDevotional, PipelineConfig, content_hash};
use devotional_llm::{GenerationBackend, build_devotional_prompt};
use devotional_storage::HistoryStore;
use thiserror::Error;
use tracing::Instrument as _;

use crate::delivery::DeliveryHook;
use crate::error::ServiceError;
use crate::novelty::{hash_repeated, overlaps_history};
use crate::outbox::Outbox;

/// Why one generation attempt was discarded.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("empty response")]
    EmptyResponse,
    #[error("invalid format: {0}")]
    Invalid(#[from] ValidationFailure),
    #[error("{0}")]
    NoReference(#[from] ExtractError),
    #[error("verses overlap a previous devotional: {reference}")]
    Overlap { reference: String },
    #[error("content already used (hash {hash})")]
    RepeatedHash { hash: String },
}

/// A candidate that passed every check.
#[derive(Debug)]
struct Accepted {
    body: String,
    reference: String,
    hash: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// A devotional is already recorded for the date; nothing was generated.
    AlreadySent { date: NaiveDate },
    Generated(Generated),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub date: NaiveDate,
    pub reference: String,
    pub content_hash: String,
    /// Rendered message, as staged in the outbox.
    pub message: String,
    /// Attempts used, including the accepted one.
    pub attempts: u32,
    pub model: String,
    /// `false` when storage already had this date or hash.
    pub stored: bool,
}

/// One invocation of the pipeline against a backend and a history store.
pub struct DailyJob<B, S> {
    backend: B,
    store: S,
    outbox: Outbox,
    config: PipelineConfig,
    delivery: Option<DeliveryHook>,
}

impl<B, S> DailyJob<B, S>
where
    B: GenerationBackend,
    S: HistoryStore,
{
    #[must_use]
    pub fn new(backend: B, store: S, outbox: Outbox, config: PipelineConfig) -> Self {
        Self { backend, store, outbox, config, delivery: None }
    }

    /// Run `hook` after a generation this run recorded, or after every
    /// generation in test mode.
    #[must_use]
    pub fn with_delivery(mut self, hook: Option<DeliveryHook>) -> Self {
        self.delivery = hook;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Produce, stage and persist the devotional for `today`.
    ///
    /// # Errors
    /// `GenerationExhausted` when no candidate survives the attempt budget;
    /// `Staging` or `Storage` when the accepted message cannot be written.
    /// Nothing is staged or persisted on the exhausted path.
    pub async fn run(&self, today: NaiveDate) -> Result<JobOutcome, ServiceError> {
        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("devotional_run", %run_id, date = %today);
        self.run_inner(today).instrument(span).await
    }

    async fn run_inner(&self, today: NaiveDate) -> Result<JobOutcome, ServiceError> {
        if self.config.test_mode {
            tracing::info!("test mode: skipping already-sent check");
        } else if self.store.already_sent(today).await? {
            tracing::info!("devotional for today already sent, nothing to do");
            return Ok(JobOutcome::AlreadySent { date: today });
        }

        let (accepted, attempts, model) = self.generate(today).await?;
        let message = self.config.template.render(&accepted.body);

        self.outbox.stage(&message).await.map_err(ServiceError::Staging)?;

        let record =
            NewDevotional::new(today, &accepted.body, message.clone(), Some(accepted.reference.clone()));
        let stored = self.store.save_devotional(&record).await?;
        if stored {
            tracing::info!(reference = %accepted.reference, attempts, "devotional generated and stored");
        }

        // Only the run that recorded the date may deliver it.
        let hook = self.delivery.as_ref().filter(|_| stored || self.config.test_mode);
        if hook.is_none() && self.delivery.is_some() {
            tracing::warn!(
                reference = %accepted.reference,
                "date already recorded by another run, skipping delivery"
            );
        }
        if let Some(hook) = hook {
            match hook.run().await {
                Ok(report) if report.succeeded() => {
                    tracing::info!(exit_code = ?report.exit_code, "delivery completed");
                },
                Ok(report) => {
                    let error = report.status.as_ref().and_then(|s| s.error.as_deref());
                    tracing::warn!(exit_code = ?report.exit_code, error, "delivery reported failure");
                },
                Err(e) => tracing::warn!(error = %e, "delivery command failed"),
            }
        }

        Ok(JobOutcome::Generated(Generated {
            date: today,
            reference: accepted.reference,
            content_hash: accepted.hash,
            message,
            attempts,
            model,
            stored,
        }))
    }

    /// The retry loop. Returns the accepted candidate, the number of attempts
    /// used and the model that produced it.
    async fn generate(&self, today: NaiveDate) -> Result<(Accepted, u32, String), ServiceError> {
        let config = &self.config;
        let prompt = build_devotional_prompt(today, &config.markers, &config.translation);
        let mut last_rejection: Option<Rejection> = None;

        for attempt in 0..config.max_attempts {
            let model = config.models.model_for(attempt);
            let number = attempt.saturating_add(1);
            tracing::info!(attempt = number, max = config.max_attempts, model, "requesting devotional");

            let rejection = match self.backend.generate(model, &prompt).await {
                Err(e) => {
                    let kind =
                        if e.is_transient() { FailureKind::Server } else { FailureKind::Unexpected };
                    let wait = config.backoff.delay(kind, attempt);
                    tracing::warn!(
                        attempt = number,
                        model,
                        error = %e,
                        wait_secs = wait.as_secs_f64(),
                        "backend call failed"
                    );
                    if number < config.max_attempts {
                        tokio::time::sleep(wait).await;
                    }
                    Rejection::Backend(e.to_string())
                },
                Ok(None) => Rejection::EmptyResponse,
                Ok(Some(text)) => match self.vet(&text).await? {
                    Ok(accepted) => return Ok((accepted, number, model.to_owned())),
                    Err(rejection) => rejection,
                },
            };

            if !matches!(rejection, Rejection::Backend(_)) {
                tracing::warn!(attempt = number, model, reason = %rejection, "candidate rejected");
            }
            last_rejection = Some(rejection);
        }

        Err(ServiceError::GenerationExhausted {
            attempts: config.max_attempts,
            last_rejection: last_rejection.map(|r| r.to_string()),
        })
    }

    /// Validate, normalize, extract and check a candidate against history.
    /// The outer `Result` carries storage failures; the inner one the verdict.
    async fn vet(&self, text: &str) -> Result<Result<Accepted, Rejection>, ServiceError> {
        let markers = &self.config.markers;
        let text = text.trim();
        tracing::debug!(candidate = text, "generated candidate");

        if let Err(failure) = validate(text, markers) {
            return Ok(Err(failure.into()));
        }
        let body = normalize(text, markers);
        let reference = match extract_reference(&body, markers) {
            Ok(reference) => reference,
            Err(e) => return Ok(Err(e.into())),
        };

        if overlaps_history(&self.store, &reference).await? {
            return Ok(Err(Rejection::Overlap { reference }));
        }
        let hash = content_hash(&body);
        if hash_repeated(&self.store, &hash).await? {
            return Ok(Err(Rejection::RepeatedHash { hash }));
        }

        Ok(Ok(Accepted { body, reference, hash }))
    }
}
