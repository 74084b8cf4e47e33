use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use devotional_core::{BackoffPolicy, ModelLadder, NewDevotional, PipelineConfig, content_hash};
use devotional_llm::{GenerationBackend, LlmError};
use devotional_storage::Storage;
use tempfile::TempDir;

use crate::{DailyJob, JobOutcome, Outbox, ServiceError};

/// Backend that replays a fixed script and records the models it was asked for.
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Option<String>, LlmError>>>,
    models: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(replies: Vec<Result<Option<String>, LlmError>>) -> Self {
        Self { replies: Mutex::new(replies.into()), models: Mutex::new(Vec::new()) }
    }

    #[expect(clippy::unwrap_used, reason = "test code")]
    fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl<'a> GenerationBackend for &'a ScriptedBackend {
    #[expect(clippy::unwrap_used, reason = "test code")]
    async fn generate(&self, model: &str, _prompt: &str) -> Result<Option<String>, LlmError> {
        self.models.lock().unwrap().push(model.to_owned());
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

fn document(reference: &str, reflection: &str) -> String {
    format!(
        "[VERSICULOS]

{reference}

1 - Primeiro versículo da passagem.
2 - Segundo versículo da passagem.

**[CONTEXTO]**
Um parágrafo curto explicando quem fala, para quem e o princípio eterno.

[PARA PENSAR]

{reflection}"
    )
}

fn ok(text: String) -> Result<Option<String>, LlmError> {
    Ok(Some(text))
}

fn server_error() -> Result<Option<String>, LlmError> {
    Err(LlmError::HttpStatus { code: 503, body: "overloaded".to_owned() })
}

#[expect(clippy::unwrap_used, reason = "test code")]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

struct Fixture {
    storage: Storage,
    outbox: Outbox,
    _dir: TempDir,
}

#[expect(clippy::unwrap_used, reason = "test code")]
fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&dir.path().join("database.db")).unwrap();
    let outbox = Outbox::new(dir.path().join("outbox.txt"));
    Fixture { storage, outbox, _dir: dir }
}

fn config(max_attempts: u32) -> PipelineConfig {
    PipelineConfig { max_attempts, backoff: BackoffPolicy::immediate(), ..PipelineConfig::default() }
}

#[expect(clippy::unwrap_used, reason = "test code")]
fn seed(storage: &Storage, day: u32, body: &str, reference: &str) {
    let record = NewDevotional::new(
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        body,
        format!("msg {day}"),
        Some(reference.to_owned()),
    );
    assert!(storage.save_devotional(&record).unwrap());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn fresh_store_generates_stages_and_persists() {
    let fx = fixture();
    let backend = ScriptedBackend::new(vec![ok(document("João 3:16-17 (NVI)", "Pergunta?"))]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert_eq!(generated.reference, "João 3:16-17 (NVI)");
    assert_eq!(generated.attempts, 1);
    assert_eq!(generated.model, "gemini-3-pro-preview");
    assert!(generated.stored);
    assert!(generated.message.starts_with("Olá, irmãos e irmãs!"));
    assert!(generated.message.contains("*[VERSÍCULOS]*"));
    assert!(generated.message.contains("*João 3:16-17 (NVI)*"));

    let staged = fx.outbox.read().await.unwrap().unwrap();
    assert_eq!(staged, generated.message);

    let row = fx.storage.get_by_date(today()).unwrap().unwrap();
    assert_eq!(row.message, generated.message);
    assert_eq!(row.content_hash.as_deref(), Some(generated.content_hash.as_str()));
    let key = row.key().unwrap();
    assert_eq!((key.book.as_str(), key.chapter, key.verse_start, key.verse_end), ("João", 3, 16, 17));
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn already_sent_short_circuits_without_calling_backend() {
    let fx = fixture();
    seed(&fx.storage, 10, "corpo antigo", "Salmos 23:1 (NVI)");
    let backend = ScriptedBackend::new(vec![ok(document("João 3:16 (NVI)", "?"))]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let outcome = job.run(today()).await.unwrap();

    assert_eq!(outcome, JobOutcome::AlreadySent { date: today() });
    assert!(backend.models().is_empty());
    assert!(fx.outbox.read().await.unwrap().is_none());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn test_mode_generates_but_storage_keeps_one_row_per_date() {
    let fx = fixture();
    seed(&fx.storage, 10, "corpo antigo", "Salmos 23:1 (NVI)");
    let backend = ScriptedBackend::new(vec![ok(document("João 3:16 (NVI)", "?"))]);
    let config = PipelineConfig { test_mode: true, ..config(8) };
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config);

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert!(!generated.stored);
    assert!(fx.outbox.read().await.unwrap().is_some());
    let row = job.store().get_by_date(today()).unwrap().unwrap();
    assert_eq!(row.reference.as_deref(), Some("Salmos 23:1 (NVI)"));
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn overlapping_passage_is_rejected_then_fresh_one_accepted() {
    let fx = fixture();
    seed(&fx.storage, 1, "romanos", "Romanos 8:28-30 (NVI)");
    let backend = ScriptedBackend::new(vec![
        ok(document("Romanos 8:29-31 (NVI)", "?")),
        ok(document("Romanos 8:31-39 (NVI)", "?")),
    ]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert_eq!(generated.reference, "Romanos 8:31-39 (NVI)");
    assert_eq!(generated.attempts, 2);
    assert_eq!(backend.models(), ["gemini-3-pro-preview", "gemini-2.5-pro"]);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn repeated_body_is_rejected_by_hash() {
    let fx = fixture();
    let repeated = document("Salmos 91:1-2 (NVI)", "Onde você habita?");
    let normalized = devotional_core::document::normalize(&repeated, &devotional_core::MarkerSet::default());
    // Stored under a different reference so only the hash collides.
    seed(&fx.storage, 1, &normalized, "Salmos 1:1 (NVI)");

    let backend = ScriptedBackend::new(vec![
        ok(repeated),
        ok(document("Salmos 91:1-2 (NVI)", "Em quem você confia?")),
    ]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert_eq!(generated.attempts, 2);
    assert_ne!(generated.content_hash, content_hash(&normalized));
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn transient_errors_and_empty_responses_escalate_the_ladder() {
    let fx = fixture();
    let backend = ScriptedBackend::new(vec![
        server_error(),
        Ok(None),
        Err(LlmError::HttpStatus { code: 400, body: "bad request".to_owned() }),
        ok(document("Tiago 1:2-4 (NVI)", "?")),
    ]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert_eq!(generated.attempts, 4);
    assert_eq!(generated.model, "gemini-2.0-pro");
    assert_eq!(
        backend.models(),
        ["gemini-3-pro-preview", "gemini-2.5-pro", "gemini-2.5-flash", "gemini-2.0-pro"]
    );
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn exhausted_budget_stages_and_persists_nothing() {
    let fx = fixture();
    let two_translations = format!(
        "{}\n*João 3:16 (ARA)*",
        document("João 3:16 (NVI)", "?")
    );
    let backend = ScriptedBackend::new(vec![
        ok("texto livre sem estrutura".to_owned()),
        ok(two_translations),
        server_error(),
    ]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(3));

    let (attempts, last_rejection) = match job.run(today()).await.unwrap_err() {
        ServiceError::GenerationExhausted { attempts, last_rejection } => (attempts, last_rejection),
        other => panic!("expected exhaustion, got {other:?}"),
    };
    assert_eq!(attempts, 3);
    assert!(last_rejection.unwrap().contains("503"));
    assert_eq!(backend.models().len(), 3);
    assert!(fx.outbox.read().await.unwrap().is_none());
    assert!(!fx.storage.already_sent(today()).unwrap());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn ladder_clamps_past_its_last_model() {
    let fx = fixture();
    let backend = ScriptedBackend::new(vec![Ok(None), Ok(None), Ok(None)]);
    let config = PipelineConfig { models: ModelLadder::parse("a,b").unwrap(), ..config(3) };
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config);

    assert!(job.run(today()).await.is_err());
    assert_eq!(backend.models(), ["a", "b", "b"]);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn unparseable_reference_is_stored_degraded() {
    let fx = fixture();
    let backend = ScriptedBackend::new(vec![ok(document("João3:16 (NVI)", "?"))]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert_eq!(generated.reference, "João3:16 (NVI)");
    assert!(generated.stored);
    let row = fx.storage.get_by_date(today()).unwrap().unwrap();
    assert_eq!(row.reference.as_deref(), Some("João3:16 (NVI)"));
    assert!(row.book.is_none());
    assert!(row.verse_start.is_none());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn missing_context_is_discarded_then_next_candidate_is_stored() {
    let fx = fixture();
    let without_context = document("John 3:16-17 (NVI)", "?")
        .replace("**[CONTEXTO]**\n", "");
    let backend = ScriptedBackend::new(vec![
        ok(without_context),
        ok(document("John 3:16-17 (NVI)", "?")),
    ]);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), config(8));

    let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
        panic!("expected a generated devotional");
    };

    assert_eq!(generated.attempts, 2);
    assert_eq!(generated.reference, "John 3:16-17 (NVI)");
    let key = fx.storage.get_by_date(today()).unwrap().unwrap().key().unwrap();
    assert_eq!((key.book.as_str(), key.chapter, key.verse_start, key.verse_end), ("John", 3, 16, 17));
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn every_candidate_colliding_with_history_exhausts_default_budget() {
    let fx = fixture();
    let repeated = document("Salmos 91:1-2 (NVI)", "Onde você habita?");
    let normalized =
        devotional_core::document::normalize(&repeated, &devotional_core::MarkerSet::default());
    seed(&fx.storage, 1, "romanos", "Romanos 8:1-39 (NVI)");
    seed(&fx.storage, 2, &normalized, "Salmos 1:1 (NVI)");

    let mut replies: Vec<_> = (1..=7)
        .map(|v| ok(document(&format!("Romanos 8:{v}-{} (NVI)", v + 1), "?")))
        .collect();
    replies.push(ok(repeated));
    let backend = ScriptedBackend::new(replies);
    let job = DailyJob::new(&backend, fx.storage.clone(), fx.outbox.clone(), PipelineConfig {
        backoff: BackoffPolicy::immediate(),
        ..PipelineConfig::default()
    });

    let (attempts, last_rejection) = match job.run(today()).await.unwrap_err() {
        ServiceError::GenerationExhausted { attempts, last_rejection } => (attempts, last_rejection),
        other => panic!("expected exhaustion, got {other:?}"),
    };
    assert_eq!(attempts, 8);
    assert!(last_rejection.unwrap().contains("already used"));
    assert_eq!(backend.models().len(), 8);
    assert_eq!(fx.storage.get_stats().unwrap().total, 2);
    assert!(fx.outbox.read().await.unwrap().is_none());
}

#[cfg(unix)]
mod delivery {
    use chrono::NaiveDate;
    use devotional_core::{DataPaths, DeliveryConfig, NewDevotional, VerseRange};
    use devotional_storage::{HistoryStore, Storage, StorageError};
    use tempfile::TempDir;

    use super::{ScriptedBackend, config, document, ok, seed, today};
    use crate::{DailyJob, DeliveryHook, JobOutcome, Outbox};

    /// Store that misses the already-sent check, as a concurrent run would.
    struct RacingStore(Storage);

    #[async_trait::async_trait]
    impl HistoryStore for RacingStore {
        async fn already_sent(&self, _date: NaiveDate) -> Result<bool, StorageError> {
            Ok(false)
        }

        async fn verse_ranges(
            &self,
            book: &str,
            chapter: u32,
        ) -> Result<Vec<VerseRange>, StorageError> {
            HistoryStore::verse_ranges(&self.0, book, chapter).await
        }

        async fn hash_used(&self, hash: &str) -> Result<bool, StorageError> {
            HistoryStore::hash_used(&self.0, hash).await
        }

        async fn save_devotional(&self, record: &NewDevotional) -> Result<bool, StorageError> {
            HistoryStore::save_devotional(&self.0, record).await
        }
    }

    #[expect(clippy::unwrap_used, reason = "test code")]
    fn logging_sender(dir: &TempDir) -> Option<DeliveryHook> {
        let script = dir.path().join("sender.sh");
        std::fs::write(&script, "echo sent >> deliveries.log\n").unwrap();
        let delivery = DeliveryConfig {
            group_id: "123@g.us".to_owned(),
            command: Some(format!("sh {}", script.display())),
        };
        DeliveryHook::from_config(&delivery, &DataPaths::new(dir.path()))
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "test code")]
    async fn run_that_loses_the_date_does_not_deliver() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(&dir.path().join("database.db")).unwrap();
        seed(&storage, 10, "corpo antigo", "Salmos 23:1 (NVI)");
        let backend = ScriptedBackend::new(vec![ok(document("João 3:16 (NVI)", "?"))]);
        let outbox = Outbox::new(dir.path().join("outbox.txt"));
        let job = DailyJob::new(&backend, RacingStore(storage.clone()), outbox, config(8))
            .with_delivery(logging_sender(&dir));

        let JobOutcome::Generated(generated) = job.run(today()).await.unwrap() else {
            panic!("expected a generated devotional");
        };

        assert!(!generated.stored);
        assert!(!dir.path().join("deliveries.log").exists());
        let row = storage.get_by_date(today()).unwrap().unwrap();
        assert_eq!(row.reference.as_deref(), Some("Salmos 23:1 (NVI)"));
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "test code")]
    async fn recorded_run_delivers_once() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(&dir.path().join("database.db")).unwrap();
        let backend = ScriptedBackend::new(vec![ok(document("João 3:16 (NVI)", "?"))]);
        let outbox = Outbox::new(dir.path().join("outbox.txt"));
        let job = DailyJob::new(&backend, storage, outbox, config(8))
            .with_delivery(logging_sender(&dir));

        job.run(today()).await.unwrap();

        let log = std::fs::read_to_string(dir.path().join("deliveries.log")).unwrap();
        assert_eq!(log, "sent\n");
    }
}
