//! `devotional run`: one invocation of the daily job.

use anyhow::{Context as _, Result};
use devotional_core::AppConfig;
use devotional_llm::LlmClient;
use devotional_service::{DailyJob, DeliveryHook, JobOutcome, Outbox};
use devotional_storage::Storage;

pub(crate) async fn run(test_mode: bool) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    config.pipeline.test_mode |= test_mode;

    let storage = Storage::new(&config.paths.database())
        .with_context(|| format!("opening {}", config.paths.database().display()))?;
    let backend = LlmClient::from_config(&config.backend)?;
    let delivery = DeliveryHook::from_config(&config.delivery, &config.paths);
    let outbox = Outbox::new(config.paths.outbox());

    tracing::info!(
        base_url = backend.base_url(),
        data_dir = %config.paths.root().display(),
        outbox = %outbox.path().display(),
        test_mode = config.pipeline.test_mode,
        delivery = delivery.is_some(),
        "starting devotional job"
    );

    let job = DailyJob::new(backend, storage, outbox, config.pipeline).with_delivery(delivery);
    let today = chrono::Local::now().date_naive();

    match job.run(today).await? {
        JobOutcome::AlreadySent { date } => {
            println!("Devotional for {date} already sent.");
        },
        JobOutcome::Generated(generated) => {
            println!(
                "Devotional for {} ready: {} ({} attempt(s), model {}{})",
                generated.date,
                generated.reference,
                generated.attempts,
                generated.model,
                if generated.stored { "" } else { ", not recorded" },
            );
        },
    }
    Ok(())
}
