//! Service layer for the devotional job
//!
//! Ties the generation backend, the history store and the outbox together
//! into one retrying pipeline run.

mod delivery;
mod error;
mod job;
mod novelty;
mod outbox;

#[cfg(test)]
mod job_tests;

pub use delivery::{DeliveryHook, DeliveryReport};
pub use error::ServiceError;
pub use job::{DailyJob, Generated, JobOutcome, Rejection};
pub use novelty::{hash_repeated, overlaps_history};
pub use outbox::{Outbox, SendStatus, read_send_status};
