//! Exponential backoff with jitter between generation attempts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which kind of backend failure preceded the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 5xx, rate limiting, connection failures.
    Server,
    /// Anything else the backend call raised.
    Unexpected,
}

/// Backoff policy: `min(cap, 2^attempt)` seconds plus `uniform(0, jitter)`
/// seconds, with separate caps for server and unexpected failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    pub server_cap_secs: f64,
    pub server_jitter_secs: f64,
    pub unexpected_cap_secs: f64,
    pub unexpected_jitter_secs: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            server_cap_secs: 60.0,
            server_jitter_secs: 1.5,
            unexpected_cap_secs: 30.0,
            unexpected_jitter_secs: 1.0,
        }
    }
}

impl BackoffPolicy {
    /// A policy that never waits.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            server_cap_secs: 0.0,
            server_jitter_secs: 0.0,
            unexpected_cap_secs: 0.0,
            unexpected_jitter_secs: 0.0,
        }
    }

    /// Wait before the attempt following failed attempt `attempt` (0-based).
    #[must_use]
    pub fn delay(&self, kind: FailureKind, attempt: u32) -> Duration {
        let jitter = rand::random::<f64>();
        self.delay_with_jitter(kind, attempt, jitter)
    }

    /// Deterministic form of [`Self::delay`]; `unit_jitter` is clamped to `[0, 1]`.
    #[must_use]
    pub fn delay_with_jitter(&self, kind: FailureKind, attempt: u32, unit_jitter: f64) -> Duration {
        let (cap, jitter) = match kind {
            FailureKind::Server => (self.server_cap_secs, self.server_jitter_secs),
            FailureKind::Unexpected => (self.unexpected_cap_secs, self.unexpected_jitter_secs),
        };
        let exponential = 2f64.powi(i32::try_from(attempt.min(62)).unwrap_or(62));
        let secs = exponential.min(cap).max(0.0) + jitter.max(0.0) * unit_jitter.clamp(0.0, 1.0);
        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_exponentially_until_cap() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_with_jitter(FailureKind::Server, 0, 0.0), Duration::from_secs(1));
        assert_eq!(policy.delay_with_jitter(FailureKind::Server, 3, 0.0), Duration::from_secs(8));
        assert_eq!(policy.delay_with_jitter(FailureKind::Server, 7, 0.0), Duration::from_secs(60));
        assert_eq!(
            policy.delay_with_jitter(FailureKind::Unexpected, 7, 0.0),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn jitter_is_bounded_per_kind() {
        let policy = BackoffPolicy::default();
        assert_eq!(
            policy.delay_with_jitter(FailureKind::Server, 0, 1.0),
            Duration::from_secs_f64(2.5)
        );
        assert_eq!(
            policy.delay_with_jitter(FailureKind::Unexpected, 0, 1.0),
            Duration::from_secs(2)
        );
        for attempt in 0..8 {
            let d = policy.delay(FailureKind::Server, attempt);
            assert!(d <= Duration::from_secs_f64(61.5), "attempt {attempt}: {d:?}");
        }
    }

    #[test]
    fn immediate_never_waits() {
        let policy = BackoffPolicy::immediate();
        assert_eq!(policy.delay(FailureKind::Server, 5), Duration::ZERO);
        assert_eq!(policy.delay(FailureKind::Unexpected, 0), Duration::ZERO);
    }
}
