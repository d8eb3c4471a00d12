#![allow(dead_code)]

//! Bounded polling for clients watching a pending submission.
//!
//! Consumers of the listing endpoint poll until the record they are watching
//! shows a score. This helper bounds that loop: a fixed interval, a maximum
//! attempt count, and an explicit cancellation future, so no caller is left
//! with an indefinite timer against a submission that may stay pending
//! forever.

use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

use crate::models::resume::ResumeRow;

/// Interval and bound for a polling loop. Defaults mirror the browser
/// client: every 3 seconds, give up after 40 attempts (~2 minutes).
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 40,
        }
    }
}

/// Terminal states of a bounded polling loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    /// The probe observed the terminal state it was waiting for.
    Resolved(T),
    /// The attempt budget ran out with the probe still pending.
    Exhausted,
    /// The cancellation future completed first.
    Cancelled,
}

/// Runs `probe` until it yields a value, the attempt budget is spent, or
/// `cancel` completes. The first probe fires immediately; each subsequent
/// attempt waits out the interval.
///
/// A probe that hits a transient error should return `None` and let the next
/// attempt retry — the loop does not distinguish "still pending" from
/// "couldn't check".
pub async fn poll_until<T, F, Fut, C>(config: PollConfig, cancel: C, mut probe: F) -> PollOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
    C: Future<Output = ()>,
{
    tokio::pin!(cancel);

    for attempt in 0..config.max_attempts {
        if attempt > 0 {
            tokio::select! {
                _ = &mut cancel => return PollOutcome::Cancelled,
                _ = tokio::time::sleep(config.interval) => {}
            }
        }

        if let Some(value) = probe().await {
            return PollOutcome::Resolved(value);
        }
    }

    PollOutcome::Exhausted
}

/// Scans a listing snapshot for the watched submission and returns its score
/// once set. `None` covers both "not visible yet" and "still pending", which
/// a poller treats identically.
pub fn find_scored(rows: &[ResumeRow], id: Uuid) -> Option<f64> {
    rows.iter().find(|r| r.id == id).and_then(|r| r.ai_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn row(id: Uuid, ai_score: Option<f64>) -> ResumeRow {
        ResumeRow {
            id,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            file_key: format!("resumes/{id}/resume.pdf"),
            ai_score,
            uploaded_at: Utc::now(),
        }
    }

    fn config(max_attempts: u32) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(3),
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_once_probe_yields() {
        let calls = AtomicU32::new(0);
        let outcome = poll_until(config(10), std::future::pending::<()>(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { (n >= 3).then_some(82.5) }
        })
        .await;

        assert_eq!(outcome, PollOutcome::Resolved(82.5));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_out_the_interval_between_attempts() {
        let start = tokio::time::Instant::now();
        let calls = AtomicU32::new(0);
        let outcome = poll_until(config(10), std::future::pending::<()>(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { (n >= 3).then_some(()) }
        })
        .await;

        assert_eq!(outcome, PollOutcome::Resolved(()));
        // First attempt is immediate; attempts 2 and 3 each wait 3s.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let outcome: PollOutcome<f64> = poll_until(config(5), std::future::pending::<()>(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { None }
        })
        .await;

        assert_eq!(outcome, PollOutcome::Exhausted);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_wins_over_the_timer() {
        let outcome: PollOutcome<f64> = poll_until(
            config(10),
            tokio::time::sleep(Duration::from_secs(4)),
            || async { None },
        )
        .await;

        assert_eq!(outcome, PollOutcome::Cancelled);
    }

    #[test]
    fn test_find_scored_ignores_pending_and_other_rows() {
        let watched = Uuid::new_v4();
        let rows = vec![row(Uuid::new_v4(), Some(91.0)), row(watched, None)];
        assert_eq!(find_scored(&rows, watched), None);

        let rows = vec![row(watched, Some(82.5)), row(Uuid::new_v4(), None)];
        assert_eq!(find_scored(&rows, watched), Some(82.5));
    }

    #[test]
    fn test_find_scored_missing_row_is_pending() {
        assert_eq!(find_scored(&[], Uuid::new_v4()), None);
    }
}
