//! The resilient insertion loop and its retry policy.
//!
//! Fetching is read-only, so a failed fetch simply aborts the run before
//! anything was mutated. Insertion mutates the destination one item at a
//! time, so each failure must be triaged: rate limiting is worth waiting
//! out, a vanished video is worth skipping, and anything else stops the
//! run before it can do further damage. Items appended before an abort
//! stay appended; there is no rollback.

use crate::youtube_api::error::{ApiError, REASON_QUOTA_EXCEEDED, REASON_VIDEO_NOT_FOUND};
use crate::youtube_api::playlist_items::ResourceId;
use rand::Rng;
use reqwest::StatusCode;
use std::ops::AsyncFnMut;
use std::time::Duration;
use thiserror::Error;

/// Bounds on how long the inserter keeps retrying a quota-limited append.
///
/// The delay grows exponentially from `initial_delay` up to `max_delay`,
/// and each sleep is jittered so retries never land back on the API on an
/// exact schedule. Once `max_attempts` requests for a single item have
/// failed with quota errors, the run aborts with
/// [`InsertError::RetryBudgetExhausted`] rather than hanging indefinitely
/// under sustained rate limiting.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Nominal delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the nominal delay, however many attempts have failed.
    pub max_delay: Duration,
    /// Total requests allowed per item, the initial attempt included.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(300),
            max_attempts: 8,
        }
    }
}

impl RetryPolicy {
    /// The sleep before retrying after `failed_attempts` failures of one
    /// item.
    ///
    /// Equal jitter: half of the capped exponential delay is kept as a
    /// floor and the other half is uniformly random.
    fn delay_for(&self, failed_attempts: u32) -> Duration {
        let doublings = failed_attempts.saturating_sub(1).min(16);
        let nominal = self
            .initial_delay
            .saturating_mul(1u32 << doublings)
            .min(self.max_delay);
        let half = nominal / 2;
        half + rand::thread_rng().gen_range(Duration::ZERO..=half)
    }
}

/// What happened to one item reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// The reference this outcome is about.
    pub resource: ResourceId,
    /// Its terminal state.
    pub disposition: Disposition,
}

/// Terminal per-item state of the insertion state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The append succeeded after `attempts` requests (1 when no retry was
    /// needed).
    Inserted { attempts: u32 },
    /// The append was abandoned without aborting the run.
    Skipped { reason: String },
}

/// Ordered per-item outcomes of one completed insertion run.
#[derive(Debug, Default)]
pub struct InsertReport {
    /// One entry per item, in destination order.
    pub outcomes: Vec<ItemOutcome>,
}

impl InsertReport {
    /// Number of items that ended in [`Disposition::Inserted`].
    pub fn inserted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.disposition, Disposition::Inserted { .. }))
            .count()
    }

    /// Number of items that ended in [`Disposition::Skipped`].
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.disposition, Disposition::Skipped { .. }))
            .count()
    }
}

/// Fatal conditions that terminate an insertion run early.
///
/// Items appended before the abort remain in the destination playlist;
/// `committed` reports how many.
#[derive(Debug, Error)]
pub enum InsertError {
    /// Quota errors outlasted the whole retry budget for one item.
    #[error(
        "gave up appending video {video_id} after {attempts} quota-limited attempts \
         ({committed} items were already appended)"
    )]
    RetryBudgetExhausted {
        video_id: String,
        attempts: u32,
        committed: usize,
        #[source]
        last_error: ApiError,
    },
    /// A failure the inserter does not know to be recoverable.
    #[error("append video {video_id} ({committed} items were already appended)")]
    Unclassified {
        video_id: String,
        committed: usize,
        #[source]
        source: ApiError,
    },
}

/// Failure classes the inserter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureClass {
    /// 403 carrying reason `quotaExceeded`: wait and retry the same item.
    QuotaExceeded,
    /// 404 carrying reason `videoNotFound`: skip the item, keep going.
    VideoNotFound,
    /// Everything else, transport failures included: abort the run.
    Fatal,
}

/// Decides how one failed append is handled.
///
/// Only the HTTP status plus the envelope's reason codes participate; a
/// matching status without the matching reason is fatal, never guessed at.
fn triage(error: &ApiError) -> FailureClass {
    match error {
        ApiError::Status { status, errors, .. }
            if *status == StatusCode::FORBIDDEN && errors.has_reason(REASON_QUOTA_EXCEEDED) =>
        {
            FailureClass::QuotaExceeded
        }
        ApiError::Status { status, errors, .. }
            if *status == StatusCode::NOT_FOUND && errors.has_reason(REASON_VIDEO_NOT_FOUND) =>
        {
            FailureClass::VideoNotFound
        }
        _ => FailureClass::Fatal,
    }
}

/// Appends `items` to the destination, in order, through `insert`.
///
/// Drives the per-item state machine: attempt the append, retry
/// quota-limited attempts under `policy`, skip vanished videos, and abort
/// the run on anything else, leaving later items untouched.
///
/// The append call is abstracted over so the loop can be driven against a
/// scripted destination in tests; production binds it to
/// [`YouTubeClient::insert_playlist_item`].
///
/// [`YouTubeClient::insert_playlist_item`]: crate::youtube_api::YouTubeClient::insert_playlist_item
pub async fn insert_all<F>(
    items: &[ResourceId],
    policy: &RetryPolicy,
    mut insert: F,
) -> Result<InsertReport, InsertError>
where
    F: AsyncFnMut(&ResourceId) -> Result<(), ApiError>,
{
    let mut report = InsertReport::default();

    for resource in items {
        let mut attempts = 0u32;
        let disposition = loop {
            attempts += 1;
            let error = match insert(resource).await {
                Ok(()) => break Disposition::Inserted { attempts },
                Err(error) => error,
            };

            match triage(&error) {
                FailureClass::QuotaExceeded => {
                    if attempts >= policy.max_attempts {
                        return Err(InsertError::RetryBudgetExhausted {
                            video_id: resource.video_id.clone(),
                            attempts,
                            committed: report.inserted(),
                            last_error: error,
                        });
                    }
                    let delay = policy.delay_for(attempts);
                    tracing::warn!(
                        video_id = resource.video_id,
                        attempts,
                        delay_ms = delay.as_millis() as u64,
                        "append hit the API quota, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                FailureClass::VideoNotFound => {
                    tracing::warn!(
                        video_id = resource.video_id,
                        "video no longer exists, skipping"
                    );
                    break Disposition::Skipped {
                        reason: REASON_VIDEO_NOT_FOUND.to_string(),
                    };
                }
                FailureClass::Fatal => {
                    return Err(InsertError::Unclassified {
                        video_id: resource.video_id.clone(),
                        committed: report.inserted(),
                        source: error,
                    });
                }
            }
        };

        tracing::debug!(
            video_id = resource.video_id,
            disposition = ?disposition,
            "item settled"
        );
        report.outcomes.push(ItemOutcome {
            resource: resource.clone(),
            disposition,
        });
    }

    Ok(report)
}
