//! Reverse a YouTube playlist into a second, pre-existing playlist.
//!
//! The pipeline is deliberately three strictly sequential phases:
//!
//! 1. fetch every item of the source playlist, following continuation
//!    tokens until exhausted ([`YouTubeClient::fetch_playlist_items`]);
//! 2. reverse the sequence in memory;
//! 3. append each reference to the destination playlist, riding out quota
//!    limits and skipping vanished videos ([`reversal::insert_all`]).
//!
//! Fetching is read-only, so a run that cannot retrieve the full source
//! aborts before touching the destination. Insertion mutates as it goes:
//! an abort mid-run leaves the already-appended prefix of the reversed
//! order in place, and a fresh run starts over from the fetch — there is
//! no resume ledger.
//!
//! [`YouTubeClient::fetch_playlist_items`]: youtube_api::YouTubeClient::fetch_playlist_items

pub mod config;
pub mod reversal;
pub mod youtube_api;

use crate::reversal::{InsertError, InsertReport, RetryPolicy, insert_all};
use crate::youtube_api::error::ApiError;
use crate::youtube_api::playlist_items::ResourceId;
use crate::youtube_api::YouTubeClient;
use thiserror::Error;

/// A fatal condition that ended a reversal run early.
#[derive(Debug, Error)]
pub enum ReversalError {
    /// The source playlist could not be read in full; nothing was mutated.
    #[error("fetch source playlist")]
    Fetch(#[source] ApiError),
    /// The append loop hit a fatal condition; the source error reports how
    /// many items had already been committed to the destination.
    #[error("append reversed order to destination playlist")]
    Insert(#[from] InsertError),
}

/// Summary of one completed reversal run.
#[derive(Debug)]
pub struct ReversalReport {
    /// Number of items the source playlist yielded.
    pub fetched: usize,
    /// Per-item outcomes, in destination (reversed) order.
    pub insertions: InsertReport,
}

/// Reverses `source_playlist` into `destination_playlist`.
///
/// The destination must already exist and is appended to, never cleared:
/// running against a non-empty destination places the reversed sequence
/// after whatever is already there.
pub async fn reverse_playlist(
    client: &YouTubeClient,
    source_playlist: &str,
    destination_playlist: &str,
    policy: &RetryPolicy,
) -> Result<ReversalReport, ReversalError> {
    let items = client
        .fetch_playlist_items(source_playlist)
        .await
        .map_err(ReversalError::Fetch)?;

    let mut references: Vec<ResourceId> = items
        .into_iter()
        .map(|item| item.snippet.resource_id)
        .collect();
    tracing::info!(
        source_playlist,
        count = references.len(),
        "fetched source playlist, reversing"
    );
    references.reverse();

    let insertions = insert_all(&references, policy, async |resource| {
        client
            .insert_playlist_item(destination_playlist, resource)
            .await
            .map(|_| ())
    })
    .await?;

    tracing::info!(
        destination_playlist,
        inserted = insertions.inserted(),
        skipped = insertions.skipped(),
        "reversal complete"
    );

    Ok(ReversalReport {
        fetched: references.len(),
        insertions,
    })
}
