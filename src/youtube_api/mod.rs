//! YouTube Data API v3 client library.
//!
//! Covers the two `playlistItems` operations this tool needs — paginated
//! listing and appending — plus the structured error envelope Google wraps
//! around non-success responses.
//!
//! # Playlist items vs item references
//!
//! A `playlistItem` is a membership record: it ties one resource (almost
//! always a video) to one playlist at one position. The `resourceId`
//! embedded in its snippet is the portable half — re-creating an ordering
//! in another playlist means inserting `resourceId`s, not membership
//! records.
//!
//! # Authentication
//!
//! List calls are authenticated with an API key; insert calls mutate a
//! playlist on its owner's behalf and therefore use an OAuth2 bearer
//! token. Both arrive via [`crate::config::Credentials`] — this module
//! never acquires or refreshes credentials itself.

pub mod client;
pub mod error;
pub mod playlist_items;
pub mod types;

// Re-export main types for convenience
pub use client::YouTubeClient;
pub use error::{ApiError, ApiErrorEnvelope, REASON_QUOTA_EXCEEDED, REASON_VIDEO_NOT_FOUND};
pub use playlist_items::{
    PlaylistItem, PlaylistItemInsertRequest, PlaylistItemListResponse, PlaylistItemSnippet,
    ResourceId,
};
pub use types::{Page, PageInfo, collect_all_pages};
