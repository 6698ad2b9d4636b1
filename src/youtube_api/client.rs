//! Core YouTube API client functionality.

use crate::config::Credentials;
use crate::youtube_api::error::{ApiError, ApiErrorEnvelope};
use crate::youtube_api::playlist_items::{
    PlaylistItem, PlaylistItemInsertRequest, PlaylistItemListResponse, ResourceId,
};
use crate::youtube_api::types::{Page, collect_all_pages};
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

const PLAYLIST_ITEMS_URL: &str = "https://www.googleapis.com/youtube/v3/playlistItems";

/// The API caps list pages at 50 items.
const MAX_RESULTS_PER_PAGE: u32 = 50;

/// How a request proves who is calling.
///
/// Reads are keyed (the `key` query parameter); writes act on the playlist
/// owner's behalf and require the OAuth bearer token instead.
#[derive(Debug, Clone, Copy)]
enum Auth {
    ApiKey,
    Bearer,
}

/// Client for interacting with the YouTube Data API v3.
///
/// Wraps one [`reqwest::Client`] plus the credentials for both call
/// families: an API key for reads and a pre-acquired OAuth2 bearer token
/// for writes. Credentials are injected once at construction, and the
/// client holds no other state.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    credentials: Credentials,
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a new YouTube API client around the provided credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Makes a request to the YouTube API with common error handling.
    ///
    /// This method consolidates the shared logic across all YouTube API
    /// requests: authentication, query parameters, optional JSON body, and
    /// status validation. A non-success status becomes
    /// [`ApiError::Status`], carrying the raw body and its parsed error
    /// envelope so callers can classify the failure.
    async fn make_request(
        &self,
        method: Method,
        url: &'static str,
        auth: Auth,
        query_params: &[(&str, &str)],
        json_body: Option<&impl Serialize>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.client.request(method.clone(), url).query(query_params);

        match auth {
            Auth::ApiKey => {
                request = request.query(&[("key", self.credentials.api_key.as_str())]);
            }
            Auth::Bearer => {
                request = request.header(
                    "Authorization",
                    format!("Bearer {}", self.credentials.access_token),
                );
            }
        }

        if let Some(body) = json_body {
            request = request
                .header("Content-Type", "application/json")
                .json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            method: method.clone(),
            url,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let errors = ApiErrorEnvelope::from_raw(&body);
            return Err(ApiError::Status {
                method,
                url,
                status,
                body,
                errors,
            });
        }

        Ok(response)
    }

    /// Fetches every item of a playlist as one ordered sequence.
    ///
    /// Uses the `playlistItems.list` API, following `nextPageToken`s until
    /// the final page. The result order is the playlist's own order:
    /// in-page order as the API returned it, pages concatenated in arrival
    /// order. The first failed page read aborts the whole fetch with no
    /// partial result.
    ///
    /// Requests `part=snippet` so every returned item carries the
    /// `resourceId` needed to re-insert it elsewhere.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub async fn fetch_playlist_items(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, ApiError> {
        collect_all_pages(async |page_token| {
            let response = self
                .list_playlist_items_internal(playlist_id, MAX_RESULTS_PER_PAGE, page_token)
                .await?;
            Ok(Page {
                items: response.items,
                next_page_token: response.next_page_token,
            })
        })
        .await
    }

    /// Appends one resource to the end of a playlist.
    ///
    /// Uses the `playlistItems.insert` API on the playlist owner's behalf.
    /// Classifiable failures (quota, missing video) surface as
    /// [`ApiError::Status`] with the error envelope intact; retry and skip
    /// decisions belong to the caller.
    ///
    /// # Required Scopes
    ///
    /// * `https://www.googleapis.com/auth/youtube`
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/insert>
    #[instrument(skip(self), ret, level = tracing::Level::TRACE)]
    pub async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        resource: &ResourceId,
    ) -> Result<PlaylistItem, ApiError> {
        let query_params = [("part", "snippet")];
        let body = PlaylistItemInsertRequest::append(playlist_id, resource);

        let response = self
            .make_request(
                Method::POST,
                PLAYLIST_ITEMS_URL,
                Auth::Bearer,
                &query_params,
                Some(&body),
            )
            .await?;

        let inserted: PlaylistItem = response.json().await.map_err(ApiError::Decode)?;

        tracing::debug!(
            playlist_id,
            video_id = resource.video_id,
            position = ?inserted.snippet.position,
            "appended playlist item"
        );

        Ok(inserted)
    }

    /// Internal method to call the `playlistItems.list` API for one page.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist whose items to list
    /// * `max_results` - Maximum number of items to return (1-50)
    /// * `page_token` - Optional page token for pagination
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<PlaylistItemListResponse, ApiError> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        // Add pageToken if provided
        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let response = self
            .make_request(
                Method::GET,
                PLAYLIST_ITEMS_URL,
                Auth::ApiKey,
                &query_params,
                None::<&()>,
            )
            .await?;

        let playlist_items: PlaylistItemListResponse =
            response.json().await.map_err(ApiError::Decode)?;

        tracing::debug!(
            total_results = playlist_items.page_info.total_results,
            returned_items = playlist_items.items.len(),
            "fetched playlist items"
        );

        Ok(playlist_items)
    }
}
