//! Shared types and the page-accumulation engine for the YouTube API client.

use std::ops::AsyncFnMut;

use crate::youtube_api::error::ApiError;

/// Paging details for lists of resources.
///
/// Includes the total number of items available and the number of resources
/// returned in a single page response.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}

/// One page of results from a YouTube list endpoint.
#[derive(Debug)]
pub struct Page<T> {
    /// The page's items, in the order the API returned them.
    pub items: Vec<T>,
    /// Token for the next page. `None` marks the final page.
    pub next_page_token: Option<String>,
}

/// Drains every page of a paginated list endpoint into one ordered `Vec`.
///
/// Calls `fetch_page` with `None` for the first page, then with each
/// `nextPageToken` the prior page returned, until a page arrives without
/// one. Items are appended in page-arrival order, preserving the in-page
/// order the API returned. Accumulation is an explicit loop, so
/// arbitrarily long collections cost no call-stack depth.
///
/// The first failed page read aborts the whole collection: no partial
/// sequence escapes, even when earlier pages succeeded.
pub async fn collect_all_pages<T, F>(mut fetch_page: F) -> Result<Vec<T>, ApiError>
where
    F: AsyncFnMut(Option<String>) -> Result<Page<T>, ApiError>,
{
    let mut items = Vec::new();
    let mut page_token = None;

    loop {
        let page = fetch_page(page_token.take()).await?;
        items.extend(page.items);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => return Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, StatusCode};
    use std::collections::VecDeque;

    fn page(items: &[u32], next: Option<&str>) -> Page<u32> {
        Page {
            items: items.to_vec(),
            next_page_token: next.map(String::from),
        }
    }

    fn read_failure() -> ApiError {
        ApiError::Status {
            method: Method::GET,
            url: "https://www.googleapis.com/youtube/v3/playlistItems",
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "backend error".to_string(),
            errors: Default::default(),
        }
    }

    async fn collect_scripted(pages: Vec<Page<u32>>) -> (Vec<u32>, Vec<Option<String>>) {
        let mut remaining = VecDeque::from(pages);
        let mut tokens_seen = Vec::new();
        let collected = collect_all_pages(async |token| {
            tokens_seen.push(token);
            Ok(remaining.pop_front().expect("fetched past the final page"))
        })
        .await
        .unwrap();
        (collected, tokens_seen)
    }

    #[tokio::test]
    async fn test_single_page_collection() {
        let (collected, tokens_seen) = collect_scripted(vec![page(&[1, 2, 3], None)]).await;
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(tokens_seen, vec![None]);
    }

    #[tokio::test]
    async fn test_pages_of_two_two_one_concatenate_in_order() {
        let (collected, tokens_seen) = collect_scripted(vec![
            page(&[10, 11], Some("p2")),
            page(&[20, 21], Some("p3")),
            page(&[30], None),
        ])
        .await;
        assert_eq!(collected, vec![10, 11, 20, 21, 30]);
        assert_eq!(
            tokens_seen,
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_pages_contribute_nothing_but_continue() {
        let (collected, _) = collect_scripted(vec![
            page(&[], Some("p2")),
            page(&[7], Some("p3")),
            page(&[], None),
        ])
        .await;
        assert_eq!(collected, vec![7]);
    }

    #[tokio::test]
    async fn test_identical_page_sequences_collect_identically() {
        let pages = || {
            vec![
                page(&[1, 2], Some("p2")),
                page(&[3, 4], Some("p3")),
                page(&[5], None),
            ]
        };
        let (first, _) = collect_scripted(pages()).await;
        let (second, _) = collect_scripted(pages()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_page_aborts_without_partial_result() {
        let mut remaining = VecDeque::from(vec![page(&[1, 2], Some("p2"))]);
        let result = collect_all_pages(async |token| match remaining.pop_front() {
            Some(page) => Ok(page),
            None => {
                assert_eq!(token.as_deref(), Some("p2"));
                Err(read_failure())
            }
        })
        .await;
        match result {
            Err(ApiError::Status { status, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected the page failure to abort the fetch, got {other:?}"),
        }
    }
}
