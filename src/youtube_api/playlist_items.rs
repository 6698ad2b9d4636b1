//! YouTube `playlistItems` API wire types.
//!
//! A playlist entry has two distinct identities. The `playlistItem` id is
//! its membership record in one specific playlist; the embedded
//! `resourceId` names the video the entry points at. Only the `resourceId`
//! is portable: re-creating an ordering in another playlist means inserting
//! `resourceId`s, since membership records cannot move between playlists.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};

/// Response structure for the `playlistItems.list` API call.
///
/// Contains one page of [`PlaylistItem`] resources in playlist order, along
/// with pagination information in [`PageInfo`].
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#playlistItemListResponse`.
    pub kind: String,
    /// A list of playlist items that match the request criteria.
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlistItem` resource identifies another resource's membership in a
/// playlist — which video it is, and where in the playlist it sits.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// The ID that YouTube assigns to uniquely identify the playlist item.
    pub id: String,
    /// Contains basic details about the playlist item.
    pub snippet: PlaylistItemSnippet,
}

/// The snippet object contains basic details about the playlist item.
///
/// This is a subset of the full snippet data available from the YouTube API,
/// containing only the fields currently needed by this implementation.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    /// The ID of the playlist the item is in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    /// The item's position in the playlist, zero-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// The id of the resource the playlist item refers to.
    pub resource_id: ResourceId,
}

/// The id of another YouTube resource, as embedded in playlist items.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet.resourceId>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// The kind of the referred resource, e.g. `youtube#video`.
    pub kind: String,
    /// The ID that YouTube uses to uniquely identify the referred video.
    pub video_id: String,
}

impl ResourceId {
    /// A reference to the video with the given id.
    pub fn video(video_id: impl Into<String>) -> Self {
        Self {
            kind: "youtube#video".to_string(),
            video_id: video_id.into(),
        }
    }
}

/// Request body for the `playlistItems.insert` API call.
///
/// With no explicit `position`, YouTube appends the resource to the end of
/// the target playlist, which is exactly the semantics the insertion loop
/// relies on.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/insert>
#[derive(Debug, Serialize)]
pub struct PlaylistItemInsertRequest {
    /// Placement and target of the new playlist item.
    pub snippet: PlaylistItemSnippet,
}

impl PlaylistItemInsertRequest {
    /// Builds an append request for `resource` at the end of `playlist_id`.
    pub fn append(playlist_id: &str, resource: &ResourceId) -> Self {
        Self {
            snippet: PlaylistItemSnippet {
                playlist_id: Some(playlist_id.to_string()),
                position: None,
                resource_id: resource.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_parses_wire_format() {
        let raw = r#"{
            "kind": "youtube#playlistItemListResponse",
            "etag": "xyzzy",
            "items": [
                {
                    "kind": "youtube#playlistItem",
                    "id": "UEw0Zl9item1",
                    "snippet": {
                        "playlistId": "PLsource",
                        "title": "some video",
                        "position": 0,
                        "resourceId": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"}
                    }
                }
            ],
            "pageInfo": {"totalResults": 12, "resultsPerPage": 5},
            "nextPageToken": "CAUQAA"
        }"#;

        let response: PlaylistItemListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].snippet.position, Some(0));
        assert_eq!(
            response.items[0].snippet.resource_id,
            ResourceId::video("dQw4w9WgXcQ")
        );
        assert_eq!(response.next_page_token.as_deref(), Some("CAUQAA"));
        assert_eq!(response.page_info.total_results, 12);
    }

    #[test]
    fn test_final_page_has_no_continuation_token() {
        let raw = r#"{
            "kind": "youtube#playlistItemListResponse",
            "items": [],
            "pageInfo": {"totalResults": 0, "resultsPerPage": 5}
        }"#;

        let response: PlaylistItemListResponse = serde_json::from_str(raw).unwrap();
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_append_request_serializes_without_position() {
        let request = PlaylistItemInsertRequest::append("PLdest", &ResourceId::video("abc123"));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "snippet": {
                    "playlistId": "PLdest",
                    "resourceId": {"kind": "youtube#video", "videoId": "abc123"}
                }
            })
        );
    }
}
