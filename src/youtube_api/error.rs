//! Typed errors for YouTube API calls, including the structured error
//! envelope Google attaches to non-success responses.

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Reason code Google reports when the daily API quota or the request rate
/// limit has been exhausted.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
pub const REASON_QUOTA_EXCEEDED: &str = "quotaExceeded";

/// Reason code Google reports when the video behind a playlist item cannot
/// be found by the caller (deleted, private, or otherwise gone).
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
pub const REASON_VIDEO_NOT_FOUND: &str = "videoNotFound";

/// Error produced by a single YouTube API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("send {method} request to YouTube API: {url}")]
    Transport {
        method: Method,
        url: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    ///
    /// Carries the raw body verbatim alongside its leniently-parsed
    /// [`ApiErrorEnvelope`], so callers can classify the failure without
    /// another round trip.
    #[error("YouTube API {method} request failed with status {status}: {body}")]
    Status {
        method: Method,
        url: &'static str,
        status: StatusCode,
        body: String,
        errors: ApiErrorEnvelope,
    },
    /// A success response whose body did not decode as the expected JSON.
    #[error("parse YouTube API response as JSON")]
    Decode(#[source] reqwest::Error),
}

/// The error envelope Google APIs attach to non-success responses.
///
/// Shape:
///
/// ```json
/// {"error": {"code": 403, "message": "...", "errors": [{"reason": "quotaExceeded", ...}]}}
/// ```
///
/// Every field is optional. Classification inspects nothing but the nested
/// `reason` codes; the rest is kept only so failures print usefully.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// The `error` object inside the envelope.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<u16>,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

/// One entry of the envelope's `errors` list.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
    message: Option<String>,
    domain: Option<String>,
}

impl ApiErrorEnvelope {
    /// Parses a raw response body, yielding the empty envelope when the
    /// body is not JSON or not shaped like a Google error response.
    ///
    /// Never fails: an unrecognizable body simply classifies as "no match"
    /// for every reason code.
    pub fn from_raw(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Returns true iff at least one nested error entry carries exactly
    /// `reason`.
    ///
    /// An empty or absent error list never matches. Pure and total: no
    /// input makes this panic or error.
    pub fn has_reason(&self, reason: &str) -> bool {
        self.error
            .as_ref()
            .map(|body| {
                body.errors
                    .iter()
                    .any(|detail| detail.reason.as_deref() == Some(reason))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_reason_matches_nested_entry() {
        let envelope = ApiErrorEnvelope::from_raw(
            r#"{"error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota.", "errors": [{"message": "Quota exceeded", "domain": "youtube.quota", "reason": "quotaExceeded"}]}}"#,
        );
        assert!(envelope.has_reason(REASON_QUOTA_EXCEEDED));
        assert!(!envelope.has_reason(REASON_VIDEO_NOT_FOUND));
    }

    #[test]
    fn test_has_reason_checks_every_entry() {
        let envelope = ApiErrorEnvelope::from_raw(
            r#"{"error": {"code": 404, "errors": [{"reason": "playlistItemNotFound"}, {"reason": "videoNotFound"}]}}"#,
        );
        assert!(envelope.has_reason(REASON_VIDEO_NOT_FOUND));
        assert!(envelope.has_reason("playlistItemNotFound"));
    }

    #[test]
    fn test_has_reason_requires_exact_match() {
        let envelope = ApiErrorEnvelope::from_raw(
            r#"{"error": {"errors": [{"reason": "quotaExceededToday"}]}}"#,
        );
        assert!(!envelope.has_reason(REASON_QUOTA_EXCEEDED));
    }

    #[test]
    fn test_empty_or_absent_error_list_never_matches() {
        for body in [
            "{}",
            r#"{"error": {}}"#,
            r#"{"error": {"errors": []}}"#,
            r#"{"error": {"errors": [{"message": "no reason field"}]}}"#,
        ] {
            let envelope = ApiErrorEnvelope::from_raw(body);
            assert!(!envelope.has_reason(REASON_QUOTA_EXCEEDED), "{body}");
        }
    }

    #[test]
    fn test_malformed_bodies_classify_as_no_match() {
        for body in ["", "not json at all", "<html>502 Bad Gateway</html>", "[1, 2, 3]"] {
            let envelope = ApiErrorEnvelope::from_raw(body);
            assert!(!envelope.has_reason(REASON_QUOTA_EXCEEDED), "{body}");
        }
    }
}
