//! Field checks shared by the API services and the client library.
//!
//! The client runs these before any request; the server runs them again
//! before any write.

use std::sync::LazyLock;

use regex::Regex;

use crate::{AppError, AppResult};

// Valid static pattern that cannot fail
#[allow(clippy::unwrap_used)]
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.|m\.)?(?:youtube\.com/(?:embed/|watch\?v=|shorts/)|youtube-nocookie\.com/embed/|youtu\.be/)([A-Za-z0-9_-]{6,})(?:[?&#].*)?$",
    )
    .unwrap()
});

/// Require a non-blank value; returns it trimmed.
pub fn require(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional value, mapping blank strings to `None`.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether `url` points at an embeddable YouTube video.
#[must_use]
pub fn is_video_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url.trim())
}

/// Rewrite any accepted YouTube URL form into its `/embed/` form.
#[must_use]
pub fn embed_url(url: &str) -> Option<String> {
    YOUTUBE_URL
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|id| format!("https://www.youtube.com/embed/{}", id.as_str()))
}

/// Validate an optional video URL, returning it in embed form.
pub fn video_url(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    match optional(value) {
        None => Ok(None),
        Some(url) => embed_url(&url).map(Some).ok_or_else(|| {
            AppError::Validation(format!("{field} must be a YouTube video URL"))
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        let err = require("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_require_trims() {
        assert_eq!(require("title", "  Hello ").unwrap(), "Hello");
    }

    #[test]
    fn test_optional_maps_blank_to_none() {
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_video_url_accepts_common_forms() {
        assert!(is_video_url("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(is_video_url("https://youtube.com/watch?v=dQw4w9WgXcQ&t=10"));
        assert!(is_video_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!is_video_url("https://vimeo.com/12345678"));
        assert!(!is_video_url("not a url"));
    }

    #[test]
    fn test_embed_url_normalises_watch_links() {
        assert_eq!(
            embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_url_field_error_names_field() {
        let err = video_url("video_url", Some("https://example.com/a.mp4".into())).unwrap_err();
        assert!(err.to_string().starts_with("video_url"));
        assert_eq!(video_url("video_url", Some(String::new())).unwrap(), None);
    }
}
