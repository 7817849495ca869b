use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Recognized URL shapes, tried in order. The capture stops at the first
/// `?`, `&`, `#` or line break.
static VIDEO_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"youtube\.com/watch\?v=([^&\n?#]+)",
        r"youtu\.be/([^&\n?#]+)",
        r"youtube\.com/embed/([^&\n?#]+)",
        r"youtube\.com/shorts/([^&\n?#]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Failed to compile YouTube URL pattern"))
    .collect()
});

/// A YouTube video id as it appears in a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoIdentifier(String);

impl VideoIdentifier {
    /// Accepts a bare id, e.g. from a path segment. Rejects anything that
    /// could not have come out of the URL patterns.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && !raw
                .chars()
                .any(|c| matches!(c, '?' | '&' | '#' | '/') || c.is_whitespace());

        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the id captured by the first matching URL shape.
pub fn extract_video_id(url: &str) -> Option<VideoIdentifier> {
    VIDEO_URL_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoIdentifier(m.as_str().to_owned()))
    })
}
