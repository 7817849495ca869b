//! Wire types for the YouTube Data API v3 `videos` resource.
//!
//! Only the fields the service maps into [`VideoMetadata`] are modelled; every
//! part is optional on the wire so a sparse response still decodes.

use crate::modules::video::model::VideoMetadata;
use serde::Deserialize;

/// Videos at or under this length are treated as Shorts.
pub const SHORT_MAX_SECONDS: u64 = 60;

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: Option<String>,
    pub channel_title: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// Largest rendition the API returned.
    pub fn best(&self) -> Option<&Thumbnail> {
        self.maxres
            .as_ref()
            .or(self.standard.as_ref())
            .or(self.high.as_ref())
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    // The API encodes counters as decimal strings.
    pub view_count: Option<String>,
}

impl From<VideoItem> for VideoMetadata {
    fn from(item: VideoItem) -> Self {
        let thumbnail_url = item.snippet.thumbnails.best().map(|t| t.url.clone());
        let duration_seconds = item
            .content_details
            .duration
            .as_deref()
            .and_then(parse_iso8601_duration);

        Self {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnail_url,
            duration: item.content_details.duration,
            duration_seconds,
            published_at: item.snippet.published_at,
            channel_title: item.snippet.channel_title,
            view_count: item.statistics.view_count.and_then(|v| v.parse().ok()),
            is_short: duration_seconds.map(|secs| secs <= SHORT_MAX_SECONDS),
        }
    }
}

/// Parses durations such as `PT4M13S` or `P1DT2H` into whole seconds.
///
/// Returns `None` for anything that is not a day/time duration; calendar
/// units (years, months, weeks) never appear on video lengths.
pub fn parse_iso8601_duration(value: &str) -> Option<u64> {
    let rest = value.strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return None;
            }
            (date, Some(time))
        }
        None => (rest, None),
    };

    let mut total = 0u64;

    for (amount, unit) in duration_components(date_part)? {
        let seconds = match unit {
            'D' => amount.checked_mul(86_400)?,
            _ => return None,
        };
        total = total.checked_add(seconds)?;
    }

    if let Some(time) = time_part {
        for (amount, unit) in duration_components(time)? {
            let seconds = match unit {
                'H' => amount.checked_mul(3_600)?,
                'M' => amount.checked_mul(60)?,
                'S' => amount,
                _ => return None,
            };
            total = total.checked_add(seconds)?;
        }
    }

    Some(total)
}

fn duration_components(part: &str) -> Option<Vec<(u64, char)>> {
    let mut components = Vec::new();
    let mut digits = String::new();

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            if digits.is_empty() {
                return None;
            }
            components.push((digits.parse().ok()?, c));
            digits.clear();
        }
    }

    // Trailing digits without a unit designator.
    if !digits.is_empty() {
        return None;
    }

    Some(components)
}
