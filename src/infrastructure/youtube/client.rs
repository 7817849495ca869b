use super::api::VideoListResponse;
use crate::config::settings::YoutubeConfig;
use crate::modules::video::extractor::VideoIdentifier;
use crate::modules::video::model::VideoMetadata;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";

/// Failure modes of a metadata fetch. Cloneable so one result can be handed
/// to every caller sharing an in-flight request.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("YouTube API responded with status {0}")]
    Status(u16),

    #[error("YouTube API request failed: {0}")]
    Transport(String),

    #[error("Failed to decode YouTube API response: {0}")]
    Decode(String),

    #[error("Video not found")]
    NoResults,
}

#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    config: YoutubeConfig,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn videos_url(&self, video_id: &str) -> Result<Url, FetchError> {
        let endpoint = format!("{}/videos", self.config.api_base.trim_end_matches('/'));

        Url::parse_with_params(
            &endpoint,
            &[
                ("part", VIDEO_PARTS),
                ("id", video_id),
                ("key", self.config.api_key.as_str()),
            ],
        )
        .map_err(|e| FetchError::Transport(format!("Invalid API base URL: {}", e)))
    }

    /// Single attempt, no retry. An empty result set yields `Ok(None)`.
    pub async fn fetch_video(
        &self,
        video_id: &VideoIdentifier,
    ) -> Result<Option<VideoMetadata>, FetchError> {
        let url = self.videos_url(video_id.as_str())?;
        debug!(video_id = %video_id, "Requesting video metadata");

        // without_url keeps the API key out of error messages and logs
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(video_id = %video_id, status = status.as_u16(), "YouTube API returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: VideoListResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.without_url().to_string()))?;

        Ok(body.items.into_iter().next().map(VideoMetadata::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_videos_request_url() {
        let client = YoutubeClient::new(
            YoutubeConfig::new("secret-key").with_api_base("http://localhost:9000/youtube/v3/"),
        )
        .unwrap();

        let url = client.videos_url("dQw4w9WgXcQ").unwrap();

        assert_eq!(url.path(), "/youtube/v3/videos");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("part".into(), VIDEO_PARTS.into())));
        assert!(pairs.contains(&("id".into(), "dQw4w9WgXcQ".into())));
        assert!(pairs.contains(&("key".into(), "secret-key".into())));
    }

    #[test]
    fn rejects_a_relative_api_base() {
        let client = YoutubeClient::new(YoutubeConfig::new("k").with_api_base("not a base")).unwrap();
        assert!(matches!(client.videos_url("abc"), Err(FetchError::Transport(_))));
    }
}
