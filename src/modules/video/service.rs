use super::extractor::{extract_video_id, VideoIdentifier};
use super::model::VideoMetadata;
use crate::common::error::AppError;
use crate::infrastructure::youtube::client::{FetchError, YoutubeClient};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";

type FetchResult = Result<Option<VideoMetadata>, FetchError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Metadata lookups with a per-id in-flight guard: concurrent requests for
/// the same video await a single upstream call. The call runs on its own task
/// and clears its entry when it settles, even if every caller has gone away.
/// Nothing is kept once the call settles.
#[derive(Clone)]
pub struct VideoService {
    client: YoutubeClient,
    in_flight: Arc<Mutex<HashMap<VideoIdentifier, SharedFetch>>>,
}

impl VideoService {
    pub fn new(client: YoutubeClient) -> Self {
        Self {
            client,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn fetch(&self, video_id: &VideoIdentifier) -> FetchResult {
        let pending = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(video_id) {
                Some(existing) => {
                    debug!(video_id = %video_id, "Joining in-flight metadata request");
                    existing.clone()
                }
                None => {
                    let client = self.client.clone();
                    let id = video_id.clone();
                    let registry = Arc::clone(&self.in_flight);
                    // Inserts only happen while the key is vacant, so the
                    // entry removed here is always this task's own.
                    let task = tokio::spawn(async move {
                        let result = client.fetch_video(&id).await;
                        registry.lock().await.remove(&id);
                        result
                    });
                    let fetch = async move {
                        task.await.unwrap_or_else(|e| {
                            Err(FetchError::Transport(format!("Metadata task failed: {}", e)))
                        })
                    }
                    .boxed()
                    .shared();
                    in_flight.insert(video_id.clone(), fetch.clone());
                    fetch
                }
            }
        };

        pending.await
    }

    /// Fetches metadata and treats an empty result as an upstream failure.
    pub async fn get_metadata(&self, video_id: &VideoIdentifier) -> Result<VideoMetadata, AppError> {
        info!(video_id = %video_id, "Fetching video metadata");
        self.fetch(video_id)
            .await?
            .ok_or(AppError::Upstream(FetchError::NoResults))
    }

    pub async fn get_metadata_for_url(&self, url: &str) -> Result<VideoMetadata, AppError> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| AppError::Validation(INVALID_URL_MESSAGE.to_string()))?;
        self.get_metadata(&video_id).await
    }

    #[cfg(test)]
    async fn in_flight_len(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
