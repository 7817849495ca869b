//! Service-level tests for the ingestion pipeline.

mod common;

use async_trait::async_trait;
use common::{spawn_fake_youtube, test_config, test_state};
use learnpath_backend::common::error::AppError;
use learnpath_backend::config::settings::YoutubeConfig;
use learnpath_backend::infrastructure::youtube::client::{FetchError, YoutubeClient};
use learnpath_backend::modules::content::model::{ContentRecord, ContentStatus};
use learnpath_backend::modules::content::repository::ContentStore;
use learnpath_backend::modules::content::service::ImportService;
use learnpath_backend::modules::content::tracker::ImportTracker;
use learnpath_backend::modules::learning_path::repository::InMemoryLearningPathStore;
use learnpath_backend::modules::video::extractor::{extract_video_id, VideoIdentifier};
use learnpath_backend::modules::video::service::VideoService;
use learnpath_backend::state::AppState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Store whose reads succeed but every write fails.
struct ReadOnlyStore {
    record: ContentRecord,
}

#[async_trait]
impl ContentStore for ReadOnlyStore {
    async fn insert(&self, _record: &ContentRecord) -> Result<ContentRecord, AppError> {
        Err(AppError::Persistence("store is read-only".into()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>, AppError> {
        Ok((id == self.record.id).then(|| self.record.clone()))
    }

    async fn update(&self, _record: &ContentRecord) -> Result<ContentRecord, AppError> {
        Err(AppError::Persistence("store is read-only".into()))
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, AppError> {
        Ok(vec![self.record.clone()])
    }
}

/// Store that cannot be reached at all.
struct UnreachableStore;

#[async_trait]
impl ContentStore for UnreachableStore {
    async fn insert(&self, _record: &ContentRecord) -> Result<ContentRecord, AppError> {
        Err(AppError::Persistence("connection refused".into()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<ContentRecord>, AppError> {
        Err(AppError::Persistence("connection refused".into()))
    }

    async fn update(&self, _record: &ContentRecord) -> Result<ContentRecord, AppError> {
        Err(AppError::Persistence("connection refused".into()))
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, AppError> {
        Err(AppError::Persistence("connection refused".into()))
    }
}

async fn state_with_store(store: Arc<dyn ContentStore>) -> AppState {
    let (_, base) = spawn_fake_youtube().await;
    let config = test_config(&base);
    let client = YoutubeClient::new(config.youtube.clone()).unwrap();
    AppState::new(
        config,
        store,
        Arc::new(InMemoryLearningPathStore::new()),
        VideoService::new(client),
    )
}

#[tokio::test]
async fn test_end_to_end_extraction_and_fetch() {
    let (fake, base) = spawn_fake_youtube().await;
    let client = YoutubeClient::new(YoutubeConfig::new("test-key").with_api_base(base)).unwrap();

    let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s").unwrap();
    assert_eq!(id.as_str(), "dQw4w9WgXcQ");

    let metadata = client.fetch_video(&id).await.unwrap().unwrap();

    assert_eq!(metadata.id, "dQw4w9WgXcQ");
    assert_eq!(fake.last_requested_id().as_deref(), Some("dQw4w9WgXcQ"));
    assert_eq!(fake.hit_count(), 1);
}

#[tokio::test]
async fn test_empty_result_set_is_none() {
    let (_, base) = spawn_fake_youtube().await;
    let client = YoutubeClient::new(YoutubeConfig::new("test-key").with_api_base(base)).unwrap();

    let result = client
        .fetch_video(&VideoIdentifier::parse("missing").unwrap())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_non_success_status_is_a_fetch_error() {
    let (_, base) = spawn_fake_youtube().await;
    let client = YoutubeClient::new(YoutubeConfig::new("test-key").with_api_base(base)).unwrap();

    let err = client
        .fetch_video(&VideoIdentifier::parse("boom").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(500)));
}

#[tokio::test]
async fn test_concurrent_fetches_share_one_request() {
    let (state, fake) = test_state().await;
    let id = VideoIdentifier::parse("slow").unwrap();

    let (a, b, c) = tokio::join!(
        state.videos.fetch(&id),
        state.videos.fetch(&id),
        state.videos.fetch(&id)
    );

    assert_eq!(a.unwrap().unwrap().id, "slow");
    assert_eq!(b.unwrap().unwrap().id, "slow");
    assert_eq!(c.unwrap().unwrap().id, "slow");
    assert_eq!(fake.hit_count(), 1);

    // Settled requests are not cached.
    state.videos.fetch(&id).await.unwrap();
    assert_eq!(fake.hit_count(), 2);
}

#[tokio::test]
async fn test_cancelled_fetch_does_not_stall_later_requests() {
    let (state, fake) = test_state().await;
    let id = VideoIdentifier::parse("slow").unwrap();

    // The only caller gives up long before the upstream answers.
    let abandoned = tokio::time::timeout(Duration::from_millis(50), state.videos.fetch(&id)).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(300)).await;

    let metadata = tokio::time::timeout(Duration::from_secs(2), state.videos.fetch(&id))
        .await
        .expect("fetch should not hang on an abandoned request")
        .unwrap()
        .unwrap();

    assert_eq!(metadata.id, "slow");
    assert_eq!(fake.hit_count(), 2);
}

#[tokio::test]
async fn test_finalize_ignores_prior_status() {
    let (state, _) = test_state().await;

    for prior in [ContentStatus::Pending, ContentStatus::Processing, ContentStatus::Failed] {
        let mut record = ContentRecord::pending(None, None);
        record.status = prior;
        state.contents.insert(&record).await.unwrap();

        let done = ImportService::process_video_import(&state, record.id, json!({ "title": "t" }))
            .await
            .unwrap();

        assert_eq!(done.status, ContentStatus::Completed);
        assert_eq!(done.progress, 100);
        assert!(done.processed_at.is_some());
    }
}

#[tokio::test]
async fn test_finalize_propagates_store_failures() {
    let record = ContentRecord::pending(None, None);
    let id = record.id;
    let state = state_with_store(Arc::new(ReadOnlyStore { record })).await;

    let err = ImportService::process_video_import(&state, id, json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
}

#[tokio::test]
async fn test_check_status_returns_typed_errors() {
    let state = state_with_store(Arc::new(UnreachableStore)).await;

    let err = ImportService::check_import_status(&state, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
}

#[tokio::test]
async fn test_tracker_degrades_store_failures() {
    let state = state_with_store(Arc::new(UnreachableStore)).await;

    let status = ImportTracker::poll(&state, Uuid::new_v4()).await;

    assert_eq!(status.status, ContentStatus::Failed);
    assert_eq!(status.progress, 0);
    assert_eq!(status.error.as_deref(), Some("connection refused"));
}

#[tokio::test]
async fn test_terminal_records_cannot_be_reopened() {
    let (state, _) = test_state().await;
    let record = ImportService::import_video(&state, "https://youtube.com/shorts/clip7")
        .await
        .unwrap();
    assert_eq!(record.status, ContentStatus::Completed);

    let err = ImportService::mark_processing(&state, record.id).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = ImportService::mark_failed(&state, record.id, "late failure")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let status = ImportService::check_import_status(&state, record.id).await.unwrap();
    assert_eq!(status.status, ContentStatus::Completed);
}

#[tokio::test]
async fn test_begin_import_starts_pending() {
    let (state, fake) = test_state().await;

    let (record, video_id) = ImportService::begin_import(&state, "https://youtu.be/abc123?t=5")
        .await
        .unwrap();

    assert_eq!(video_id.as_str(), "abc123");
    assert_eq!(record.status, ContentStatus::Pending);
    assert_eq!(record.progress, 0);
    assert_eq!(record.source_url.as_deref(), Some("https://youtu.be/abc123?t=5"));
    assert_eq!(fake.hit_count(), 0);

    let processing = ImportService::mark_processing(&state, record.id).await.unwrap();
    assert_eq!(processing.status, ContentStatus::Processing);
    assert_eq!(processing.progress, 10);
}
