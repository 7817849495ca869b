#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use learnpath_backend::config::settings::{AppConfig, YoutubeConfig};
use learnpath_backend::state::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Local stand-in for the YouTube Data API `videos` endpoint.
///
/// Ids with special behaviour:
/// - `missing`: empty result set
/// - `boom`: HTTP 500
/// - `slow`: answers after 200ms
/// Anything else returns one item for that id.
#[derive(Clone, Default)]
pub struct FakeYoutube {
    pub hits: Arc<AtomicUsize>,
    pub requested_ids: Arc<Mutex<Vec<String>>>,
    pub keys: Arc<Mutex<Vec<String>>>,
}

impl FakeYoutube {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_requested_id(&self) -> Option<String> {
        self.requested_ids.lock().unwrap().last().cloned()
    }
}

pub fn video_item(id: &str) -> Value {
    json!({
        "kind": "youtube#video",
        "id": id,
        "snippet": {
            "title": format!("Lesson {}", id),
            "description": "A short lesson",
            "publishedAt": "2024-03-01T12:00:00Z",
            "channelTitle": "Classroom",
            "thumbnails": {
                "default": { "url": format!("https://i.ytimg.com/vi/{}/default.jpg", id) },
                "high": { "url": format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id) }
            }
        },
        "contentDetails": { "duration": "PT4M13S" },
        "statistics": { "viewCount": "42" }
    })
}

async fn videos(
    State(fake): State<FakeYoutube>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    let id = params.get("id").cloned().unwrap_or_default();
    fake.requested_ids.lock().unwrap().push(id.clone());
    if let Some(key) = params.get("key") {
        fake.keys.lock().unwrap().push(key.clone());
    }

    match id.as_str() {
        "missing" => (StatusCode::OK, Json(json!({ "items": [] }))),
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "code": 500 } })),
        ),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(200)).await;
            (StatusCode::OK, Json(json!({ "items": [video_item(&id)] })))
        }
        _ => (StatusCode::OK, Json(json!({ "items": [video_item(&id)] }))),
    }
}

/// Starts the fake API and returns it with its base URL.
pub async fn spawn_fake_youtube() -> (FakeYoutube, String) {
    let fake = FakeYoutube::default();
    let router = Router::new()
        .route("/youtube/v3/videos", get(videos))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (fake, format!("http://{}/youtube/v3", addr))
}

pub fn test_config(api_base: &str) -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: None,
        youtube: YoutubeConfig::new("test-key").with_api_base(api_base),
    }
}

pub async fn test_state() -> (AppState, FakeYoutube) {
    let (fake, base) = spawn_fake_youtube().await;
    let state = AppState::in_memory(test_config(&base)).unwrap();
    (state, fake)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
