//! End-to-end tests: the client against a real PlaceHub router.
//!
//! The router is served on `127.0.0.1:0` with a fake Google provider and
//! an in-memory bucket, so every call crosses real HTTP twice.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use placehub_api::{AppState, build_router};
use placehub_client::{ApiClient, Phase, PlacesPage, View};
use placehub_storage::{MemoryStore, ObjectStore, StorageLocation};
use placehub_types::UploadOptions;
use placehub_upstream::{GooglePlacesClient, MediaFetcher};
use serde_json::json;
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn fake_google() -> Router {
    Router::new()
        .route(
            "/findplacefromtext/json",
            get(|| async {
                Json(json!({
                    "status": "OK",
                    "candidates": [{
                        "place_id": "p1",
                        "name": "Cafe Uno",
                        "formatted_address": "1 Main St",
                        "icon": "i.png",
                        "photos": [{"photo_reference": "OK1", "width": 1, "height": 1}]
                    }]
                }))
            }),
        )
        .route(
            "/details/json",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("place_id").map(String::as_str) != Some("p1") {
                    return Json(json!({"status": "NOT_FOUND"}));
                }
                Json(json!({
                    "status": "OK",
                    "result": {
                        "place_id": "p1",
                        "name": "Cafe Uno",
                        "formatted_address": "1 Main St",
                        "photos": [
                            {"photo_reference": "OK1", "width": 800, "height": 600},
                            {"photo_reference": "GONE", "width": 800, "height": 600},
                            {"photo_reference": "OK2", "width": 800, "height": 600}
                        ]
                    }
                }))
            }),
        )
        .route(
            "/photo",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("photoreference").map(String::as_str) == Some("GONE") {
                    return StatusCode::FORBIDDEN.into_response();
                }
                ([(header::CONTENT_TYPE, "image/jpeg")], vec![0xFF_u8, 0xD8]).into_response()
            }),
        )
}

async fn start_hub() -> (ApiClient, MemoryStore) {
    let google = serve(fake_google()).await;
    let (store, memory) = ObjectStore::memory(StorageLocation {
        bucket: String::from("gplaces"),
        public_base: String::from("https://cdn.test"),
    });

    let client = reqwest::Client::new();
    let state = AppState::new(MediaFetcher::new(client.clone(), "placehub-tests"))
        .with_places(GooglePlacesClient::new(client, google, "g-key"))
        .with_storage(store);

    let hub = serve(build_router(Arc::new(state))).await;
    (ApiClient::new(hub), memory)
}

#[tokio::test]
async fn page_walks_search_results_details_and_back() {
    let (api, _) = start_hub().await;
    let mut page = PlacesPage::new();

    page.search(&api, "cafe").await;
    assert!(matches!(page.view(), View::Results { candidates, .. }
        if candidates.len() == 1
            && candidates[0].image == "/api/gplaces/photo?ref=OK1&maxwidth=400"));

    page.select(&api, "p1").await;
    assert!(matches!(page.view(), View::Details(d) if d.name == "Cafe Uno"));
    assert_eq!(*page.phase(), Phase::Idle);

    page.back();
    assert_eq!(*page.view(), View::Search);
}

#[tokio::test]
async fn failed_select_keeps_results_and_shows_server_message() {
    let (api, _) = start_hub().await;
    let mut page = PlacesPage::new();

    page.search(&api, "cafe").await;
    page.select(&api, "nope").await;

    assert!(matches!(page.view(), View::Results { .. }));
    assert_eq!(page.error(), Some("Place not found: NOT_FOUND"));
}

#[tokio::test]
async fn unconfigured_routes_surface_their_message() {
    let (api, _) = start_hub().await;

    let err = api.instagram_profile("natgeo").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Instagram app id not configured");

    let response = api.send_webhook(&json!({"cid": "1"})).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Webhook URL not configured"));
}

#[tokio::test]
async fn storage_calls_use_uniform_results() {
    let (api, memory) = start_hub().await;

    let uploaded = api
        .upload_file(
            b"hello".to_vec(),
            "note.png",
            "image/png",
            &UploadOptions {
                folder: Some(String::from("docs")),
                filename: Some(String::from("hello.png")),
            },
        )
        .await;
    assert!(uploaded.success);
    assert_eq!(uploaded.path.as_deref(), Some("docs/hello.png"));
    assert_eq!(memory.get("docs/hello.png").await.unwrap().bytes, b"hello".to_vec());

    let listed = api.list_files("docs").await;
    assert!(listed.error.is_none());
    assert_eq!(listed.files.len(), 1);

    let deleted = api.delete_file("docs/hello.png").await;
    assert!(deleted.success);
    assert!(api.list_files("docs").await.files.is_empty());

    let failed = api.upload_from_url("", &UploadOptions::default()).await;
    assert!(!failed.success);
    assert_eq!(failed.error.as_deref(), Some("No source URL provided"));
}

#[tokio::test]
async fn batch_upload_partitions_results() {
    let (api, memory) = start_hub().await;
    let details = api.place_details("p1").await.unwrap();
    let selected = vec![
        String::from("OK1"),
        String::from("GONE"),
        String::from("OK2"),
    ];

    let outcome = api.upload_place_photos(&details, &selected).await;

    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].reference, "GONE");
    assert_eq!(outcome.failed[0].error, "Failed to fetch image: 403");
    assert!(
        outcome
            .succeeded
            .iter()
            .all(|p| p.path.starts_with("places/p1/") && p.path.ends_with(".jpg"))
    );
    assert_eq!(memory.len().await, 2);
}
