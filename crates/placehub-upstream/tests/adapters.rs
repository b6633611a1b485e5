//! Adapter tests against fake providers.
//!
//! Each test serves a tiny Axum app on `127.0.0.1:0` that imitates the
//! provider endpoint and points the adapter's base URL at it.

#![allow(clippy::unwrap_used)]

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use placehub_types::{SerperResult, SerperSearchMode, SerperSearchParams};
use placehub_upstream::{
    GooglePlacesClient, InstagramClient, MediaFetcher, SerperClient, UpstreamError, WebhookSender,
};
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn google_find_place_sends_key_and_query() {
    let router = Router::new().route(
        "/findplacefromtext/json",
        get(|Query(q): Query<std::collections::HashMap<String, String>>| async move {
            assert_eq!(q.get("key").map(String::as_str), Some("g-key"));
            assert_eq!(q.get("input").map(String::as_str), Some("pizza & pasta"));
            Json(serde_json::json!({
                "status": "OK",
                "candidates": [{
                    "place_id": "p1",
                    "name": "Luigi",
                    "formatted_address": "5 Via Roma",
                    "icon": "i.png",
                    "photos": [{"photo_reference": "ABC", "width": 1, "height": 1}]
                }]
            }))
        }),
    );
    let base = serve(router).await;

    let client = GooglePlacesClient::new(reqwest::Client::new(), base, "g-key");
    let candidates = client.find_place("pizza & pasta").await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].image, "/api/gplaces/photo?ref=ABC&maxwidth=400");
}

#[tokio::test]
async fn google_photo_passes_through_failure_status() {
    let router = Router::new().route("/photo", get(|| async { StatusCode::FORBIDDEN }));
    let base = serve(router).await;

    let client = GooglePlacesClient::new(reqwest::Client::new(), base, "g-key");
    let err = client.photo("REF", 400).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Status { status: 403, .. }));
}

#[tokio::test]
async fn serper_places_search_uses_api_key_header() {
    let router = Router::new().route(
        "/places",
        post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
            assert_eq!(headers.get("x-api-key").unwrap(), "s-key");
            assert_eq!(body["q"], "coffee");
            Json(serde_json::json!({
                "searchParameters": {"q": "coffee", "type": "places", "engine": "google"},
                "places": [{
                    "position": 1, "title": "Bean", "address": "1 St",
                    "latitude": 1.0, "longitude": 2.0, "cid": "42"
                }],
                "credits": 1
            }))
        }),
    );
    let base = serve(router).await;

    let client = SerperClient::new(reqwest::Client::new(), base, "s-key");
    let params = SerperSearchParams {
        q: String::from("coffee"),
        ..SerperSearchParams::default()
    };
    let result = client.search(SerperSearchMode::Places, &params).await.unwrap();

    match result {
        SerperResult::Places(places) => {
            assert_eq!(places.places.len(), 1);
            assert_eq!(places.places[0].cid.as_str(), "42");
            assert_eq!(places.credits, 1);
        }
        SerperResult::Search(_) => panic!("expected places result"),
    }
}

#[tokio::test]
async fn serper_refusal_carries_provider_message() {
    let router = Router::new().route(
        "/search",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({"message": "Unauthorized.", "statusCode": 403})),
            )
        }),
    );
    let base = serve(router).await;

    let client = SerperClient::new(reqwest::Client::new(), base, "bad");
    let err = client
        .search(SerperSearchMode::Search, &SerperSearchParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Rejected(ref m) if m == "Unauthorized."));
}

#[tokio::test]
async fn instagram_private_profile_has_no_posts() {
    let router = Router::new().route(
        "/api/v1/users/web_profile_info/",
        get(|headers: HeaderMap| async move {
            assert_eq!(headers.get("x-ig-app-id").unwrap(), "app");
            Json(serde_json::json!({
                "data": {"user": {"username": "secret", "is_private": true}}
            }))
        }),
    );
    let base = serve(router).await;

    let client = InstagramClient::new(reqwest::Client::new(), base, "app");
    let profile = client.profile("secret").await.unwrap();
    assert!(profile.is_private);

    let err = client.posts("secret", 12).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Rejected(ref m) if m == "Profile is private"));
}

#[tokio::test]
async fn instagram_unknown_user_is_not_found() {
    let router = Router::new().route(
        "/api/v1/users/web_profile_info/",
        get(|| async { StatusCode::NOT_FOUND }),
    );
    let base = serve(router).await;

    let client = InstagramClient::new(reqwest::Client::new(), base, "app");
    let err = client.profile("nobody").await.unwrap_err();

    assert!(matches!(err, UpstreamError::NotFound(_)));
}

#[tokio::test]
async fn webhook_non_ok_is_rejected() {
    let router = Router::new().route("/hook", post(|| async { StatusCode::BAD_GATEWAY }));
    let base = serve(router).await;

    let sender = WebhookSender::new(reqwest::Client::new(), format!("{base}/hook"));
    let err = sender.send(&serde_json::json!({"cid": "1"})).await.unwrap_err();

    assert_eq!(err.to_string(), "Webhook failed: 502");
}

#[tokio::test]
async fn media_fetch_reports_content_type() {
    let router = Router::new().route(
        "/cat.png",
        get(|| async { ([(header::CONTENT_TYPE, "image/png")], vec![0x89_u8, b'P', b'N', b'G']).into_response() }),
    );
    let base = serve(router).await;

    let fetcher = MediaFetcher::new(reqwest::Client::new(), "test-agent");
    let media = fetcher.fetch(&format!("{base}/cat.png")).await.unwrap();

    assert_eq!(media.content_type, "image/png");
    assert_eq!(media.bytes.len(), 4);

    let err = fetcher.fetch("ftp://example.com/cat.png").await.unwrap_err();
    assert!(matches!(err, UpstreamError::InvalidInput(_)));
}
