//! Instagram public profile adapter.
//!
//! Reads the `web_profile_info` endpoint used by the Instagram web app. A
//! single call carries both the profile and the first page of timeline
//! posts, so [`InstagramClient::posts`] reuses the profile request.

use chrono::DateTime;
use placehub_types::{IgPost, IgPostsResponse, IgProfile};
use serde_json::Value;
use tracing::debug;

use crate::config::{InstagramConfig, secret};
use crate::error::UpstreamError;

/// Posts returned when the caller does not ask for a count.
pub const DEFAULT_POST_LIMIT: usize = 12;

/// Upper bound on posts per request.
pub const MAX_POST_LIMIT: usize = 50;

/// User agent of the Instagram Android app; the web profile endpoint
/// refuses generic clients.
const INSTAGRAM_USER_AGENT: &str = "Instagram 219.0.0.12.117 Android";

/// Client for Instagram public profile data.
#[derive(Debug, Clone)]
pub struct InstagramClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
}

impl InstagramClient {
    /// Create a client with an explicit app id and base URL.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            app_id: app_id.into(),
        }
    }

    /// Create a client from configuration, or `None` when no app id is set.
    pub fn from_config(config: &InstagramConfig, client: reqwest::Client) -> Option<Self> {
        secret(config.app_id.as_ref()).map(|id| Self::new(client, config.base_url.clone(), id))
    }

    /// Fetch the public profile of `username`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotFound`] for unknown users,
    /// [`UpstreamError::Rejected`] when Instagram refuses the request, or a
    /// transport/decode error.
    pub async fn profile(&self, username: &str) -> Result<IgProfile, UpstreamError> {
        let user = self.fetch_user(username).await?;
        reshape_profile(&user, username)
    }

    /// Fetch up to `limit` recent posts of `username`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Rejected`] when the profile is private, plus
    /// everything [`profile`](Self::profile) can return.
    pub async fn posts(&self, username: &str, limit: usize) -> Result<IgPostsResponse, UpstreamError> {
        let user = self.fetch_user(username).await?;

        if user.get("is_private").and_then(Value::as_bool).unwrap_or(false) {
            return Err(UpstreamError::Rejected(String::from("Profile is private")));
        }

        let posts = reshape_posts(&user, clamp_limit(limit));
        Ok(IgPostsResponse {
            username: username.to_owned(),
            posts_count: posts.len(),
            posts,
        })
    }

    /// Call `web_profile_info` and return the `data.user` object.
    async fn fetch_user(&self, username: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/v1/users/web_profile_info/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("username", username)])
            .header("x-ig-app-id", &self.app_id)
            .header(reqwest::header::USER_AGENT, INSTAGRAM_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(format!("User not found: {username}")));
        }
        if !status.is_success() {
            return Err(UpstreamError::Rejected(format!(
                "Instagram request failed: {}",
                status.as_u16()
            )));
        }

        let mut json: Value = response.json().await?;
        debug!(username, "instagram profile fetched");

        match json.pointer_mut("/data/user").map(Value::take) {
            Some(user) if user.is_object() => Ok(user),
            _ => Err(UpstreamError::NotFound(format!("User not found: {username}"))),
        }
    }
}

/// Clamp a requested post count into `1..=MAX_POST_LIMIT`.
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_POST_LIMIT)
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn count_at(value: &Value, pointer: &str) -> u64 {
    value.pointer(pointer).and_then(Value::as_u64).unwrap_or(0)
}

fn reshape_profile(user: &Value, username: &str) -> Result<IgProfile, UpstreamError> {
    let avatar_url = str_at(user, "/profile_pic_url_hd")
        .or_else(|| str_at(user, "/profile_pic_url"))
        .unwrap_or_default();

    Ok(IgProfile {
        name: str_at(user, "/full_name").unwrap_or_default(),
        username: str_at(user, "/username").unwrap_or_else(|| username.to_owned()),
        bio: str_at(user, "/biography"),
        external_url: str_at(user, "/external_url"),
        avatar_url,
        followers_count: count_at(user, "/edge_followed_by/count"),
        following_count: count_at(user, "/edge_follow/count"),
        posts_count: count_at(user, "/edge_owner_to_timeline_media/count"),
        is_private: user.get("is_private").and_then(Value::as_bool).unwrap_or(false),
        is_verified: user.get("is_verified").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn reshape_posts(user: &Value, limit: usize) -> Vec<IgPost> {
    user.pointer("/edge_owner_to_timeline_media/edges")
        .and_then(Value::as_array)
        .map(|edges| {
            edges
                .iter()
                .filter_map(|edge| edge.get("node"))
                .filter_map(reshape_post)
                .take(limit)
                .collect()
        })
        .unwrap_or_default()
}

fn reshape_post(node: &Value) -> Option<IgPost> {
    let shortcode = str_at(node, "/shortcode")?;
    let likes = node
        .pointer("/edge_liked_by/count")
        .or_else(|| node.pointer("/edge_media_preview_like/count"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let date = node
        .get("taken_at_timestamp")
        .and_then(Value::as_i64)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();

    Some(IgPost {
        url: format!("https://www.instagram.com/p/{shortcode}/"),
        caption: str_at(node, "/edge_media_to_caption/edges/0/node/text"),
        likes,
        comments: count_at(node, "/edge_media_to_comment/count"),
        date,
        is_video: node.get("is_video").and_then(Value::as_bool).unwrap_or(false),
        media_url: str_at(node, "/display_url").unwrap_or_default(),
        shortcode,
    })
}
