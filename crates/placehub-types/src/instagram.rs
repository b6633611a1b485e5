//! Instagram public profile and post shapes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Public profile information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IgProfile {
    /// Display name.
    pub name: String,
    /// Handle without the leading `@`.
    pub username: String,
    /// Profile biography.
    pub bio: Option<String>,
    /// Link shown on the profile.
    pub external_url: Option<String>,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Number of followers.
    pub followers_count: u64,
    /// Number of accounts followed.
    pub following_count: u64,
    /// Number of posts.
    pub posts_count: u64,
    /// Whether the account is private.
    #[serde(default)]
    pub is_private: bool,
    /// Whether the account is verified.
    #[serde(default)]
    pub is_verified: bool,
}

/// A single post from a profile's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IgPost {
    /// Short code identifying the post.
    pub shortcode: String,
    /// Permalink to the post.
    pub url: String,
    /// Caption text.
    pub caption: Option<String>,
    /// Like count.
    pub likes: u64,
    /// Comment count.
    pub comments: u64,
    /// Publication time, RFC 3339.
    pub date: String,
    /// Whether the post is a video.
    pub is_video: bool,
    /// Display image (or video cover) URL.
    pub media_url: String,
}

/// Response body of `GET /api/instagram/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IgPostsResponse {
    /// Handle the posts belong to.
    pub username: String,
    /// Number of posts returned.
    pub posts_count: usize,
    /// The posts, newest first.
    pub posts: Vec<IgPost>,
}
