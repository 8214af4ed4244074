//! API response type definitions.

use serde::Deserialize;

/// Response from the web login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub authenticated: bool,
    /// Whether the username exists.
    #[serde(default)]
    pub user: bool,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub two_factor_required: Option<bool>,
    #[serde(default)]
    pub checkpoint_url: Option<String>,
}

/// Wrapper for the web profile info endpoint.
#[derive(Debug, Deserialize)]
pub struct ProfileInfoResponse {
    pub data: ProfileInfoData,
}

#[derive(Debug, Deserialize)]
pub struct ProfileInfoData {
    pub user: Option<ProfileUser>,
}

/// Public profile information.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub followed_by_viewer: bool,
    #[serde(default)]
    pub edge_owner_to_timeline_media: Option<EdgeCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeCount {
    pub count: u64,
}

/// One page of a user's feed.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub items: Vec<ApiMediaItem>,
    #[serde(default)]
    pub more_available: bool,
    #[serde(default)]
    pub next_max_id: Option<String>,
}

/// Response from the media info endpoint.
#[derive(Debug, Deserialize)]
pub struct MediaInfoResponse {
    #[serde(default)]
    pub items: Vec<ApiMediaItem>,
}

/// Media type codes used by the API.
pub mod media_type {
    pub const IMAGE: u8 = 1;
    pub const VIDEO: u8 = 2;
    pub const CAROUSEL: u8 = 8;
}

/// A post as returned by the feed and media info endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMediaItem {
    pub code: String,
    #[serde(default)]
    pub taken_at: i64,
    pub media_type: u8,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub video_versions: Vec<VideoVersion>,
    #[serde(default)]
    pub carousel_media: Vec<CarouselMedia>,
    #[serde(default)]
    pub user: Option<ApiUser>,
}

/// A single slide of a carousel post.
#[derive(Debug, Clone, Deserialize)]
pub struct CarouselMedia {
    pub media_type: u8,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub video_versions: Vec<VideoVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVersions {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A rendition of an image at one resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A rendition of a video at one resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoVersion {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}
