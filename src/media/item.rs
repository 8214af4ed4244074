//! Post and media resource representation.

use chrono::{DateTime, TimeZone, Utc};

use crate::media::shortcode::Shortcode;

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Extension used when the download URL does not reveal one.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaType::Image => "jpg",
            MediaType::Video => "mp4",
        }
    }

    /// MIME top-level type for this media kind.
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            MediaType::Image => "image/",
            MediaType::Video => "video/",
        }
    }
}

/// A single downloadable file belonging to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResource {
    /// Download URL.
    pub url: String,

    pub media_type: MediaType,

    /// File extension (without dot).
    pub file_extension: String,

    pub width: u32,
    pub height: u32,
}

/// An Instagram post and the media it carries, in display order.
#[derive(Debug, Clone)]
pub struct Post {
    pub shortcode: Shortcode,

    /// Username of the post owner, when the API returned one.
    pub owner_username: Option<String>,

    /// Upload timestamp (seconds since epoch).
    pub taken_at: i64,

    pub resources: Vec<MediaResource>,
}

impl Post {
    /// Upload time as a UTC datetime.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.taken_at, 0).single()
    }

    /// Whether the post is a carousel (more than one media file).
    pub fn is_carousel(&self) -> bool {
        self.resources.len() > 1
    }

    pub fn image_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| r.media_type == MediaType::Image)
            .count()
    }

    pub fn video_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| r.media_type == MediaType::Video)
            .count()
    }
}
