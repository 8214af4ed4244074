//! In-memory media source used by tests.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{MediaSource, MediaSummary, Session};
use crate::error::{Error, Result};
use crate::fs::media_filename;
use crate::media::{MediaResource, MediaType, Post, Shortcode};

/// Records every call and serves synthetic posts.
#[derive(Default)]
pub(crate) struct StubSource {
    calls: Mutex<Vec<String>>,
    profiles: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    missing: HashSet<String>,
    media_per_post: usize,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            media_per_post: 1,
            ..Default::default()
        }
    }

    /// Register a profile whose feed lists `shortcodes`, newest first.
    pub fn with_profile(mut self, name: &str, shortcodes: &[&str]) -> Self {
        self.profiles.insert(
            name.to_string(),
            shortcodes.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Fetching this shortcode fails with a network error.
    pub fn failing(mut self, shortcode: &str) -> Self {
        self.failing.insert(shortcode.to_string());
        self
    }

    /// Fetching this shortcode fails with not-found.
    pub fn missing(mut self, shortcode: &str) -> Self {
        self.missing.insert(shortcode.to_string());
        self
    }

    /// Number of media files each post carries.
    pub fn media_per_post(mut self, count: usize) -> Self {
        self.media_per_post = count;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn make_post(&self, code: &str) -> Result<Post> {
        if self.failing.contains(code) {
            return Err(Error::Fetch(format!("connection reset while fetching {}", code)));
        }
        if self.missing.contains(code) {
            return Err(Error::NotFound(format!("Post {}", code)));
        }

        let resources = (0..self.media_per_post)
            .map(|i| MediaResource {
                url: format!("https://cdn.example/{}/{}.jpg", code, i),
                media_type: MediaType::Image,
                file_extension: "jpg".to_string(),
                width: 1080,
                height: 1080,
            })
            .collect();

        Ok(Post {
            shortcode: Shortcode::new(code)?,
            owner_username: Some("stub".to_string()),
            taken_at: 1_558_000_000,
            resources,
        })
    }
}

#[async_trait]
impl MediaSource for StubSource {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        self.record(format!("authenticate {}", username));
        if password == "wrong" {
            return Err(Error::Authentication(format!(
                "Wrong password for {}",
                username
            )));
        }
        Ok(Session {
            username: Some(username.to_string()),
            user_id: Some("1".to_string()),
            session_id: Some("stub-session".to_string()),
            csrf_token: Some("stub-csrf".to_string()),
        })
    }

    async fn fetch_profile_posts(
        &self,
        _session: &Session,
        name: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>> {
        self.record(format!("profile {}", name));
        let codes = self
            .profiles
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Profile @{}", name)))?;

        codes
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|code| self.make_post(code))
            .collect()
    }

    async fn fetch_post(&self, _session: &Session, shortcode: &Shortcode) -> Result<Post> {
        self.record(format!("post {}", shortcode));
        self.make_post(shortcode.as_str())
    }

    async fn download_media(
        &self,
        _session: &Session,
        post: &Post,
        destination: &Path,
    ) -> Result<MediaSummary> {
        self.record(format!("download {}", post.shortcode));

        let mut summary = MediaSummary::default();
        let total = post.resources.len();
        for (index, resource) in post.resources.iter().enumerate() {
            let path = destination.join(media_filename(&post.shortcode, index, total, resource)?);
            if path.exists() {
                summary.skipped.push(path);
                continue;
            }
            tokio::fs::write(&path, resource.url.as_bytes()).await?;
            summary.written.push(path);
        }
        Ok(summary)
    }
}
