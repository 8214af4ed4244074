//! Instagram media source module.
//!
//! This module provides:
//! - The `MediaSource` trait the downloader is written against
//! - An HTTP implementation backed by Instagram's web endpoints
//! - Explicit login sessions and their on-disk cache
//! - API response types

pub mod client;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::media::{Post, Shortcode};

pub use client::InstagramApi;
pub use session::{login, Session, SessionStore};

/// Files produced by downloading one post.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaSummary {
    /// Newly written media files.
    pub written: Vec<PathBuf>,
    /// Media files that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Where posts and their media come from.
///
/// Every call receives the session explicitly; implementations keep no
/// login state of their own.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Log in and return an authenticated session.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session>;

    /// Most recent posts of a profile, newest first, up to `limit` if given.
    async fn fetch_profile_posts(
        &self,
        session: &Session,
        name: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>>;

    /// A single post by shortcode.
    async fn fetch_post(&self, session: &Session, shortcode: &Shortcode) -> Result<Post>;

    /// Save the media files of `post` into `destination`, which must exist.
    ///
    /// Only raw media is written, never metadata sidecars.
    async fn download_media(
        &self,
        session: &Session,
        post: &Post,
        destination: &Path,
    ) -> Result<MediaSummary>;
}
