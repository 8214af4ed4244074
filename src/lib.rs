//! Instagram Downloader - download Instagram posts into shortcode folders.
//!
//! This library provides functionality for downloading images and videos
//! from Instagram posts.
//!
//! # Features
//!
//! - Download the most recent posts of a profile
//! - Download a single post by shortcode or URL
//! - Download every shortcode listed in a file
//! - Optional login with a cached session
//! - Only raw media is written, no metadata sidecars
//!
//! # Example
//!
//! ```no_run
//! use instagram_downloader::{dispatch, Config, DownloadRequest, InstagramApi, Session, Shortcode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = InstagramApi::new(&config.options)?;
//!     let request = DownloadRequest::Shortcode(Shortcode::new("BxqBZbQlH_9")?);
//!
//!     let state = dispatch(&api, &Session::anonymous(), &config, &request).await?;
//!     println!("{} files written", state.files_written());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{InstagramApi, MediaSource, MediaSummary, Session, SessionStore};
pub use config::{Config, DownloadRequest};
pub use download::{dispatch, DownloadState};
pub use error::{Error, Result};
pub use media::{MediaResource, MediaType, Post, Shortcode};
