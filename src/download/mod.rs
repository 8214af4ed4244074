//! Download module for content downloading.
//!
//! This module provides:
//! - Request dispatch
//! - Profile downloading
//! - Single post downloading
//! - Batch (shortcode file) downloading
//! - Media file downloading
//! - Download state tracking

pub mod batch;
pub mod dispatch;
pub mod media;
pub mod profile;
pub mod single;
pub mod state;

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::config::OptionsConfig;

pub use batch::download_batch;
pub use dispatch::dispatch;
pub use media::download_post_media;
pub use profile::download_profile;
pub use single::{download_post, download_single_post};
pub use state::{DownloadState, FailedItem};

/// Randomized pause between consecutive requests.
pub async fn pause_between_requests(options: &OptionsConfig) {
    if options.request_delay_max_ms == 0 {
        return;
    }

    let min = options.request_delay_min_ms.min(options.request_delay_max_ms);
    let delay_ms = rand::thread_rng().gen_range(min..=options.request_delay_max_ms);
    sleep(Duration::from_millis(delay_ms)).await;
}
