//! Download state tracking.

use std::path::PathBuf;

use crate::api::MediaSummary;

/// A post that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub shortcode: String,
    pub reason: String,
}

/// Statistics for one run.
#[derive(Debug, Default)]
pub struct DownloadState {
    /// Mode the run was started in.
    pub mode: Option<&'static str>,

    /// Posts whose media was fetched (including ones already on disk).
    pub posts_downloaded: u64,

    pub written_files: Vec<PathBuf>,
    pub skipped_files: Vec<PathBuf>,
    pub failed: Vec<FailedItem>,
}

impl DownloadState {
    pub fn new(mode: &'static str) -> Self {
        Self {
            mode: Some(mode),
            ..Default::default()
        }
    }

    /// Record the files produced by one post.
    pub fn record_post(&mut self, summary: MediaSummary) {
        self.posts_downloaded += 1;
        self.written_files.extend(summary.written);
        self.skipped_files.extend(summary.skipped);
    }

    /// Record a post that failed.
    pub fn mark_failed(&mut self, shortcode: impl Into<String>, reason: impl ToString) {
        self.failed.push(FailedItem {
            shortcode: shortcode.into(),
            reason: reason.to_string(),
        });
    }

    pub fn files_written(&self) -> usize {
        self.written_files.len()
    }

    pub fn files_skipped(&self) -> usize {
        self.skipped_files.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}
