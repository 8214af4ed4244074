//! Media file downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::{InstagramApi, MediaSummary};
use crate::error::{Error, Result};
use crate::fs::media_filename;
use crate::media::{MediaResource, Post};
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Download every media file of a post into `target_dir`.
///
/// Existing files are left alone and reported as skipped.
pub async fn download_post_media(
    api: &InstagramApi,
    post: &Post,
    target_dir: &Path,
) -> Result<MediaSummary> {
    let options = api.options();
    let mut summary = MediaSummary::default();
    let total = post.resources.len();

    for (index, resource) in post.resources.iter().enumerate() {
        let filename = media_filename(&post.shortcode, index, total, resource)?;
        let output_path = target_dir.join(&filename);

        if output_path.exists() {
            if options.show_skipped_downloads {
                tracing::info!("Skipping existing file: {}", output_path.display());
            }
            summary.skipped.push(output_path);
            continue;
        }

        let downloaded_path = download_direct(api, resource, &output_path).await?;

        if options.show_downloads {
            tracing::info!("Downloaded: {}", downloaded_path.display());
        }
        summary.written.push(downloaded_path);
    }

    Ok(summary)
}

/// Stream one media file to disk.
///
/// Data goes to a `.part` file that is renamed once complete. The partial
/// file is removed if the download fails or is dropped midway.
async fn download_direct(
    api: &InstagramApi,
    resource: &MediaResource,
    output_path: &Path,
) -> Result<PathBuf> {
    let response = api.download_file(&resource.url).await?;

    let content_length = response.content_length();
    let show_progress =
        api.options().show_downloads && content_length.is_some_and(|l| l > PROGRESS_THRESHOLD);

    let progress = show_progress.then(|| create_download_bar(content_length.unwrap_or(0)));

    let part_path = output_path.with_extension(format!("{}.part", resource.file_extension));
    let part = PartFile::new(part_path);
    let mut file = File::create(part.path()).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Fetch(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    drop(file);
    part.persist(output_path).await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(output_path.to_path_buf())
}

/// A `.part` file that is deleted unless it is persisted.
struct PartFile {
    path: PathBuf,
    keep: bool,
}

impl PartFile {
    fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Move the finished file to its final name.
    async fn persist(mut self, output_path: &Path) -> Result<()> {
        tokio::fs::rename(&self.path, output_path).await?;
        self.keep = true;
        Ok(())
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        // Runs on early return and on cancellation, so this has to be sync.
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed partial file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Could not remove partial file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
