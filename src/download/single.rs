//! Single post download logic.

use crate::api::{MediaSource, Session};
use crate::config::Config;
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::fs::{ensure_dir, get_post_folder};
use crate::media::{Post, Shortcode};

/// Download a single post by shortcode into its shortcode folder.
pub async fn download_single_post<S: MediaSource + ?Sized>(
    source: &S,
    session: &Session,
    config: &Config,
    state: &mut DownloadState,
    shortcode: &Shortcode,
) -> Result<()> {
    tracing::info!("Downloading post with shortcode {}...", shortcode);

    let post = source.fetch_post(session, shortcode).await?;

    match (post.owner_username.as_deref(), post.date()) {
        (Some(owner), Some(date)) => {
            tracing::info!("Post by @{} posted on {}", owner, date.format("%Y-%m-%d %H:%M"))
        }
        (Some(owner), None) => tracing::info!("Post by @{}", owner),
        _ => {}
    }

    if post.is_carousel() {
        tracing::info!(
            "Carousel with {} images and {} videos",
            post.image_count(),
            post.video_count()
        );
    }

    download_post(source, session, config, state, &post).await?;
    tracing::info!("Successfully downloaded post {}", shortcode);

    Ok(())
}

/// Create the post's folder and save its media into it.
///
/// A folder created here is removed again if the download fails before
/// anything was written to it.
pub async fn download_post<S: MediaSource + ?Sized>(
    source: &S,
    session: &Session,
    config: &Config,
    state: &mut DownloadState,
    post: &Post,
) -> Result<()> {
    let target_dir = get_post_folder(config, &post.shortcode)?;
    let existed = target_dir.is_dir();
    ensure_dir(&target_dir).await?;

    let summary = match source.download_media(session, post, &target_dir).await {
        Ok(summary) => summary,
        Err(e) => {
            if !existed {
                // Fails when non-empty, which keeps completed files.
                let _ = tokio::fs::remove_dir(&target_dir).await;
            }
            return Err(e);
        }
    };
    tracing::debug!(
        "Post {}: {} written, {} already present",
        post.shortcode,
        summary.written.len(),
        summary.skipped.len()
    );

    state.record_post(summary);
    Ok(())
}
