//! Profile download logic.

use crate::api::{MediaSource, Session};
use crate::config::Config;
use crate::download::pause_between_requests;
use crate::download::single::download_post;
use crate::download::state::DownloadState;
use crate::error::Result;

/// Download the most recent posts of a profile, one folder per post.
///
/// Failing to list the profile is fatal. A post that fails afterwards is
/// logged, recorded and skipped.
pub async fn download_profile<S: MediaSource + ?Sized>(
    source: &S,
    session: &Session,
    config: &Config,
    state: &mut DownloadState,
    name: &str,
    limit: Option<usize>,
) -> Result<()> {
    tracing::info!("Downloading posts from @{}...", name);

    let posts = source.fetch_profile_posts(session, name, limit).await?;
    tracing::info!("Found {} posts to download", posts.len());

    for (index, post) in posts.iter().enumerate() {
        if index > 0 {
            pause_between_requests(&config.options).await;
        }

        match post.date() {
            Some(date) => tracing::info!(
                "Downloading post {} from {}",
                post.shortcode,
                date.format("%Y-%m-%d %H:%M")
            ),
            None => tracing::info!("Downloading post {}", post.shortcode),
        }

        if let Err(e) = download_post(source, session, config, state, post).await {
            if !e.is_item_recoverable() {
                return Err(e);
            }
            tracing::warn!("Error downloading post {}: {}", post.shortcode, e);
            state.mark_failed(post.shortcode.as_str(), &e);
        }
    }

    tracing::info!(
        "Successfully downloaded {} posts from @{}",
        state.posts_downloaded,
        name
    );

    Ok(())
}
