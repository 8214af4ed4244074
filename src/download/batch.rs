//! Batch download of shortcodes listed in a file.

use std::path::Path;

use crate::api::{MediaSource, Session};
use crate::config::{parse_shortcodes, Config};
use crate::download::pause_between_requests;
use crate::download::single::download_single_post;
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::media::Shortcode;

/// Download every shortcode listed in `path`, one per line.
///
/// Blank lines are ignored. Items that fail to fetch are logged, recorded
/// and skipped; the rest of the batch continues.
pub async fn download_batch<S: MediaSource + ?Sized>(
    source: &S,
    session: &Session,
    config: &Config,
    state: &mut DownloadState,
    path: &Path,
) -> Result<()> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::Usage(format!("Shortcode file '{}' not found", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    let shortcodes = parse_shortcodes(&content);
    tracing::info!(
        "Found {} shortcodes in {}. Starting download...",
        shortcodes.len(),
        path.display()
    );

    for (index, code) in shortcodes.iter().enumerate() {
        if index > 0 {
            pause_between_requests(&config.options).await;
        }

        let shortcode = match Shortcode::new(code) {
            Ok(shortcode) => shortcode,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", index + 1, e);
                state.mark_failed(code.as_str(), &e);
                continue;
            }
        };

        match download_single_post(source, session, config, state, &shortcode).await {
            Ok(()) => {}
            Err(e) if e.is_item_recoverable() => {
                tracing::warn!("Error downloading post {}: {}", shortcode, e);
                state.mark_failed(shortcode.as_str(), &e);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("All shortcodes processed.");
    Ok(())
}
