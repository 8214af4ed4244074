//! Routes a download request to its operation.

use crate::api::{MediaSource, Session};
use crate::config::{Config, DownloadRequest};
use crate::download::batch::download_batch;
use crate::download::profile::download_profile;
use crate::download::single::download_single_post;
use crate::download::state::DownloadState;
use crate::error::Result;

/// Run exactly one download operation for `request`.
pub async fn dispatch<S: MediaSource + ?Sized>(
    source: &S,
    session: &Session,
    config: &Config,
    request: &DownloadRequest,
) -> Result<DownloadState> {
    let mut state = DownloadState::new(request.mode_name());
    tracing::debug!("Dispatching {} request: {}", request.mode_name(), request);

    match request {
        DownloadRequest::Profile { name, limit } => {
            download_profile(source, session, config, &mut state, name, *limit).await?;
        }
        DownloadRequest::Shortcode(shortcode) => {
            download_single_post(source, session, config, &mut state, shortcode).await?;
        }
        DownloadRequest::Url { url, shortcode } => {
            tracing::info!("Extracted shortcode {} from {}", shortcode, url);
            download_single_post(source, session, config, &mut state, shortcode).await?;
        }
        DownloadRequest::Batch { path } => {
            download_batch(source, session, config, &mut state, path).await?;
        }
    }

    Ok(state)
}
