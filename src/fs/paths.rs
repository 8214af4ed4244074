//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;
use crate::media::Shortcode;

/// Directory a post's media is saved into: `<download dir>/<shortcode>`.
pub fn get_post_folder(config: &Config, shortcode: &Shortcode) -> Result<PathBuf> {
    let folder = sanitize_path_component(shortcode.as_str())?;
    Ok(config.download_directory().join(folder))
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
