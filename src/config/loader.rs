//! Configuration structures and loading logic.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Login configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Instagram username to log in with. Anonymous access when unset.
    #[serde(default)]
    pub username: Option<String>,

    /// Where the cached session is stored. Defaults to the platform config dir.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

/// Download options configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Base directory under which shortcode folders are created.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Download video files. When false only the cover image is saved.
    #[serde(default = "default_true")]
    pub download_videos: bool,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Lower bound of the pause between consecutive posts.
    #[serde(default = "default_delay_min")]
    pub request_delay_min_ms: u64,

    /// Upper bound of the pause between consecutive posts. 0 disables the pause.
    #[serde(default = "default_delay_max")]
    pub request_delay_max_ms: u64,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to show files skipped because they already exist.
    #[serde(default = "default_true")]
    pub show_skipped_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            download_videos: true,
            user_agent: default_user_agent(),
            request_delay_min_ms: default_delay_min(),
            request_delay_max_ms: default_delay_max(),
            show_downloads: true,
            show_skipped_downloads: true,
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36".to_string()
}

fn default_true() -> bool {
    true
}

fn default_delay_min() -> u64 {
    400
}

fn default_delay_max() -> u64 {
    750
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[account]\nusername = \"someone\"\n\n[options]\ndownload_videos = false\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account.username.as_deref(), Some("someone"));
        assert!(!config.options.download_videos);
        assert!(config.options.show_downloads);
        assert_eq!(config.options.request_delay_min_ms, 400);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_download_directory_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[options]\ndownload_directory = \"/downloads\"\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.download_directory(), PathBuf::from("/downloads"));
    }
}
