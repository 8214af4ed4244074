//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, RequestInputs};

/// Instagram media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "instagram-downloader",
    version,
    about = "Download Instagram posts (images/videos) into shortcode-named folders",
    long_about = "Download Instagram posts (images/videos) into shortcode-named folders.\n\n\
                  Pick exactly one source: a profile (-t), a shortcode (-s), a post URL (-P),\n\
                  or a file of shortcodes (--shortcodes-file)."
)]
pub struct Args {
    /// Your Instagram username (for private profile access).
    #[arg(short, long, env = "INSTAGRAM_USERNAME")]
    pub username: Option<String>,

    /// Target Instagram profile to download from.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Number of recent posts to download from the target (0 for all).
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Shortcode of a specific Instagram post to download.
    #[arg(short, long)]
    pub shortcode: Option<String>,

    /// URL of a specific Instagram post to download.
    #[arg(short = 'P', long = "url", visible_alias = "post-url")]
    pub url: Option<String>,

    /// Path to a file containing shortcodes to download (one per line).
    #[arg(long = "shortcodes-file")]
    pub shortcodes_file: Option<PathBuf>,

    /// Base directory for the shortcode folders (default: current directory).
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Where to cache the login session.
    #[arg(long = "session-file")]
    pub session_file: Option<PathBuf>,

    /// Save only the cover image of video posts.
    #[arg(long)]
    pub no_videos: bool,

    /// Accepted for compatibility with older scripts; posts are always downloaded.
    #[arg(short = 'p', long = "posts-only", hide = true)]
    pub posts_only: bool,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// The download-mode inputs, for building a validated request.
    pub fn request_inputs(&self) -> RequestInputs {
        RequestInputs {
            target: self.target.clone(),
            count: self.count,
            shortcode: self.shortcode.clone(),
            url: self.url.clone(),
            shortcodes_file: self.shortcodes_file.clone(),
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if self.posts_only {
            tracing::debug!("--posts-only has no effect");
        }

        if let Some(username) = self.username {
            config.account.username = Some(username);
        }

        if let Some(session_file) = self.session_file {
            config.account.session_file = Some(session_file);
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        // Boolean flags (only override if set to non-default)
        if self.no_videos {
            config.options.download_videos = false;
        }

        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DownloadRequest;
    use crate::error::Error;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("instagram-downloader").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-u", "me", "-t", "nasa", "-c", "5"]);
        assert_eq!(args.username.as_deref(), Some("me"));
        assert_eq!(args.target.as_deref(), Some("nasa"));
        assert_eq!(args.count, Some(5));

        let args = parse(&["-P", "https://www.instagram.com/p/BxqBZbQlH_9/"]);
        assert!(args.url.is_some());

        let args = parse(&["--post-url", "https://www.instagram.com/p/BxqBZbQlH_9/"]);
        assert!(args.url.is_some());
    }

    #[test]
    fn test_posts_only_is_accepted() {
        let args = parse(&["-t", "nasa", "-p"]);
        assert!(args.posts_only);

        let request = DownloadRequest::from_inputs(args.request_inputs()).unwrap();
        assert_eq!(
            request,
            DownloadRequest::Profile {
                name: "nasa".to_string(),
                limit: None
            }
        );
    }

    #[test]
    fn test_conflicting_flags_are_usage_errors() {
        let args = parse(&["-t", "nasa", "-s", "BxqBZbQlH_9"]);
        let result = DownloadRequest::from_inputs(args.request_inputs());
        assert!(matches!(result, Err(Error::Usage(_))));

        let args = parse(&[]);
        let result = DownloadRequest::from_inputs(args.request_inputs());
        assert!(matches!(result, Err(Error::Usage(_))));
    }

    #[test]
    fn test_merge_into_config() {
        let args = parse(&[
            "-s",
            "BxqBZbQlH_9",
            "-u",
            "me",
            "-d",
            "/tmp/ig",
            "--no-videos",
            "--quiet",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.account.username.as_deref(), Some("me"));
        assert_eq!(config.download_directory(), PathBuf::from("/tmp/ig"));
        assert!(!config.options.download_videos);
        assert!(!config.options.show_downloads);
    }
}
