//! Input and configuration validation logic.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::media::Shortcode;

/// Maximum Instagram username length.
const MAX_USERNAME_LENGTH: usize = 30;

/// Post, reel and IGTV URLs; the shortcode stops at `/`, `?` or `#`.
static POST_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?instagram\.com/(?:p|reel|tv)/([A-Za-z0-9_-]+)")
        .expect("post URL pattern is valid")
});

/// Usernames: letters, digits, periods and underscores.
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._]+$").expect("username pattern is valid"));

/// Validate the merged configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(username) = &config.account.username {
        validate_username("username", username)?;
    }

    let options = &config.options;
    if options.request_delay_min_ms > options.request_delay_max_ms {
        return Err(Error::ConfigValidation {
            field: "request_delay_min_ms".to_string(),
            message: format!(
                "Minimum delay ({} ms) exceeds maximum delay ({} ms)",
                options.request_delay_min_ms, options.request_delay_max_ms
            ),
        });
    }

    if options.user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: "User agent cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate an Instagram username (login or target profile).
pub fn validate_username(field: &str, username: &str) -> Result<String> {
    let clean = username.trim().trim_start_matches('@');

    if clean.is_empty() {
        return Err(Error::Usage(format!("{} cannot be empty", field)));
    }

    if clean.len() > MAX_USERNAME_LENGTH {
        return Err(Error::Usage(format!(
            "{} '{}' is too long (maximum {} characters)",
            field, username, MAX_USERNAME_LENGTH
        )));
    }

    if !USERNAME_PATTERN.is_match(clean) {
        return Err(Error::Usage(format!(
            "{} '{}' contains invalid characters. Only letters, digits, periods and underscores allowed.",
            field, username
        )));
    }

    Ok(clean.to_string())
}

/// Extract the post shortcode from an Instagram post URL.
pub fn extract_shortcode_from_url(url: &str) -> Result<Shortcode> {
    let url = url.trim();

    let code = POST_URL_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| {
            Error::Usage(format!("Could not extract shortcode from URL: {}", url))
        })?;

    Shortcode::new(code.as_str())
}

/// Parse newline-delimited shortcodes, skipping blank lines.
pub fn parse_shortcodes(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
