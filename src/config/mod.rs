//! Configuration module for the instagram-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Building the validated download request from CLI inputs
//! - Configuration and input validation

pub mod loader;
pub mod request;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig};
pub use request::{DownloadRequest, RequestInputs, MODE_GUIDANCE};
pub use validation::{
    extract_shortcode_from_url, parse_shortcodes, validate_config, validate_username,
};
