//! Filesystem module.
//!
//! Provides:
//! - Shortcode folder management
//! - Media filename generation

pub mod naming;
pub mod paths;

pub use naming::{media_filename, sanitize_path_component};
pub use paths::{ensure_dir, get_post_folder};
