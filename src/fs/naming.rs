//! Filename generation.

use crate::error::{Error, Result};
use crate::media::{MediaResource, Shortcode};

/// Sanitize a path component (folder or file name).
///
/// Problematic characters are replaced with underscores; traversal
/// sequences and null bytes are rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Filename for one media file of a post.
///
/// Single-media posts are saved as `<shortcode>.<ext>`; carousel slides as
/// `<shortcode>_<n>.<ext>` with `n` starting at 1.
pub fn media_filename(
    shortcode: &Shortcode,
    index: usize,
    total: usize,
    resource: &MediaResource,
) -> Result<String> {
    let name = if total > 1 {
        format!("{}_{}.{}", shortcode, index + 1, resource.file_extension)
    } else {
        format!("{}.{}", shortcode, resource.file_extension)
    };

    sanitize_path_component(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaType;

    fn resource(ext: &str) -> MediaResource {
        MediaResource {
            url: "https://cdn/x".to_string(),
            media_type: MediaType::Image,
            file_extension: ext.to_string(),
            width: 0,
            height: 0,
        }
    }

    #[test]
    fn test_media_filename_single() {
        let code = Shortcode::new("BxqBZbQlH_9").unwrap();
        assert_eq!(
            media_filename(&code, 0, 1, &resource("jpg")).unwrap(),
            "BxqBZbQlH_9.jpg"
        );
    }

    #[test]
    fn test_media_filename_carousel() {
        let code = Shortcode::new("ByyKifrFz_0").unwrap();
        assert_eq!(
            media_filename(&code, 0, 3, &resource("jpg")).unwrap(),
            "ByyKifrFz_0_1.jpg"
        );
        assert_eq!(
            media_filename(&code, 2, 3, &resource("mp4")).unwrap(),
            "ByyKifrFz_0_3.mp4"
        );
    }

    #[test]
    fn test_sanitize_path_component_valid() {
        assert_eq!(sanitize_path_component("BxqBZbQlH_9").unwrap(), "BxqBZbQlH_9");
        assert_eq!(
            sanitize_path_component("path/to/name").unwrap(),
            "path_to_name"
        );
    }

    #[test]
    fn test_sanitize_path_component_rejects() {
        assert!(sanitize_path_component("../evil").is_err());
        assert!(sanitize_path_component("foo\0bar").is_err());
        assert!(sanitize_path_component("   ").is_err());
    }
}
