//! Media parsing utilities.

use url::Url;

use crate::api::types::{media_type, ApiMediaItem, Candidate, ImageVersions, VideoVersion};
use crate::error::{Error, Result};
use crate::media::item::{MediaResource, MediaType, Post};
use crate::media::shortcode::Shortcode;

/// Convert an API media item into a [`Post`].
///
/// Carousels are flattened into one resource per slide. When
/// `download_videos` is false, videos are replaced by their cover image.
pub fn parse_post(item: &ApiMediaItem, download_videos: bool) -> Result<Post> {
    let shortcode = Shortcode::new(&item.code)
        .map_err(|_| Error::Fetch(format!("API returned invalid shortcode '{}'", item.code)))?;

    let resources: Vec<MediaResource> = if item.media_type == media_type::CAROUSEL {
        item.carousel_media
            .iter()
            .filter_map(|slide| {
                select_resource(
                    slide.media_type,
                    slide.image_versions2.as_ref(),
                    &slide.video_versions,
                    download_videos,
                )
            })
            .collect()
    } else {
        select_resource(
            item.media_type,
            item.image_versions2.as_ref(),
            &item.video_versions,
            download_videos,
        )
        .into_iter()
        .collect()
    };

    if resources.is_empty() {
        return Err(Error::Fetch(format!(
            "Post {} has no downloadable media",
            shortcode
        )));
    }

    Ok(Post {
        shortcode,
        owner_username: item.user.as_ref().map(|u| u.username.clone()),
        taken_at: item.taken_at,
        resources,
    })
}

/// Pick the best rendition for one media node.
fn select_resource(
    kind: u8,
    images: Option<&ImageVersions>,
    videos: &[VideoVersion],
    download_videos: bool,
) -> Option<MediaResource> {
    if kind == media_type::VIDEO && download_videos {
        if let Some(video) = best_video(videos) {
            return Some(build_resource(
                &video.url,
                MediaType::Video,
                video.width,
                video.height,
            ));
        }
    }

    let image = best_candidate(images.map(|v| v.candidates.as_slice()).unwrap_or(&[]))?;
    Some(build_resource(
        &image.url,
        MediaType::Image,
        image.width,
        image.height,
    ))
}

fn best_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    // First entry wins ties; the API lists the original rendition first.
    candidates.iter().reduce(|best, c| {
        if resolution(c.width, c.height) > resolution(best.width, best.height) {
            c
        } else {
            best
        }
    })
}

fn best_video(videos: &[VideoVersion]) -> Option<&VideoVersion> {
    videos.iter().reduce(|best, v| {
        if resolution(v.width, v.height) > resolution(best.width, best.height) {
            v
        } else {
            best
        }
    })
}

fn resolution(width: u32, height: u32) -> u64 {
    (width as u64) * (height as u64)
}

fn build_resource(url: &str, media_type: MediaType, width: u32, height: u32) -> MediaResource {
    MediaResource {
        url: url.to_string(),
        media_type,
        file_extension: extract_extension(url, media_type),
        width,
        height,
    }
}

/// Extract a file extension from the URL, falling back to the media kind.
fn extract_extension(url: &str, media_type: MediaType) -> String {
    extract_extension_from_url(url)
        .filter(|ext| {
            mime_guess::from_ext(ext)
                .first_raw()
                .is_some_and(|mime| mime.starts_with(media_type.mime_prefix()))
        })
        .unwrap_or_else(|| media_type.default_extension().to_string())
}

/// Extract extension from URL path.
fn extract_extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let filename = parsed.path_segments()?.next_back()?;
    let (_, ext) = filename.rsplit_once('.')?;

    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ApiUser, CarouselMedia};

    fn candidate(url: &str, width: u32, height: u32) -> Candidate {
        Candidate {
            url: url.to_string(),
            width,
            height,
        }
    }

    fn image_item(code: &str) -> ApiMediaItem {
        ApiMediaItem {
            code: code.to_string(),
            taken_at: 1_558_000_000,
            media_type: media_type::IMAGE,
            image_versions2: Some(ImageVersions {
                candidates: vec![
                    candidate("https://cdn/small.jpg?stp=1", 320, 400),
                    candidate("https://cdn/large.jpg?stp=2", 1080, 1350),
                ],
            }),
            video_versions: Vec::new(),
            carousel_media: Vec::new(),
            user: Some(ApiUser {
                username: "someone".to_string(),
            }),
        }
    }

    #[test]
    fn test_image_post_picks_largest_candidate() {
        let post = parse_post(&image_item("BxqBZbQlH_9"), true).unwrap();
        assert_eq!(post.resources.len(), 1);
        assert_eq!(post.resources[0].url, "https://cdn/large.jpg?stp=2");
        assert_eq!(post.resources[0].file_extension, "jpg");
        assert_eq!(post.owner_username.as_deref(), Some("someone"));
    }

    #[test]
    fn test_video_post_prefers_video_version() {
        let mut item = image_item("BxqBZbQlH_9");
        item.media_type = media_type::VIDEO;
        item.video_versions = vec![
            VideoVersion {
                url: "https://cdn/low.mp4".to_string(),
                width: 480,
                height: 600,
            },
            VideoVersion {
                url: "https://cdn/high.mp4".to_string(),
                width: 720,
                height: 900,
            },
        ];

        let post = parse_post(&item, true).unwrap();
        assert_eq!(post.resources[0].media_type, MediaType::Video);
        assert_eq!(post.resources[0].url, "https://cdn/high.mp4");
        assert_eq!(post.resources[0].file_extension, "mp4");

        // Cover image only when videos are disabled
        let post = parse_post(&item, false).unwrap();
        assert_eq!(post.resources[0].media_type, MediaType::Image);
        assert_eq!(post.video_count(), 0);
    }

    #[test]
    fn test_carousel_is_flattened() {
        let mut item = image_item("ByyKifrFz_0");
        item.media_type = media_type::CAROUSEL;
        item.image_versions2 = None;
        item.carousel_media = vec![
            CarouselMedia {
                media_type: media_type::IMAGE,
                image_versions2: Some(ImageVersions {
                    candidates: vec![candidate("https://cdn/one.webp", 100, 100)],
                }),
                video_versions: Vec::new(),
            },
            CarouselMedia {
                media_type: media_type::VIDEO,
                image_versions2: None,
                video_versions: vec![VideoVersion {
                    url: "https://cdn/two.mp4".to_string(),
                    width: 100,
                    height: 100,
                }],
            },
        ];

        let post = parse_post(&item, true).unwrap();
        assert!(post.is_carousel());
        assert_eq!(post.resources[0].file_extension, "webp");
        assert_eq!(post.resources[1].media_type, MediaType::Video);
    }

    #[test]
    fn test_post_without_media_is_rejected() {
        let mut item = image_item("BxqBZbQlH_9");
        item.image_versions2 = None;
        assert!(matches!(parse_post(&item, true), Err(Error::Fetch(_))));
    }

    #[test]
    fn test_extract_extension() {
        assert_eq!(
            extract_extension("https://cdn/file.jpg?token=abc", MediaType::Image),
            "jpg"
        );
        assert_eq!(
            extract_extension("https://cdn/path/file.PNG", MediaType::Image),
            "png"
        );
        // Extension that doesn't match the media kind falls back
        assert_eq!(
            extract_extension("https://cdn/file.jpg", MediaType::Video),
            "mp4"
        );
        assert_eq!(extract_extension("https://cdn/noext", MediaType::Image), "jpg");
    }
}
