//! Download request definitions.

use std::fmt;
use std::path::PathBuf;

use crate::config::validation::{extract_shortcode_from_url, validate_username};
use crate::error::{Error, Result};
use crate::media::Shortcode;

/// Guidance shown when the input modes are missing or combined.
pub const MODE_GUIDANCE: &str =
    "Provide exactly one of: -t/--target, -s/--shortcode, -P/--url, or --shortcodes-file";

/// Raw, unvalidated request inputs as they come from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestInputs {
    pub target: Option<String>,
    pub count: Option<usize>,
    pub shortcode: Option<String>,
    pub url: Option<String>,
    pub shortcodes_file: Option<PathBuf>,
}

/// What a single run downloads. Exactly one mode per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadRequest {
    /// Most recent posts of a profile; `limit` of `None` means all posts.
    Profile { name: String, limit: Option<usize> },
    /// A single post by shortcode.
    Shortcode(Shortcode),
    /// A single post by URL, with its shortcode already extracted.
    Url { url: String, shortcode: Shortcode },
    /// A file of newline-delimited shortcodes.
    Batch { path: PathBuf },
}

impl DownloadRequest {
    /// Validate raw inputs into a request.
    ///
    /// Fails with [`Error::Usage`] unless exactly one mode is selected.
    pub fn from_inputs(inputs: RequestInputs) -> Result<Self> {
        let selected = [
            inputs.target.is_some(),
            inputs.shortcode.is_some(),
            inputs.url.is_some(),
            inputs.shortcodes_file.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count();

        match selected {
            0 => return Err(Error::Usage(format!("No download mode given. {}", MODE_GUIDANCE))),
            1 => {}
            _ => {
                return Err(Error::Usage(format!(
                    "Download modes are mutually exclusive. {}",
                    MODE_GUIDANCE
                )))
            }
        }

        if inputs.count.is_some() && inputs.target.is_none() {
            return Err(Error::Usage(
                "-c/--count can only be used with -t/--target".to_string(),
            ));
        }

        if let Some(target) = inputs.target {
            let name = validate_username("target", &target)?;
            // 0 keeps the "all posts" meaning of the count flag
            let limit = inputs.count.filter(|&count| count > 0);
            return Ok(DownloadRequest::Profile { name, limit });
        }

        if let Some(code) = inputs.shortcode {
            return Ok(DownloadRequest::Shortcode(Shortcode::new(&code)?));
        }

        if let Some(url) = inputs.url {
            let shortcode = extract_shortcode_from_url(&url)?;
            return Ok(DownloadRequest::Url {
                url: url.trim().to_string(),
                shortcode,
            });
        }

        match inputs.shortcodes_file {
            Some(path) => Ok(DownloadRequest::Batch { path }),
            None => Err(Error::Usage(MODE_GUIDANCE.to_string())),
        }
    }

    /// Short name of the mode, for logs and summaries.
    pub fn mode_name(&self) -> &'static str {
        match self {
            DownloadRequest::Profile { .. } => "profile",
            DownloadRequest::Shortcode(_) => "shortcode",
            DownloadRequest::Url { .. } => "url",
            DownloadRequest::Batch { .. } => "batch",
        }
    }
}

impl fmt::Display for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadRequest::Profile { name, limit: Some(n) } => {
                write!(f, "@{} ({} most recent posts)", name, n)
            }
            DownloadRequest::Profile { name, limit: None } => write!(f, "@{} (all posts)", name),
            DownloadRequest::Shortcode(code) => write!(f, "post {}", code),
            DownloadRequest::Url { url, .. } => write!(f, "{}", url),
            DownloadRequest::Batch { path } => write!(f, "shortcodes from {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RequestInputs {
        RequestInputs::default()
    }

    #[test]
    fn test_no_mode_is_usage_error() {
        assert!(matches!(
            DownloadRequest::from_inputs(inputs()),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn test_multiple_modes_are_usage_errors() {
        let combos = [
            RequestInputs {
                target: Some("nasa".into()),
                shortcode: Some("BxqBZbQlH_9".into()),
                ..inputs()
            },
            RequestInputs {
                shortcode: Some("BxqBZbQlH_9".into()),
                url: Some("https://www.instagram.com/p/BxqBZbQlH_9/".into()),
                ..inputs()
            },
            RequestInputs {
                url: Some("https://www.instagram.com/p/BxqBZbQlH_9/".into()),
                shortcodes_file: Some(PathBuf::from("codes.txt")),
                ..inputs()
            },
            RequestInputs {
                target: Some("nasa".into()),
                shortcode: Some("BxqBZbQlH_9".into()),
                url: Some("https://www.instagram.com/p/BxqBZbQlH_9/".into()),
                shortcodes_file: Some(PathBuf::from("codes.txt")),
                ..inputs()
            },
        ];

        for combo in combos {
            assert!(matches!(
                DownloadRequest::from_inputs(combo),
                Err(Error::Usage(_))
            ));
        }
    }

    #[test]
    fn test_profile_request() {
        let request = DownloadRequest::from_inputs(RequestInputs {
            target: Some("@nasa".into()),
            count: Some(5),
            ..inputs()
        })
        .unwrap();
        assert_eq!(
            request,
            DownloadRequest::Profile {
                name: "nasa".into(),
                limit: Some(5)
            }
        );

        let request = DownloadRequest::from_inputs(RequestInputs {
            target: Some("nasa".into()),
            count: Some(0),
            ..inputs()
        })
        .unwrap();
        assert_eq!(
            request,
            DownloadRequest::Profile {
                name: "nasa".into(),
                limit: None
            }
        );
    }

    #[test]
    fn test_count_without_target() {
        let result = DownloadRequest::from_inputs(RequestInputs {
            shortcode: Some("BxqBZbQlH_9".into()),
            count: Some(3),
            ..inputs()
        });
        assert!(matches!(result, Err(Error::Usage(_))));
    }

    #[test]
    fn test_url_request_extracts_shortcode() {
        let request = DownloadRequest::from_inputs(RequestInputs {
            url: Some("https://www.instagram.com/p/BxqBZbQlH_9/".into()),
            ..inputs()
        })
        .unwrap();

        match request {
            DownloadRequest::Url { shortcode, .. } => assert_eq!(shortcode.as_str(), "BxqBZbQlH_9"),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_url_without_shortcode_is_usage_error() {
        let result = DownloadRequest::from_inputs(RequestInputs {
            url: Some("https://www.instagram.com/nasa/".into()),
            ..inputs()
        });
        assert!(matches!(result, Err(Error::Usage(_))));
    }

    #[test]
    fn test_batch_and_shortcode_requests() {
        let request = DownloadRequest::from_inputs(RequestInputs {
            shortcodes_file: Some(PathBuf::from("codes.txt")),
            ..inputs()
        })
        .unwrap();
        assert_eq!(request.mode_name(), "batch");

        let request = DownloadRequest::from_inputs(RequestInputs {
            shortcode: Some("ByyKifrFz_0".into()),
            ..inputs()
        })
        .unwrap();
        assert_eq!(request.to_string(), "post ByyKifrFz_0");
    }
}
