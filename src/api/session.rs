//! Login sessions and the session cache.

use std::fs::{self, OpenOptions};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::MediaSource;
use crate::error::{Error, Result};

/// A login session, or the anonymous session for public access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: Option<String>,
    /// `ds_user_id` cookie.
    pub user_id: Option<String>,
    /// `sessionid` cookie.
    pub session_id: Option<String>,
    /// `csrftoken` cookie.
    pub csrf_token: Option<String>,
}

impl Session {
    /// Session for unauthenticated access to public content.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_id.is_some()
    }

    /// `Cookie` header value carrying this session, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let cookies: Vec<String> = [
            ("sessionid", &self.session_id),
            ("ds_user_id", &self.user_id),
            ("csrftoken", &self.csrf_token),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}={}", name, v)))
        .collect();

        if cookies.is_empty() {
            None
        } else {
            Some(cookies.join("; "))
        }
    }
}

/// On-disk cache of a single user's session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store in the platform config directory, one file per username.
    pub fn for_user(username: &str) -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "instagram-downloader").ok_or_else(|| {
            Error::Config("Could not determine a configuration directory".to_string())
        })?;
        Ok(Self::new(
            dirs.config_dir().join(format!("session-{}.json", username)),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached session, if one exists.
    pub fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    /// Write the session to disk, creating parent directories.
    ///
    /// On Unix the file is readable by its owner only.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(session)?;
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            // `mode` only applies to newly created files.
            if self.path.exists() {
                fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
            }
        }

        let mut file = options.open(&self.path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Log in as `username`, reusing a cached session when one exists.
///
/// `read_password` is only called when no cached session matches.
pub async fn login<S, F, Fut>(
    source: &S,
    store: &SessionStore,
    username: &str,
    read_password: F,
) -> Result<Session>
where
    S: MediaSource + ?Sized,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    match store.load() {
        Ok(Some(session))
            if session.is_authenticated() && session.username.as_deref() == Some(username) =>
        {
            tracing::info!("Loaded session for {} from {}", username, store.path().display());
            return Ok(session);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(
                "Ignoring unreadable session file {}: {}",
                store.path().display(),
                e
            );
        }
    }

    let password = read_password(username.to_string()).await?;
    let session = source.authenticate(username, &password).await?;

    if let Err(e) = store.save(&session) {
        tracing::warn!("Could not save session to {}: {}", store.path().display(), e);
    } else {
        tracing::debug!("Saved session to {}", store.path().display());
    }

    Ok(session)
}
