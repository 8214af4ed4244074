//! Instagram web API HTTP client.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};

use crate::api::types::*;
use crate::api::{MediaSource, MediaSummary, Session};
use crate::config::OptionsConfig;
use crate::download::media::download_post_media;
use crate::download::pause_between_requests;
use crate::error::{Error, Result};
use crate::media::{parse_post, Post, Shortcode};

/// Instagram web base URL.
const WEB_BASE: &str = "https://www.instagram.com";

/// App ID the web client identifies itself with.
const IG_APP_ID: &str = "936619743392459";

/// Posts requested per feed page.
const FEED_PAGE_SIZE: usize = 12;

/// HTTP implementation of [`MediaSource`].
pub struct InstagramApi {
    client: Client,
    base_url: String,
    user_agent: String,
    options: OptionsConfig,
}

impl InstagramApi {
    /// Create a new API client.
    pub fn new(options: &OptionsConfig) -> Result<Self> {
        Self::with_base_url(options, WEB_BASE)
    }

    /// Create a client that talks to `base_url` instead of instagram.com.
    pub(crate) fn with_base_url(options: &OptionsConfig, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&options.user_agent)
            .build()
            .map_err(|e| Error::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: options.user_agent.clone(),
            options: options.clone(),
        })
    }

    pub fn options(&self) -> &OptionsConfig {
        &self.options
    }

    /// Attach the headers the web client sends with API calls.
    fn with_web_headers(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        let mut request = request
            .header("x-ig-app-id", IG_APP_ID)
            .header("x-requested-with", "XMLHttpRequest")
            .header(header::REFERER, format!("{}/", self.base_url));

        if let Some(cookies) = session.cookie_header() {
            request = request.header(header::COOKIE, cookies);
        }
        if let Some(csrf) = &session.csrf_token {
            request = request.header("x-csrftoken", csrf);
        }

        request
    }

    /// Make a GET request against the web API.
    async fn get(&self, session: &Session, path: &str, resource: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .with_web_headers(self.client.get(&url), session)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        check_status(response, resource, session).await
    }

    /// Look up a profile by username.
    pub async fn get_profile(&self, session: &Session, name: &str) -> Result<ProfileUser> {
        let path = format!("/api/v1/users/web_profile_info/?username={}", name);
        let resource = format!("Profile @{}", name);

        let response = self.get(session, &path, &resource).await?;
        let text = response.text().await?;

        let info: ProfileInfoResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Fetch(format!(
                "Failed to parse profile info: {} - Response: {}",
                e,
                snippet(&text, 500)
            ))
        })?;

        info.data
            .user
            .ok_or_else(|| Error::NotFound(format!("{} does not exist", resource)))
    }

    /// Fetch one page of a user's feed.
    pub async fn get_feed_page(
        &self,
        session: &Session,
        user_id: &str,
        max_id: Option<&str>,
    ) -> Result<FeedResponse> {
        let mut path = format!("/api/v1/feed/user/{}/?count={}", user_id, FEED_PAGE_SIZE);
        if let Some(max_id) = max_id {
            path.push_str(&format!("&max_id={}", max_id));
        }

        let response = self.get(session, &path, "Feed").await?;
        let text = response.text().await?;
        tracing::debug!("Feed response length: {} bytes", text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Fetch(format!(
                "Failed to parse feed: {} - Response: {}",
                e,
                snippet(&text, 500)
            ))
        })
    }

    /// Fetch media info for a post.
    pub async fn get_media_info(
        &self,
        session: &Session,
        shortcode: &Shortcode,
    ) -> Result<ApiMediaItem> {
        let path = format!("/api/v1/media/{}/info/", shortcode.media_id());
        let resource = format!("Post {}", shortcode);

        let response = self.get(session, &path, &resource).await?;
        let text = response.text().await?;
        tracing::debug!("Media info response: {}", text);

        let info: MediaInfoResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Fetch(format!(
                "Failed to parse media info: {} - Response: {}",
                e,
                snippet(&text, 500)
            ))
        })?;

        info.items.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!(
                "{} does not exist or is not accessible",
                resource
            ))
        })
    }

    /// Download a media file from a CDN URL.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }

    /// Obtain a CSRF token from the login page.
    async fn fetch_csrf_token(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/accounts/login/", self.base_url))
            .send()
            .await?;

        let token = response
            .cookies()
            .find(|c| c.name() == "csrftoken")
            .map(|c| c.value().to_string());

        token.ok_or_else(|| Error::Authentication("Could not obtain a CSRF token".to_string()))
    }
}

/// Leading `max_chars` characters of a response body, for error messages.
fn snippet(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(end, _)| &text[..end])
}

/// Map HTTP failures onto the error taxonomy.
async fn check_status(response: Response, resource: &str, session: &Session) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::RateLimited);
    }

    if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
        return Err(Error::NotFound(format!(
            "{} does not exist or is not accessible",
            resource
        )));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let hint = if session.is_authenticated() {
            "the session may have expired, delete the cached session and log in again"
        } else {
            "log in with -u/--username"
        };
        return Err(Error::Fetch(format!(
            "HTTP {} while fetching {}: {}",
            status, resource, hint
        )));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Fetch(format!(
            "HTTP {} while fetching {}: {}",
            status,
            resource,
            snippet(&body, 200)
        )));
    }

    Ok(response)
}

#[async_trait]
impl MediaSource for InstagramApi {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let csrf = self.fetch_csrf_token().await?;
        let timestamp = chrono::Utc::now().timestamp();
        let enc_password = format!("#PWD_INSTAGRAM_BROWSER:0:{}:{}", timestamp, password);

        let response = self
            .client
            .post(format!("{}/api/v1/web/accounts/login/ajax/", self.base_url))
            .header("x-ig-app-id", IG_APP_ID)
            .header("x-requested-with", "XMLHttpRequest")
            .header("x-csrftoken", &csrf)
            .header(header::REFERER, format!("{}/accounts/login/", self.base_url))
            .header(header::COOKIE, format!("csrftoken={}", csrf))
            .form(&[
                ("username", username),
                ("enc_password", enc_password.as_str()),
                ("queryParams", "{}"),
                ("optIntoOneTap", "false"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        let cookie = |name: &str| {
            response
                .cookies()
                .find(|c| c.name() == name)
                .map(|c| c.value().to_string())
        };
        let session_id = cookie("sessionid");
        let user_id = cookie("ds_user_id");
        let csrf_token = cookie("csrftoken").or(Some(csrf));

        let text = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Authentication(format!("Unexpected login response: {}", e))
        })?;

        if login.two_factor_required.unwrap_or(false) {
            return Err(Error::Authentication(
                "Two-factor authentication is required for this account and is not supported"
                    .to_string(),
            ));
        }

        if let Some(url) = login.checkpoint_url {
            let url = if url.starts_with("http") {
                url
            } else {
                format!("{}{}", self.base_url, url)
            };
            return Err(Error::Authentication(format!(
                "Instagram requires a security checkpoint, complete it in a browser: {}",
                url
            )));
        }

        if !login.authenticated {
            let reason = if login.user {
                format!("Wrong password for {}", username)
            } else if let Some(message) = login.message {
                message
            } else {
                format!("User {} does not exist", username)
            };
            return Err(Error::Authentication(reason));
        }

        let session_id = session_id.ok_or_else(|| {
            Error::Authentication("Login succeeded but no session cookie was set".to_string())
        })?;

        tracing::debug!("Login status: {:?}", login.status);

        Ok(Session {
            username: Some(username.to_string()),
            user_id: user_id.or(login.user_id),
            session_id: Some(session_id),
            csrf_token,
        })
    }

    async fn fetch_profile_posts(
        &self,
        session: &Session,
        name: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>> {
        let profile = self.get_profile(session, name).await?;

        if profile.is_private && !profile.followed_by_viewer {
            return Err(Error::NotFound(format!(
                "Profile @{} is private",
                profile.username
            )));
        }

        if let Some(media) = &profile.edge_owner_to_timeline_media {
            tracing::info!("@{} has {} posts", profile.username, media.count);
        }

        let limit_reached = |count: usize| limit.is_some_and(|n| count >= n);
        let mut posts = Vec::new();
        let mut max_id: Option<String> = None;

        while !limit_reached(posts.len()) {
            let page = self
                .get_feed_page(session, &profile.id, max_id.as_deref())
                .await?;

            for item in &page.items {
                if limit_reached(posts.len()) {
                    return Ok(posts);
                }
                match parse_post(item, self.options.download_videos) {
                    Ok(post) => posts.push(post),
                    Err(e) => tracing::warn!("Skipping post {}: {}", item.code, e),
                }
            }

            match page.next_max_id {
                Some(next) if page.more_available && !page.items.is_empty() => {
                    max_id = Some(next);
                    pause_between_requests(&self.options).await;
                }
                _ => break,
            }
        }

        Ok(posts)
    }

    async fn fetch_post(&self, session: &Session, shortcode: &Shortcode) -> Result<Post> {
        let item = self.get_media_info(session, shortcode).await?;
        parse_post(&item, self.options.download_videos)
    }

    async fn download_media(
        &self,
        _session: &Session,
        post: &Post,
        destination: &Path,
    ) -> Result<MediaSummary> {
        download_post_media(self, post, destination).await
    }
}
