//! API client facade
//!
//! One shared transport session per client instance; sub-clients route
//! every call through the parent, so authentication state set by one
//! (the bearer header installed by `auth().login`) is visible to all.
//! Non-2xx responses are normal envelopes with `success=false`, never
//! errors; transport failures are logged and propagated.

mod auth;
mod comments;
mod communities;
mod mask;
mod posts;
mod reacts;
mod response;
mod saved_posts;
mod search;
mod votes;

pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use communities::CommunitiesApi;
pub use mask::mask_sensitive;
pub use posts::PostsApi;
pub use reacts::{ReactTarget, ReactsApi};
pub use response::{ApiResponse, Payload, RawResponse};
pub use saved_posts::SavedPostsApi;
pub use search::{SearchApi, SearchType};
pub use votes::{VoteType, VotesApi};

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::TestkitResult;

/// Typed, domain-partitioned client for the blog backend.
pub struct BlogApi {
    http: reqwest::Client,
    base_url: String,
    headers: RwLock<HeaderMap>,
    cookies: RwLock<HashMap<String, String>>,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

impl BlogApi {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> TestkitResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("API client initialized: {}", base_url);
        Ok(Self {
            http,
            base_url,
            headers: RwLock::new(default_headers()),
            cookies: RwLock::new(HashMap::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Domain sub-clients. Each is a zero-state view borrowing this
    // client's transport.

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { api: self }
    }

    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi { api: self }
    }

    pub fn votes(&self) -> VotesApi<'_> {
        VotesApi { api: self }
    }

    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi { api: self }
    }

    pub fn reacts(&self) -> ReactsApi<'_> {
        ReactsApi { api: self }
    }

    pub fn communities(&self) -> CommunitiesApi<'_> {
        CommunitiesApi { api: self }
    }

    pub fn saved_posts(&self) -> SavedPostsApi<'_> {
        SavedPostsApi { api: self }
    }

    pub fn search(&self) -> SearchApi<'_> {
        SearchApi { api: self }
    }

    /// Install the bearer token as the default Authorization header.
    pub fn set_bearer(&self, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            self.headers.write().insert(AUTHORIZATION, value);
            debug!("auth token set in default headers");
        }
    }

    pub fn drop_bearer(&self) {
        self.headers.write().remove(AUTHORIZATION);
    }

    /// The currently installed bearer token, if any.
    pub fn bearer(&self) -> Option<String> {
        self.headers
            .read()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
    }

    /// Snapshot of the session cookie jar as name→value pairs, for
    /// transplanting an API-established session into a browser context.
    pub fn cookies(&self) -> HashMap<String, String> {
        self.cookies.read().clone()
    }

    /// Drop all cookies and auth headers, returning the client to a
    /// pristine unauthenticated state. Idempotent.
    pub fn clear_session(&self) {
        self.cookies.write().clear();
        *self.headers.write() = default_headers();
        info!("session cleared");
    }

    fn cookie_header(&self) -> String {
        self.cookies
            .read()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn absorb_cookies(&self, headers: &HeaderMap) {
        let mut jar = self.cookies.write();
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let Some(pair) = raw.split(';').next() else { continue };
            let Some((name, value)) = pair.split_once('=') else { continue };
            let name = name.trim().to_string();
            if value.is_empty() {
                jar.remove(&name);
            } else {
                jar.insert(name, value.to_string());
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> TestkitResult<ApiResponse> {
        let url = self.url(path);
        info!("{} {}", method, url);
        if let Some(body) = body {
            debug!("request body: {}", mask_sensitive(body));
        }

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = request.headers(self.headers.read().clone());
        let cookie_header = self.cookie_header();
        if !cookie_header.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&cookie_header) {
                request = request.header(COOKIE, value);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("API request failed: {}: {}", url, e);
            crate::error::TestkitError::from(e)
        })?;

        self.absorb_cookies(response.headers());

        let status = response.status().as_u16();
        let raw = RawResponse {
            status,
            headers: response.headers().clone(),
            url: response.url().to_string(),
        };
        let text = response.text().await?;
        let data = match serde_json::from_str::<Value>(&text) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(text),
        };

        info!("response: {}", status);
        if let Payload::Json(value) = &data {
            debug!("response body: {}", mask_sensitive(value));
        }

        Ok(ApiResponse::new(status, data, raw))
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TestkitResult<ApiResponse> {
        self.request(Method::GET, path, query, None).await
    }

    pub(crate) async fn post(&self, path: &str, body: Value) -> TestkitResult<ApiResponse> {
        self.request(Method::POST, path, &[], Some(&body)).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> TestkitResult<ApiResponse> {
        self.request(Method::POST, path, &[], None).await
    }

    pub(crate) async fn patch(&self, path: &str, body: Value) -> TestkitResult<ApiResponse> {
        self.request(Method::PATCH, path, &[], Some(&body)).await
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TestkitResult<ApiResponse> {
        self.request(Method::DELETE, path, query, None).await
    }
}
