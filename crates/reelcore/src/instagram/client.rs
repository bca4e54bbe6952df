//! Shared HTTP client for all Instagram calls.
//!
//! Holds one `reqwest::Client` (with the request timeout), the session cookie
//! header and the endpoint base URLs. Built once from [`Config`] and shared by
//! every strategy behind an `Arc`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::core::config::{Config, EndpointsConfig, SessionConfig};
use crate::core::error::{ResolveResult, UpstreamError};

/// Instagram internal app ID (public, embedded in the web app).
pub const IG_APP_ID: &str = "936619743392459";

/// Android app user agent accepted by the mobile API.
pub const MOBILE_USER_AGENT: &str = "Instagram 219.0.0.12.117 Android";

/// Desktop Chrome user agent for the public post pages.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Header set that makes a request look like a top-level browser navigation.
///
/// `Accept-Encoding` is left to reqwest, which only advertises what it can decode.
pub const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("user-agent", BROWSER_USER_AGENT),
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.5"),
    ("dnt", "1"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("cache-control", "max-age=0"),
];

/// Header set of the Android app talking to the private API.
pub const MOBILE_HEADERS: &[(&str, &str)] = &[
    ("user-agent", MOBILE_USER_AGENT),
    ("x-ig-app-id", IG_APP_ID),
    ("accept", "*/*"),
    ("accept-language", "en-US"),
    ("x-requested-with", "XMLHttpRequest"),
];

/// Body and status of a successful upstream call.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
}

impl UpstreamResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> ResolveResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub struct InstagramClient {
    http: reqwest::Client,
    cookie: Option<SecretString>,
    endpoints: EndpointsConfig,
}

impl InstagramClient {
    pub fn from_config(config: &Config) -> ResolveResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout())
            .connect_timeout(config.http.connect_timeout())
            .build()?;

        Ok(Self::with_client(http, &config.session, config.endpoints.clone()))
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, session: &SessionConfig, endpoints: EndpointsConfig) -> Self {
        Self {
            http,
            cookie: cookie_header(session),
            endpoints,
        }
    }

    /// Base URL of the web host, without trailing slash.
    pub fn web_base(&self) -> &str {
        self.endpoints.web_base.trim_end_matches('/')
    }

    /// Base URL of the mobile API host, without trailing slash.
    pub fn mobile_base(&self) -> &str {
        self.endpoints.mobile_base.trim_end_matches('/')
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// GET `url` with the given header set and the session cookie.
    ///
    /// Non-success statuses are returned as [`UpstreamError::Status`].
    pub async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> ResolveResult<UpstreamResponse> {
        let mut request = self.http.get(url).headers(self.build_headers(headers));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, %status, "Instagram returned non-success status");
            return Err(UpstreamError::Status(status).into());
        }

        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }

    fn build_headers(&self, headers: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(headers.len() + 1);
        for (name, value) in headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                map.insert(name, value);
            }
        }
        if let Some(cookie) = &self.cookie {
            if let Ok(mut value) = HeaderValue::from_str(cookie.expose_secret()) {
                value.set_sensitive(true);
                map.insert(COOKIE, value);
            }
        }
        map
    }
}

/// `sessionid=...; ds_user_id=...`, leaving out empty values.
///
/// Returns `None` when neither value is configured.
pub fn cookie_header(session: &SessionConfig) -> Option<SecretString> {
    let mut parts = Vec::with_capacity(2);
    let session_id = session.session_id.expose_secret().trim();
    if !session_id.is_empty() {
        parts.push(format!("sessionid={}", session_id));
    }
    let user_id = session.user_id.trim();
    if !user_id.is_empty() {
        parts.push(format!("ds_user_id={}", user_id));
    }

    if parts.is_empty() {
        None
    } else {
        Some(SecretString::from(parts.join("; ")))
    }
}
