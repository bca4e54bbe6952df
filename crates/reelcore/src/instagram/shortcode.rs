//! Shortcode extraction from Instagram URLs.
//!
//! Supports:
//! - `/reel/<code>`, `/reels/<code>`, `/p/<code>`, `/tv/<code>` anywhere in the URL
//!   (so `/<username>/reel/<code>/` works too)
//! - bare `instagram.com/<segment>` as a last resort for short links

use std::fmt;

use lazy_regex::{lazy_regex, Lazy, Regex};

use crate::core::error::{ResolveError, ResolveResult};
use crate::instagram::media_id::{media_id_from_shortcode, MediaId};

static REEL: Lazy<Regex> = lazy_regex!(r"/reel/([A-Za-z0-9_-]+)");
static REELS: Lazy<Regex> = lazy_regex!(r"/reels/([A-Za-z0-9_-]+)");
static POST: Lazy<Regex> = lazy_regex!(r"/p/([A-Za-z0-9_-]+)");
static TV: Lazy<Regex> = lazy_regex!(r"/tv/([A-Za-z0-9_-]+)");

/// Accepts any path segment, including reserved ones like `explore` or `accounts`.
static BARE_PATH: Lazy<Regex> = lazy_regex!(r"instagram\.com/([^/?#\s]+)");

/// Instagram's public post identifier, as found in the URL path.
///
/// Not validated against the media id alphabet: the bare-path fallback can
/// produce values the codec later rejects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcode(String);

impl Shortcode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Decode into the numeric media id used by the mobile API.
    pub fn media_id(&self) -> ResolveResult<MediaId> {
        media_id_from_shortcode(&self.0)
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Shortcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the shortcode from a raw URL string.
///
/// Content patterns are tried in a fixed order and the first one that matches
/// wins; the bare `instagram.com/<segment>` pattern is only consulted when none do.
pub fn extract_shortcode(url: &str) -> ResolveResult<Shortcode> {
    // bare path must stay last
    let patterns: [&Lazy<Regex>; 5] = [&REEL, &REELS, &POST, &TV, &BARE_PATH];

    patterns
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| Shortcode::new(m.as_str()))
        .ok_or_else(|| ResolveError::InvalidUrl(url.to_string()))
}
