use thiserror::Error;

/// Errors produced while resolving an Instagram URL to a video URL.
///
/// Only [`ResolveError::MissingUrl`], [`ResolveError::InvalidUrl`] and
/// [`ResolveError::AllStrategiesExhausted`] ever reach a caller of
/// [`crate::ReelResolver::resolve`]. The other variants are raised inside
/// individual strategies and downgraded to "no result" by the resolver.
///
/// # Example
///
/// ```
/// use reelcore::ResolveError;
///
/// let err = ResolveError::AllStrategiesExhausted { shortcode: "ABC123".into() };
/// assert_eq!(err.shortcode(), Some("ABC123"));
/// assert_eq!(err.subcategory(), "exhausted");
/// ```
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Request carried no URL (or an empty one)
    #[error("No URL provided")]
    MissingUrl,

    /// No shortcode could be extracted from the URL
    #[error("Invalid Instagram URL: {0}")]
    InvalidUrl(String),

    /// Shortcode contains a symbol outside the media id alphabet
    #[error("Invalid shortcode '{shortcode}': {reason}")]
    InvalidShortcode { shortcode: String, reason: String },

    /// Network, status or parse failure inside a strategy
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),

    /// Every strategy returned no result
    #[error("Failed to extract video. Instagram may have updated their API.")]
    AllStrategiesExhausted { shortcode: String },
}

/// Failure talking to one of the Instagram endpoints.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport errors (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("HTTP request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// Body was not the JSON we expected
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::UpstreamUnavailable(UpstreamError::Http(err))
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        ResolveError::UpstreamUnavailable(UpstreamError::Json(err))
    }
}

impl ResolveError {
    /// Short label for log fields
    pub fn subcategory(&self) -> &'static str {
        match self {
            ResolveError::MissingUrl => "missing_url",
            ResolveError::InvalidUrl(_) => "invalid_url",
            ResolveError::InvalidShortcode { .. } => "invalid_shortcode",
            ResolveError::UpstreamUnavailable(UpstreamError::Http(e)) if e.is_timeout() => "timeout",
            ResolveError::UpstreamUnavailable(UpstreamError::Http(_)) => "http",
            ResolveError::UpstreamUnavailable(UpstreamError::Status(_)) => "status",
            ResolveError::UpstreamUnavailable(UpstreamError::Json(_)) => "json",
            ResolveError::AllStrategiesExhausted { .. } => "exhausted",
        }
    }

    /// Shortcode the failure relates to, when one was extracted
    pub fn shortcode(&self) -> Option<&str> {
        match self {
            ResolveError::InvalidShortcode { shortcode, .. } | ResolveError::AllStrategiesExhausted { shortcode } => {
                Some(shortcode)
            }
            _ => None,
        }
    }

    /// Whether the error is the caller's fault (bad input) rather than Instagram's
    pub fn is_client_error(&self) -> bool {
        matches!(self, ResolveError::MissingUrl | ResolveError::InvalidUrl(_))
    }
}

/// Errors raised while loading [`crate::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Layer extraction failed (bad TOML, wrong types in env vars)
    #[error("Configuration error: {0}")]
    Figment(Box<figment::Error>),

    /// A value parsed but makes no sense
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Figment(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_display() {
        assert_eq!(ResolveError::MissingUrl.to_string(), "No URL provided");
    }

    #[test]
    fn test_subcategory() {
        assert_eq!(ResolveError::MissingUrl.subcategory(), "missing_url");
        assert_eq!(ResolveError::InvalidUrl("x".into()).subcategory(), "invalid_url");
        assert_eq!(
            UpstreamError::Status(reqwest::StatusCode::NOT_FOUND).to_string(),
            "HTTP request failed with status: 404 Not Found"
        );
        let err: ResolveError = UpstreamError::Status(reqwest::StatusCode::FORBIDDEN).into();
        assert_eq!(err.subcategory(), "status");
    }

    #[test]
    fn test_from_serde_json_is_upstream() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: ResolveError = json_err.into();
        assert!(matches!(err, ResolveError::UpstreamUnavailable(UpstreamError::Json(_))));
        assert_eq!(err.subcategory(), "json");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_shortcode_carried_by_exhausted() {
        let err = ResolveError::AllStrategiesExhausted {
            shortcode: "Cx1".to_string(),
        };
        assert_eq!(err.shortcode(), Some("Cx1"));
        assert_eq!(ResolveError::MissingUrl.shortcode(), None);
    }

    #[test]
    fn test_client_errors() {
        assert!(ResolveError::MissingUrl.is_client_error());
        assert!(ResolveError::InvalidUrl("nope".into()).is_client_error());
        assert!(!ResolveError::AllStrategiesExhausted { shortcode: "a".into() }.is_client_error());
    }
}
