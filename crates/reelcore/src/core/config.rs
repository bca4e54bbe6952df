//! Configuration loading.
//!
//! Values are layered with `figment`, lowest precedence first:
//! 1. built-in defaults
//! 2. TOML file (`--config <path>`, or `reelgrab.toml` in the working directory)
//! 3. `REELGRAB_*` env vars, `__` separates sections (`REELGRAB_HTTP__TIMEOUT_SECS=5`)
//! 4. `INSTAGRAM_SESSIONID` / `INSTAGRAM_DS_USER_ID`, copied from browser cookies
//!
//! The resulting [`Config`] is immutable and handed to
//! [`crate::ReelResolver::from_config`]; nothing here is global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::core::error::ConfigError;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "reelgrab.toml";

/// Prefix for nested env overrides
pub const ENV_PREFIX: &str = "REELGRAB_";

/// Env var holding the `sessionid` browser cookie
pub const SESSION_ID_ENV: &str = "INSTAGRAM_SESSIONID";

/// Env var holding the `ds_user_id` browser cookie
pub const USER_ID_ENV: &str = "INSTAGRAM_DS_USER_ID";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub http: HttpConfig,
    pub endpoints: EndpointsConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// Authenticated browser session, copied by hand from a logged-in browser.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Value of the `sessionid` cookie
    #[serde(deserialize_with = "secret_string")]
    pub session_id: SecretString,
    /// Value of the `ds_user_id` cookie
    #[serde(deserialize_with = "plain_string")]
    pub user_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: SecretString::from(String::new()),
            user_id: String::new(),
        }
    }
}

impl SessionConfig {
    /// Whether a session id was configured at all
    pub fn has_session_id(&self) -> bool {
        !self.session_id.expose_secret().trim().is_empty()
    }

    /// Whether a user id was configured at all
    pub fn has_user_id(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout for every Instagram call
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl HttpConfig {
    /// Request timeout duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Base URLs of the Instagram hosts. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Host serving the public post pages and the GraphQL query endpoint
    pub web_base: String,
    /// Host serving the mobile app API
    pub mobile_base: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            web_base: "https://www.instagram.com".to_string(),
            mobile_base: "https://i.instagram.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string accepted by `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Build the provider stack without extracting it.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Figment::new()
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&[SESSION_ID_ENV, USER_ID_ENV]).map(|key| {
                if key.as_str().eq_ignore_ascii_case(SESSION_ID_ENV) {
                    "session.session_id".into()
                } else {
                    "session.user_id".into()
                }
            }))
    }

    /// Load and validate configuration.
    ///
    /// An explicitly passed `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(p) = path {
            if !p.exists() {
                return Err(ConfigError::InvalidValue {
                    key: "config",
                    reason: format!("file not found: {}", p.display()),
                });
            }
        }

        let config: Config = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, secs) in [
            ("http.timeout_secs", self.http.timeout_secs),
            ("http.connect_timeout_secs", self.http.connect_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        for (key, base) in [
            ("endpoints.web_base", &self.endpoints.web_base),
            ("endpoints.mobile_base", &self.endpoints.mobile_base),
        ] {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("expected an http(s) URL, got '{}'", base),
                });
            }
        }
        Ok(())
    }
}

/// Env layers turn all-digit values into numbers; cookie values are strings regardless.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn plain_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    plain_string(deserializer).map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.endpoints.web_base, "https://www.instagram.com");
        assert_eq!(config.endpoints.mobile_base, "https://i.instagram.com");
        assert_eq!(config.server.bind_addr(), "127.0.0.1:5000");
        assert!(!config.session.has_session_id());
        assert!(!config.session.has_user_id());
    }

    #[test]
    fn test_load_without_any_source_gives_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.http.timeout_secs, 10);
            assert_eq!(config.log.filter, "info");
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_layer() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [session]
                session_id = "abc%3Adef"
                user_id = "424242"

                [server]
                port = 8080
                "#,
            )?;

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.session.session_id.expose_secret(), "abc%3Adef");
            assert_eq!(config.session.user_id, "424242");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.host, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [http]
                timeout_secs = 30
                "#,
            )?;
            jail.set_env("REELGRAB_HTTP__TIMEOUT_SECS", "3");
            jail.set_env("INSTAGRAM_SESSIONID", "sess-from-env");
            jail.set_env("INSTAGRAM_DS_USER_ID", "987654321");

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.http.timeout_secs, 3);
            assert_eq!(config.session.session_id.expose_secret(), "sess-from-env");
            // all-digit env value still lands as a string
            assert_eq!(config.session.user_id, "987654321");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "config", .. }));
            Ok(())
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("REELGRAB_HTTP__TIMEOUT_SECS", "0");
            let err = Config::load(None).unwrap_err();
            assert!(err.to_string().contains("http.timeout_secs"));
            Ok(())
        });
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [http]
                connect_timeout_secs = 0
                "#,
            )?;
            let err = Config::load(None).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    key: "http.connect_timeout_secs",
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("REELGRAB_ENDPOINTS__WEB_BASE", "www.instagram.com");
            let err = Config::load(None).unwrap_err();
            assert!(err.to_string().contains("endpoints.web_base"));
            Ok(())
        });
    }

    #[test]
    fn test_session_debug_is_redacted() {
        let session = SessionConfig {
            session_id: SecretString::from("super-secret".to_string()),
            user_id: "1".to_string(),
        };
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("super-secret"));
    }
}
