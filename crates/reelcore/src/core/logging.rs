//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Subscriber initialization (`tracing` + `log` bridge)
//! - Session configuration logging at startup

use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, SESSION_ID_ENV, USER_ID_ENV};
use crate::core::error::ConfigError;

/// Initialize the global tracing subscriber.
///
/// `default_filter` is used unless `RUST_LOG` is set. `log` records emitted by
/// dependencies are forwarded into the same subscriber.
pub fn init_logger(default_filter: &str) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| ConfigError::InvalidValue {
            key: "log.filter",
            reason: e.to_string(),
        })?;

    tracing_log::LogTracer::init().map_err(|e| ConfigError::InvalidValue {
        key: "log",
        reason: format!("failed to install log bridge: {}", e),
    })?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| ConfigError::InvalidValue {
        key: "log",
        reason: format!("failed to set subscriber: {}", e),
    })?;

    Ok(())
}

/// Logs the session configuration at startup.
///
/// Never prints the credential values, only whether they are present.
pub fn log_session_configuration(config: &Config) {
    let has_session = config.session.has_session_id();
    let has_user = config.session.has_user_id();

    if has_session && has_user {
        tracing::info!("Instagram session configured (sessionid + ds_user_id)");
    } else if has_session {
        tracing::warn!("Instagram sessionid set but ds_user_id missing; mobile API calls may be rejected");
    } else {
        tracing::warn!(
            "No Instagram session configured. Set {} and {} (or [session] in the config file); \
             only anonymous public lookups will work",
            SESSION_ID_ENV,
            USER_ID_ENV
        );
    }

    tracing::info!(
        web_base = %config.endpoints.web_base,
        mobile_base = %config.endpoints.mobile_base,
        timeout_secs = config.http.timeout_secs,
        "Upstream endpoints"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_session_configuration_runs() {
        // No subscriber installed: just make sure nothing panics on defaults.
        log_session_configuration(&Config::default());
    }
}
