//! Core utilities: configuration, errors, and logging

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, ResolveError};
pub use logging::{init_logger, log_session_configuration};
