//! reelcore - resolve Instagram post/reel URLs to direct video URLs
//!
//! This library holds everything except the HTTP server: configuration,
//! errors, logging setup, and the Instagram resolution chain.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging
//! - `instagram`: shortcode extraction, media id codec, resolution strategies

pub mod core;
pub mod instagram;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{ResolveError, ResolveResult};
pub use instagram::{Resolution, ReelResolver, ResolveStrategy, Shortcode};
