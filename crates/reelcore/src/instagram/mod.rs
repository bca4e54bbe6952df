//! Instagram URL resolution.
//!
//! [`ReelResolver`] extracts the shortcode from a post/reel URL and runs it
//! through an ordered chain of [`ResolveStrategy`] implementations until one
//! returns a direct video URL.

pub mod client;
pub mod graphql;
pub mod media_id;
pub mod mobile;
pub mod payload;
pub mod public;
pub mod resolver;
pub mod shortcode;
pub mod strategy;

pub use client::InstagramClient;
pub use graphql::GraphQlStrategy;
pub use media_id::{media_id_from_shortcode, shortcode_from_media_id, MediaId};
pub use mobile::MobileApiStrategy;
pub use public::PublicEndpointStrategy;
pub use resolver::{ReelResolver, Resolution};
pub use shortcode::{extract_shortcode, Shortcode};
pub use strategy::{ResolveStrategy, StrategyKind};
