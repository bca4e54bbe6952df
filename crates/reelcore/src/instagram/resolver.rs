//! Fallback chain over [`ResolveStrategy`] implementations.
//!
//! The shortcode is extracted once and then handed to each strategy in turn.
//! The first strategy that yields a URL wins. Strategy errors are logged and
//! treated as "no result", so one broken endpoint never hides the others.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::{ResolveError, ResolveResult};
use crate::instagram::client::InstagramClient;
use crate::instagram::graphql::GraphQlStrategy;
use crate::instagram::mobile::MobileApiStrategy;
use crate::instagram::public::PublicEndpointStrategy;
use crate::instagram::shortcode::{extract_shortcode, Shortcode};
use crate::instagram::strategy::ResolveStrategy;

/// A successfully resolved reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub video_url: String,
    pub shortcode: Shortcode,
    /// Name of the strategy that produced the URL
    pub strategy: &'static str,
}

pub struct ReelResolver {
    strategies: Vec<Arc<dyn ResolveStrategy>>,
}

impl ReelResolver {
    /// Default chain: public endpoint, mobile API, GraphQL, sharing one client.
    pub fn from_config(config: &Config) -> ResolveResult<Self> {
        let client = Arc::new(InstagramClient::from_config(config)?);

        Ok(Self::with_strategies(vec![
            Arc::new(PublicEndpointStrategy::new(Arc::clone(&client))),
            Arc::new(MobileApiStrategy::new(Arc::clone(&client))),
            Arc::new(GraphQlStrategy::new(client)),
        ]))
    }

    pub fn with_strategies(strategies: Vec<Arc<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[Arc<dyn ResolveStrategy>] {
        &self.strategies
    }

    /// Resolve an Instagram URL to a direct video URL.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MissingUrl`] for an empty `url`
    /// - [`ResolveError::InvalidUrl`] when no shortcode can be extracted (a
    ///   whitespace-only `url` counts as present and lands here)
    /// - [`ResolveError::AllStrategiesExhausted`] when no strategy found a video
    pub async fn resolve(&self, url: &str) -> ResolveResult<Resolution> {
        if url.is_empty() {
            return Err(ResolveError::MissingUrl);
        }

        let shortcode = extract_shortcode(url)?;
        tracing::info!(%shortcode, "Resolving reel");

        for strategy in &self.strategies {
            let name = strategy.name();
            match strategy.resolve(&shortcode).await {
                Ok(Some(video_url)) => {
                    tracing::info!(%shortcode, strategy = name, "Resolved video URL");
                    return Ok(Resolution {
                        video_url,
                        shortcode,
                        strategy: name,
                    });
                }
                Ok(None) => {
                    tracing::debug!(%shortcode, strategy = name, "Strategy found no video");
                }
                Err(e) => {
                    tracing::warn!(
                        %shortcode,
                        strategy = name,
                        category = e.subcategory(),
                        error = %e,
                        "Strategy failed"
                    );
                }
            }
        }

        tracing::error!(%shortcode, tried = self.strategies.len(), "All strategies exhausted");
        Err(ResolveError::AllStrategiesExhausted {
            shortcode: shortcode.into_inner(),
        })
    }
}
