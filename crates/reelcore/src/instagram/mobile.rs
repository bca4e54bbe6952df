//! Strategy backed by the private mobile API (`/api/v1/media/<id>/info/`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::ResolveResult;
use crate::instagram::client::{InstagramClient, MOBILE_HEADERS};
use crate::instagram::payload::best_item_video;
use crate::instagram::shortcode::Shortcode;
use crate::instagram::strategy::{ResolveStrategy, StrategyKind};

pub struct MobileApiStrategy {
    client: Arc<InstagramClient>,
}

impl MobileApiStrategy {
    pub fn new(client: Arc<InstagramClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResolveStrategy for MobileApiStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::MobileApi.into()
    }

    async fn resolve(&self, shortcode: &Shortcode) -> ResolveResult<Option<String>> {
        let media_id = match shortcode.media_id() {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(%shortcode, error = %e, "Shortcode has no media id, skipping mobile API");
                return Ok(None);
            }
        };

        if !self.client.has_session() {
            tracing::debug!(%shortcode, "Calling mobile API without a session cookie");
        }

        let url = format!("{}/api/v1/media/{}/info/", self.client.mobile_base(), media_id);
        let doc = self.client.get(&url, MOBILE_HEADERS, &[]).await?.json()?;

        Ok(best_item_video(&doc))
    }
}
