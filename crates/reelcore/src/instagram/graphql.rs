//! Strategy backed by the persisted GraphQL query for post details.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::error::ResolveResult;
use crate::instagram::client::{InstagramClient, MOBILE_HEADERS};
use crate::instagram::payload::node_video_url;
use crate::instagram::shortcode::Shortcode;
use crate::instagram::strategy::{ResolveStrategy, StrategyKind};

/// Persisted query returning a post with its media node.
pub const POST_QUERY_HASH: &str = "2b0673e0dc4580674a88d426fe00ea90";

/// Media node locations, legacy first.
const MEDIA_POINTERS: [&str; 2] = ["/data/shortcode_media", "/data/xdt_shortcode_media"];

pub struct GraphQlStrategy {
    client: Arc<InstagramClient>,
}

impl GraphQlStrategy {
    pub fn new(client: Arc<InstagramClient>) -> Self {
        Self { client }
    }
}

/// `variables` parameter for [`POST_QUERY_HASH`].
pub fn query_variables(shortcode: &Shortcode) -> String {
    json!({
        "shortcode": shortcode.as_str(),
        "child_comment_count": 3,
        "fetch_comment_count": 40,
        "parent_comment_count": 24,
        "has_threaded_comments": true,
    })
    .to_string()
}

/// Video URL of the post's media node, falling back to the audio attribution clip.
pub fn media_video_url(doc: &Value) -> Option<String> {
    let media = MEDIA_POINTERS.iter().find_map(|p| doc.pointer(p))?;

    node_video_url(media).or_else(|| {
        media
            .pointer("/clips_music_attribution_info/video_url")
            .and_then(Value::as_str)
            .map(String::from)
    })
}

#[async_trait]
impl ResolveStrategy for GraphQlStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::GraphQl.into()
    }

    async fn resolve(&self, shortcode: &Shortcode) -> ResolveResult<Option<String>> {
        let url = format!("{}/graphql/query/", self.client.web_base());
        let variables = query_variables(shortcode);
        let query = [("query_hash", POST_QUERY_HASH), ("variables", variables.as_str())];

        let doc = self.client.get(&url, MOBILE_HEADERS, &query).await?.json()?;
        Ok(media_video_url(&doc))
    }
}
