//! Strategy backed by the public `?__a=1&__d=dis` post-detail endpoint.
//!
//! Tries the `/reel/` and `/p/` slug forms in turn. Each attempt is isolated:
//! a transport error, bad status or unparsable body only skips that slug.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::ResolveResult;
use crate::instagram::client::{InstagramClient, BROWSER_HEADERS};
use crate::instagram::payload::{best_item_video, node_video_url, parse_body, sidecar_video_url};
use crate::instagram::shortcode::Shortcode;
use crate::instagram::strategy::{ResolveStrategy, StrategyKind};

/// Slug forms tried in order
const SLUGS: [&str; 2] = ["reel", "p"];

/// Query that asks the post page for its JSON representation
const DETAIL_QUERY: &[(&str, &str)] = &[("__a", "1"), ("__d", "dis")];

pub struct PublicEndpointStrategy {
    client: Arc<InstagramClient>,
}

impl PublicEndpointStrategy {
    pub fn new(client: Arc<InstagramClient>) -> Self {
        Self { client }
    }

    async fn try_slug(&self, slug: &str, shortcode: &Shortcode) -> ResolveResult<Option<String>> {
        let url = format!("{}/{}/{}/", self.client.web_base(), slug, shortcode);
        let response = self.client.get(&url, BROWSER_HEADERS, DETAIL_QUERY).await?;

        match parse_body(&response.body) {
            Some(doc) => Ok(find_video(&doc)),
            None => {
                tracing::debug!(%shortcode, slug, "Post page body is neither JSON nor carries _sharedData");
                Ok(None)
            }
        }
    }
}

/// Search a post-detail document for a video URL.
///
/// Order: single video under `graphql.shortcode_media`, then the first video
/// child of a carousel, then the legacy `items[].video_versions` list.
pub fn find_video(doc: &Value) -> Option<String> {
    let media = doc.pointer("/graphql/shortcode_media");

    media
        .and_then(node_video_url)
        .or_else(|| media.and_then(sidecar_video_url))
        .or_else(|| best_item_video(doc))
}

#[async_trait]
impl ResolveStrategy for PublicEndpointStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::PublicEndpoint.into()
    }

    async fn resolve(&self, shortcode: &Shortcode) -> ResolveResult<Option<String>> {
        for slug in SLUGS {
            match self.try_slug(slug, shortcode).await {
                Ok(Some(video_url)) => {
                    tracing::debug!(%shortcode, slug, "Public endpoint found video");
                    return Ok(Some(video_url));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::info!(%shortcode, slug, error = %e, "Public endpoint attempt failed");
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{EndpointsConfig, SessionConfig};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn strategy_for(server: &MockServer) -> PublicEndpointStrategy {
        let endpoints = EndpointsConfig {
            web_base: server.uri(),
            mobile_base: server.uri(),
        };
        let client = InstagramClient::with_client(reqwest::Client::new(), &SessionConfig::default(), endpoints);
        PublicEndpointStrategy::new(Arc::new(client))
    }

    #[test]
    fn test_find_video_single() {
        let doc = json!({"graphql": {"shortcode_media": {"is_video": true, "video_url": "single"}}});
        assert_eq!(find_video(&doc).as_deref(), Some("single"));
    }

    #[test]
    fn test_find_video_sidecar_second_child() {
        let doc = json!({"graphql": {"shortcode_media": {
            "is_video": false,
            "edge_sidecar_to_children": {"edges": [
                {"node": {"is_video": false, "display_url": "photo"}},
                {"node": {"is_video": true, "video_url": "child-2"}}
            ]}
        }}});
        assert_eq!(find_video(&doc).as_deref(), Some("child-2"));
    }

    #[test]
    fn test_find_video_video_flag_without_url_falls_through() {
        let doc = json!({
            "graphql": {"shortcode_media": {"is_video": true}},
            "items": [{"video_versions": [{"url": "legacy", "height": 640}]}]
        });
        assert_eq!(find_video(&doc).as_deref(), Some("legacy"));
    }

    #[test]
    fn test_find_video_items_shape() {
        let doc = json!({"items": [{"video_versions": [
            {"url": "360", "height": 360},
            {"url": "720", "height": 720},
            {"url": "480", "height": 480}
        ]}]});
        assert_eq!(find_video(&doc).as_deref(), Some("720"));
    }

    #[test]
    fn test_find_video_photo_post() {
        let doc = json!({"graphql": {"shortcode_media": {"is_video": false, "display_url": "p.jpg"}}});
        assert!(find_video(&doc).is_none());
    }

    #[tokio::test]
    async fn test_reel_slug_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reel/ABC123/"))
            .and(query_param("__a", "1"))
            .and(query_param("__d", "dis"))
            .and(header("sec-fetch-mode", "navigate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "graphql": {"shortcode_media": {"is_video": true, "video_url": "https://cdn/reel.mp4"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let found = strategy_for(&server).resolve(&Shortcode::new("ABC123")).await.unwrap();
        assert_eq!(found.as_deref(), Some("https://cdn/reel.mp4"));
    }

    #[tokio::test]
    async fn test_falls_back_to_post_slug_after_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reel/ABC123/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/p/ABC123/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"video_versions": [{"url": "https://cdn/p.mp4", "height": 1080}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let found = strategy_for(&server).resolve(&Shortcode::new("ABC123")).await.unwrap();
        assert_eq!(found.as_deref(), Some("https://cdn/p.mp4"));
    }

    #[tokio::test]
    async fn test_html_shared_data_page() {
        let server = MockServer::start().await;
        let html = r#"<!DOCTYPE html><html><head>
<script type="text/javascript">window._sharedData = {"entry_data":{"PostPage":[{"graphql":{"shortcode_media":{"is_video":true,"video_url":"https://cdn/html.mp4"}}}]}};</script>
</head></html>"#;
        Mock::given(method("GET"))
            .and(path("/reel/HTML1/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&server)
            .await;

        let found = strategy_for(&server).resolve(&Shortcode::new("HTML1")).await.unwrap();
        assert_eq!(found.as_deref(), Some("https://cdn/html.mp4"));
    }

    #[tokio::test]
    async fn test_unparsable_bodies_give_no_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>Login • Instagram</html>"))
            .expect(2)
            .mount(&server)
            .await;

        let found = strategy_for(&server).resolve(&Shortcode::new("XYZ")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_connection_refused_gives_no_result() {
        // bind then drop so nothing listens on the port
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let base = format!("http://{}", addr);
        let endpoints = EndpointsConfig {
            web_base: base.clone(),
            mobile_base: base,
        };
        let client = InstagramClient::with_client(reqwest::Client::new(), &SessionConfig::default(), endpoints);
        let strategy = PublicEndpointStrategy::new(Arc::new(client));

        let err = strategy.try_slug("reel", &Shortcode::new("ABC123")).await.unwrap_err();
        assert_eq!(err.subcategory(), "http");

        let found = strategy.resolve(&Shortcode::new("ABC123")).await.unwrap();
        assert!(found.is_none());
    }
}
