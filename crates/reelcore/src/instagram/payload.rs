//! Navigation helpers for Instagram's undocumented JSON shapes.
//!
//! Everything here works on `serde_json::Value` with pointer lookups, because
//! the responses change shape without notice and a strict schema would fail on
//! the first unexpected field.

use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::Deserialize;
use serde_json::Value;

/// `window._sharedData = {...};</script>` as embedded in the legacy HTML post page.
static SHARED_DATA: Lazy<Regex> = lazy_regex!(r"(?s)window\._sharedData\s*=\s*(\{.*?\});?\s*</script>");

/// One encoded rendition of a video.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoVariant {
    pub url: String,
    #[serde(default)]
    pub height: u32,
}

/// Pick the variant with the largest height.
///
/// Ties keep the first maximum in document order.
pub fn best_variant(variants: &[VideoVariant]) -> Option<&VideoVariant> {
    variants.iter().fold(None, |best, candidate| match best {
        Some(current) if current.height >= candidate.height => Some(current),
        _ => Some(candidate),
    })
}

/// Parse a `video_versions` array, skipping entries without a usable `url`.
pub fn parse_variants(value: &Value) -> Vec<VideoVariant> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| VideoVariant::deserialize(v).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Legacy/mobile shape: `{"items": [{"video_versions": [...]}, ...]}`.
///
/// Returns the best variant URL of the first item that has any variants.
pub fn best_item_video(doc: &Value) -> Option<String> {
    doc.get("items")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("video_versions"))
        .map(parse_variants)
        .find(|variants| !variants.is_empty())
        .and_then(|variants| best_variant(&variants).map(|v| v.url.clone()))
}

/// `video_url` of a media node flagged `is_video: true`.
pub fn node_video_url(node: &Value) -> Option<String> {
    let is_video = node.get("is_video").and_then(Value::as_bool).unwrap_or(false);
    if !is_video {
        return None;
    }
    node.get("video_url").and_then(Value::as_str).map(String::from)
}

/// First video child of a carousel (`edge_sidecar_to_children`), in document order.
pub fn sidecar_video_url(media: &Value) -> Option<String> {
    media
        .pointer("/edge_sidecar_to_children/edges")?
        .as_array()?
        .iter()
        .filter_map(|edge| edge.get("node"))
        .find_map(node_video_url)
}

/// A way of turning a raw response body into a JSON document.
pub type BodyParser = fn(&str) -> Option<Value>;

/// Parser attempts in order; the first that yields a document wins.
pub const BODY_PARSERS: &[BodyParser] = &[parse_json_body, parse_shared_data];

/// Plain JSON body (`?__a=1` responses).
pub fn parse_json_body(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

/// JSON blob embedded in an HTML page as `window._sharedData`.
///
/// When the blob carries `entry_data.PostPage[0]`, that page object is
/// returned so callers can look for `graphql` at the top level either way.
pub fn parse_shared_data(body: &str) -> Option<Value> {
    let caps = SHARED_DATA.captures(body)?;
    let blob: Value = serde_json::from_str(caps.get(1)?.as_str()).ok()?;
    match blob.pointer("/entry_data/PostPage/0") {
        Some(page) => Some(page.clone()),
        None => Some(blob),
    }
}

/// Run [`BODY_PARSERS`] over a body.
pub fn parse_body(body: &str) -> Option<Value> {
    BODY_PARSERS.iter().find_map(|parse| parse(body))
}
