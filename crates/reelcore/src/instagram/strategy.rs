use async_trait::async_trait;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::core::error::ResolveResult;
use crate::instagram::shortcode::Shortcode;

/// The built-in strategies, in the order the resolver tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    PublicEndpoint,
    MobileApi,
    #[strum(serialize = "graphql")]
    GraphQl,
}

/// One self-contained way of turning a shortcode into a video URL.
///
/// `Ok(None)` means "nothing found, try the next strategy". Errors are treated
/// the same way by [`crate::ReelResolver`], but get logged with their cause.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Name used in logs and in [`crate::Resolution::strategy`]
    fn name(&self) -> &'static str;

    /// Attempt to resolve `shortcode` to a direct video URL.
    async fn resolve(&self, shortcode: &Shortcode) -> ResolveResult<Option<String>>;
}
