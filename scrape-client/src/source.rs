//! The boundary between orchestration and platform scraping internals.
//!
//! A [`PostSource`] fetches posts for one platform. The HTTP clients, OAuth
//! flows and platform rate-limiter machinery all live behind this trait in
//! downstream crates; a deployment without a registered source for a
//! platform simply skips it, the same degraded mode an unconfigured
//! credentials file produces.

use async_trait::async_trait;
use harvest_core::{Platform, ScrapeError, SocialPost};

#[async_trait]
pub trait PostSource: Send + Sync {
    fn platform(&self) -> Platform;

    /// Fetch up to `limit` posts for a topic (a subreddit name on Reddit, a
    /// hashtag on Twitter). A limit of zero fetches nothing.
    async fn fetch_posts(&self, topic: &str, limit: u64) -> Result<Vec<SocialPost>, ScrapeError>;
}
