//! The scraping collaborator: contract trait and default implementation.

use crate::extract::extract_product_signals;
use crate::pacing::RequestPacing;
use crate::roster::{SubredditRoster, DEFAULT_ROSTER_PATH};
use crate::source::PostSource;
use async_trait::async_trait;
use harvest_core::{HarvestError, Platform, ScrapeError, ScrapeReport, ScrapeRunConfig, SocialPost};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Hashtags queried on Twitter, in priority order.
const TWITTER_HASHTAGS: &[&str] = &[
    "productreview",
    "recommendation",
    "amazingproduct",
    "worthit",
    "bestpurchase",
    "incredible",
    "fantastic",
    "loveit",
    "gamechanger",
    "musthave",
    "perfect",
    "excellent",
    "greatvalue",
    "toprated",
    "customerfavorite",
    "bestseller",
];

/// Only the top hashtags are queried per run; the platform quota is split
/// evenly between them.
const TWITTER_HASHTAG_BUDGET: usize = 5;

/// What the orchestration entry point consumes: a subreddit count for the
/// run summary and one blocking scrape operation.
#[async_trait]
pub trait SocialScraper: Send + Sync {
    fn subreddit_count(&self) -> usize;

    async fn scrape_all_platforms(&self) -> Result<ScrapeReport, HarvestError>;
}

pub struct FreshScraper {
    config: Arc<ScrapeRunConfig>,
    roster: SubredditRoster,
    sources: HashMap<Platform, Box<dyn PostSource>>,
}

impl FreshScraper {
    /// Build a scraper with the roster from the conventional path.
    pub fn from_config(config: Arc<ScrapeRunConfig>) -> Result<Self, ScrapeError> {
        let roster = SubredditRoster::load(DEFAULT_ROSTER_PATH)?;
        Self::with_roster(config, roster)
    }

    /// An empty roster is rejected here so the per-subreddit share below
    /// never divides by zero.
    pub fn with_roster(
        config: Arc<ScrapeRunConfig>,
        roster: SubredditRoster,
    ) -> Result<Self, ScrapeError> {
        if roster.is_empty() {
            return Err(ScrapeError::EmptyRoster);
        }

        Ok(Self {
            config,
            roster,
            sources: HashMap::new(),
        })
    }

    pub fn register_source(&mut self, source: Box<dyn PostSource>) {
        self.sources.insert(source.platform(), source);
    }

    pub fn config(&self) -> &ScrapeRunConfig {
        &self.config
    }

    /// Floor division of the platform quota across the roster. May be zero
    /// when the roster outnumbers the quota.
    pub fn posts_per_subreddit(&self, platform: Platform) -> u64 {
        self.config.quota_for(platform) / self.roster.len() as u64
    }

    async fn scrape_reddit(
        &self,
        source: &dyn PostSource,
        quota: u64,
        pacing: &RequestPacing,
        seen_ids: &mut HashSet<String>,
    ) -> u64 {
        let share = self.posts_per_subreddit(Platform::Reddit);
        info!(
            "Scraping reddit: {} subreddits, {} posts each",
            self.roster.len(),
            share
        );
        if share == 0 {
            warn!(
                "Roster size {} exceeds quota {}; no per-subreddit budget",
                self.roster.len(),
                quota
            );
            return 0;
        }

        let mut collected = 0u64;
        for (i, subreddit) in self.roster.iter().enumerate() {
            if collected >= quota {
                break;
            }
            if i > 0 {
                pacing.pause().await;
            }

            let limit = share.min(quota - collected);
            match source.fetch_posts(subreddit, limit).await {
                Ok(posts) => {
                    let fresh = self.ingest(posts, seen_ids);
                    debug!("r/{}: {} new posts", subreddit, fresh);
                    collected += fresh;
                }
                Err(e) => warn!("Error scraping r/{}: {}", subreddit, e),
            }
        }
        collected
    }

    async fn scrape_twitter(
        &self,
        source: &dyn PostSource,
        quota: u64,
        pacing: &RequestPacing,
        seen_ids: &mut HashSet<String>,
    ) -> u64 {
        let share = quota / TWITTER_HASHTAG_BUDGET as u64;
        info!(
            "Scraping twitter: {} hashtags, {} tweets each",
            TWITTER_HASHTAG_BUDGET, share
        );
        if share == 0 {
            warn!("Quota {} too small for the hashtag budget", quota);
            return 0;
        }

        let mut collected = 0u64;
        for (i, hashtag) in TWITTER_HASHTAGS
            .iter()
            .take(TWITTER_HASHTAG_BUDGET)
            .enumerate()
        {
            if collected >= quota {
                break;
            }
            if i > 0 {
                pacing.pause().await;
            }

            let limit = share.min(quota - collected);
            match source.fetch_posts(hashtag, limit).await {
                Ok(posts) => {
                    let fresh = self.ingest(posts, seen_ids);
                    debug!("#{}: {} new tweets", hashtag, fresh);
                    collected += fresh;
                }
                Err(e) => warn!("Error scraping #{}: {}", hashtag, e),
            }
        }
        collected
    }

    /// Dedupe by post id across the whole run and run signal extraction
    /// over everything that survives.
    fn ingest(&self, posts: Vec<SocialPost>, seen_ids: &mut HashSet<String>) -> u64 {
        let mut fresh = 0u64;
        for post in posts {
            if !seen_ids.insert(post.id.clone()) {
                continue;
            }

            let signals = extract_product_signals(&format!("{} {}", post.title, post.content));
            if signals.is_product_related() {
                debug!(
                    "Product signals in {}: brand={:?}, category={:?}, price={:?}",
                    post.id, signals.brand, signals.category, signals.price_mentioned
                );
            }
            fresh += 1;
        }
        fresh
    }
}

#[async_trait]
impl SocialScraper for FreshScraper {
    fn subreddit_count(&self) -> usize {
        self.roster.len()
    }

    async fn scrape_all_platforms(&self) -> Result<ScrapeReport, HarvestError> {
        info!("Starting social media data collection");
        let mut report = ScrapeReport::new();
        let pacing = RequestPacing::from_config(&self.config);
        let mut seen_ids: HashSet<String> = HashSet::new();

        for platform in Platform::ALL {
            let quota = self.config.quota_for(platform);
            if quota == 0 {
                debug!("Skipping {}: zero quota", platform);
                continue;
            }

            let Some(source) = self.sources.get(&platform) else {
                warn!("No source registered for {}, skipping", platform);
                report.record(platform, 0);
                continue;
            };

            let collected = match platform {
                Platform::Reddit => {
                    self.scrape_reddit(source.as_ref(), quota, &pacing, &mut seen_ids)
                        .await
                }
                Platform::Twitter => {
                    self.scrape_twitter(source.as_ref(), quota, &pacing, &mut seen_ids)
                        .await
                }
            };
            report.record(platform, collected);
        }

        report.finish();
        info!("Collection finished: {} posts total", report.total());
        Ok(report)
    }
}
