use crate::error::HarvestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Platforms the collection run knows how to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Reddit, Platform::Twitter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub platform: Platform,
    pub subreddit: Option<String>,
    pub title: String,
    pub content: String,
    pub author: String,
    pub score: i64,
    pub comments_count: u32,
    pub url: String,
    pub created_utc: i64,
}

/// Per-run collection counts, filled in by the scraper.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub posts_collected: HashMap<Platform, u64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ScrapeReport {
    pub fn new() -> Self {
        Self {
            posts_collected: HashMap::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, platform: Platform, count: u64) {
        *self.posts_collected.entry(platform).or_insert(0) += count;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total(&self) -> u64 {
        self.posts_collected.values().sum()
    }
}

impl Default for ScrapeReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal state of a collection run.
///
/// A run moves from idle through a single scrape attempt into exactly one of
/// these states; there is no transition back.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(ScrapeReport),
    Cancelled,
    Failed(HarvestError),
}

impl RunOutcome {
    /// User cancellation is a clean stop, not a failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Completed(_) | RunOutcome::Cancelled => 0,
            RunOutcome::Failed(_) => 1,
        }
    }

    pub fn from_result(result: Result<ScrapeReport, HarvestError>) -> Self {
        match result {
            Ok(report) => RunOutcome::Completed(report),
            Err(HarvestError::Cancelled) => RunOutcome::Cancelled,
            Err(e) => RunOutcome::Failed(e),
        }
    }
}
