use crate::error::ConfigError;
use crate::types::Platform;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Inclusive bounds for the randomized inter-request delay.
///
/// Validated at construction: both bounds finite, non-negative, min <= max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub fn new(min_secs: f64, max_secs: f64) -> Result<Self, ConfigError> {
        for value in [min_secs, max_secs] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteDelay { value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeDelay { value });
            }
        }
        if min_secs > max_secs {
            return Err(ConfigError::InvertedDelayRange {
                min: min_secs,
                max: max_secs,
            });
        }

        Ok(Self {
            min: Duration::from_secs_f64(min_secs),
            max: Duration::from_secs_f64(max_secs),
        })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

/// Immutable per-run scraping configuration.
///
/// Built once by the orchestration entry point and handed to the scraper,
/// which reads it but never mutates it. Quota values arrive as `i64` because
/// they may be externally supplied; validation rejects negatives before the
/// config exists.
#[derive(Debug, Clone)]
pub struct ScrapeRunConfig {
    max_posts_per_platform: HashMap<Platform, u64>,
    rate_limit_respect: bool,
    delay_range: DelayRange,
}

impl ScrapeRunConfig {
    pub fn new<I>(
        max_posts_per_platform: I,
        rate_limit_respect: bool,
        delay_range: (f64, f64),
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Platform, i64)>,
    {
        let mut quotas = HashMap::new();
        for (platform, quota) in max_posts_per_platform {
            if quota < 0 {
                return Err(ConfigError::NegativeQuota {
                    platform: platform.to_string(),
                    quota,
                });
            }
            quotas.insert(platform, quota as u64);
        }

        let delay_range = DelayRange::new(delay_range.0, delay_range.1)?;

        Ok(Self {
            max_posts_per_platform: quotas,
            rate_limit_respect,
            delay_range,
        })
    }

    /// The deployment defaults: Reddit-focused fresh content collection.
    pub fn fresh_collection() -> Result<Self, ConfigError> {
        Self::new(
            [(Platform::Reddit, 10_000), (Platform::Twitter, 0)],
            true,
            (2.0, 5.0),
        )
    }

    /// Quota for a platform; unlisted platforms have a quota of zero.
    pub fn quota_for(&self, platform: Platform) -> u64 {
        self.max_posts_per_platform
            .get(&platform)
            .copied()
            .unwrap_or(0)
    }

    pub fn max_posts_per_platform(&self) -> &HashMap<Platform, u64> {
        &self.max_posts_per_platform
    }

    pub fn rate_limit_respect(&self) -> bool {
        self.rate_limit_respect
    }

    pub fn delay_range(&self) -> DelayRange {
        self.delay_range
    }
}

/// Explicit logging configuration, built once at process start.
///
/// `LOG_LEVEL` and `LOG_DIR` override the defaults. The size policy is
/// applied at startup: an existing log file over `max_file_size_mb` is
/// rotated to a timestamped backup and backups beyond `max_backups` are
/// pruned.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
    pub file_name: String,
    pub max_file_size_mb: u64,
    pub max_backups: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: PathBuf::from("logs"),
            file_name: "harvest.log".to_string(),
            max_file_size_mb: 10,
            max_backups: 5,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = dotenv::var("LOG_LEVEL") {
            config.level = level;
        }
        if let Ok(directory) = dotenv::var("LOG_DIR") {
            config.directory = PathBuf::from(directory);
        }
        config
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

/// API credentials for the supported platforms, read once from the
/// environment (a `.env` file is honored via the dotenv crate).
///
/// The scraping internals that consume these live outside this workspace;
/// here they only determine which platforms a deployment can enable.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub twitter_bearer_token: Option<String>,
}

const DEFAULT_USER_AGENT: &str = "socialharvest/0.1";

impl ApiCredentials {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            reddit_client_id: dotenv::var("REDDIT_CLIENT_ID").ok(),
            reddit_client_secret: dotenv::var("REDDIT_CLIENT_SECRET").ok(),
            reddit_user_agent: dotenv::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            twitter_bearer_token: dotenv::var("TWITTER_BEARER_TOKEN").ok(),
        }
    }

    pub fn has_platform(&self, platform: Platform) -> bool {
        match platform {
            Platform::Reddit => {
                self.reddit_client_id.is_some() && self.reddit_client_secret.is_some()
            }
            Platform::Twitter => self.twitter_bearer_token.is_some(),
        }
    }

    pub fn configured_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.has_platform(*p))
            .collect()
    }
}
