//! Inter-request pacing.
//!
//! When the run config asks for rate-limit respect, consecutive fetches are
//! separated by a uniformly random delay drawn from the configured range.
//! This is the delay policy only; platform rate-limiter machinery belongs to
//! the sources themselves.

use harvest_core::{DelayRange, ScrapeRunConfig};
use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct RequestPacing {
    enabled: bool,
    range: DelayRange,
}

impl RequestPacing {
    pub fn from_config(config: &ScrapeRunConfig) -> Self {
        Self {
            enabled: config.rate_limit_respect(),
            range: config.delay_range(),
        }
    }

    /// Draw the next delay, or `None` when pacing is disabled.
    pub fn sample(&self) -> Option<Duration> {
        if !self.enabled {
            return None;
        }

        let min = self.range.min().as_secs_f64();
        let max = self.range.max().as_secs_f64();
        let secs = min + fastrand::f64() * (max - min);
        Some(Duration::from_secs_f64(secs))
    }

    pub async fn pause(&self) {
        if let Some(delay) = self.sample() {
            trace!("Pacing: sleeping {:?} before next request", delay);
            sleep(delay).await;
        }
    }
}
