use harvest_core::logging::init_logging;
use harvest_core::{
    ApiCredentials, HarvestError, LoggingConfig, Platform, RunOutcome, ScrapeRunConfig,
};
use scrape_client::{FreshScraper, SocialScraper};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // The guard flushes buffered file output when dropped at process exit
    let _log_guard = match init_logging(&LoggingConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting Social Harvest fresh collection run");

    let scraper = match build_scraper() {
        Ok(scraper) => scraper,
        Err(e) => {
            eprintln!("Failed to start collection: {e}");
            return ExitCode::FAILURE;
        }
    };

    report_credentials(&ApiCredentials::from_env());
    print_run_summary(&scraper);

    let outcome = run(&scraper).await;
    match &outcome {
        RunOutcome::Completed(report) => {
            println!();
            println!("Fresh data collection completed");
            for (platform, count) in &report.posts_collected {
                println!("  {}: {} posts", platform, count);
            }
            println!("Total: {} posts", report.total());
        }
        RunOutcome::Cancelled => {
            println!();
            println!("Collection stopped by user");
        }
        RunOutcome::Failed(e) => {
            println!();
            eprintln!("Error during collection: {e}");
        }
    }

    ExitCode::from(outcome.exit_code())
}

fn build_scraper() -> Result<FreshScraper, HarvestError> {
    let config = Arc::new(ScrapeRunConfig::fresh_collection()?);
    let scraper = FreshScraper::from_config(config)?;
    Ok(scraper)
}

fn report_credentials(credentials: &ApiCredentials) {
    let configured = credentials.configured_platforms();
    if configured.is_empty() {
        println!("No platform credentials configured; every platform will be skipped");
    } else {
        let names: Vec<&str> = configured.iter().map(|p| p.as_str()).collect();
        println!("Credentials configured for: {}", names.join(", "));
    }
}

fn print_run_summary(scraper: &FreshScraper) {
    let config = scraper.config();
    println!("Fresh social media data collection");
    println!("{}", "=".repeat(50));
    println!("Target: {} posts", config.quota_for(Platform::Reddit));
    println!("Subreddits: {}", scraper.subreddit_count());
    println!(
        "Posts per subreddit: ~{}",
        scraper.posts_per_subreddit(Platform::Reddit)
    );
}

/// Single scrape attempt raced against the interrupt signal. Ctrl-C is a
/// clean stop, not a failure.
async fn run(scraper: &dyn SocialScraper) -> RunOutcome {
    tokio::select! {
        result = scraper.scrape_all_platforms() => RunOutcome::from_result(result),
        _ = tokio::signal::ctrl_c() => RunOutcome::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use harvest_core::ScrapeReport;
    use std::sync::Mutex;

    /// Stub collaborator that records the configuration it was handed and
    /// resolves the scrape with a preset result.
    struct StubScraper {
        config: Arc<ScrapeRunConfig>,
        observed: Mutex<Option<ScrapeRunConfig>>,
        result: Mutex<Option<Result<ScrapeReport, HarvestError>>>,
    }

    impl StubScraper {
        fn new(config: Arc<ScrapeRunConfig>, result: Result<ScrapeReport, HarvestError>) -> Self {
            Self {
                config,
                observed: Mutex::new(None),
                result: Mutex::new(Some(result)),
            }
        }
    }

    #[async_trait]
    impl SocialScraper for StubScraper {
        fn subreddit_count(&self) -> usize {
            37
        }

        async fn scrape_all_platforms(&self) -> Result<ScrapeReport, HarvestError> {
            *self.observed.lock().unwrap() = Some(self.config.as_ref().clone());
            self.result.lock().unwrap().take().expect("single attempt")
        }
    }

    fn default_config() -> Arc<ScrapeRunConfig> {
        Arc::new(ScrapeRunConfig::fresh_collection().unwrap())
    }

    #[tokio::test]
    async fn stub_observes_the_exact_configuration() {
        let stub = StubScraper::new(default_config(), Ok(ScrapeReport::new()));

        let outcome = run(&stub).await;
        assert!(matches!(outcome, RunOutcome::Completed(_)));

        let observed = stub.observed.lock().unwrap();
        let observed = observed.as_ref().expect("scrape was invoked");
        assert_eq!(observed.quota_for(Platform::Reddit), 10_000);
        assert_eq!(observed.quota_for(Platform::Twitter), 0);
        assert!(observed.rate_limit_respect());
        assert_eq!(observed.delay_range().min().as_secs(), 2);
        assert_eq!(observed.delay_range().max().as_secs(), 5);
    }

    #[tokio::test]
    async fn interruption_is_a_clean_stop() {
        let stub = StubScraper::new(default_config(), Err(HarvestError::Cancelled));

        let outcome = run(&stub).await;

        assert!(matches!(outcome, RunOutcome::Cancelled));
        assert_eq!(outcome.exit_code(), 0);
    }

    #[tokio::test]
    async fn collaborator_failure_exits_nonzero_with_message() {
        let stub = StubScraper::new(
            default_config(),
            Err(HarvestError::Internal {
                message: "network unreachable".to_string(),
            }),
        );

        let outcome = run(&stub).await;

        match &outcome {
            RunOutcome::Failed(e) => assert!(e.to_string().contains("network unreachable")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_ne!(outcome.exit_code(), 0);
    }

    #[tokio::test]
    async fn completion_reports_collected_counts() {
        let mut report = ScrapeReport::new();
        report.record(Platform::Reddit, 1234);
        report.finish();
        let stub = StubScraper::new(default_config(), Ok(report));

        let outcome = run(&stub).await;

        assert_eq!(outcome.exit_code(), 0);
        match outcome {
            RunOutcome::Completed(report) => {
                assert_eq!(report.posts_collected[&Platform::Reddit], 1234);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }
}
