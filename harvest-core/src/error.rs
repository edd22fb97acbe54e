use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Collection stopped by user")]
    Cancelled,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Negative quota {quota} for platform {platform}")]
    NegativeQuota { platform: String, quota: i64 },

    #[error("Negative delay bound: {value}")]
    NegativeDelay { value: f64 },

    #[error("Delay bound is not a finite number: {value}")]
    NonFiniteDelay { value: f64 },

    #[error("Inverted delay range: min {min} exceeds max {max}")]
    InvertedDelayRange { min: f64, max: f64 },

    #[error("Invalid log level: {level}")]
    InvalidLogLevel { level: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Subreddit roster is empty")]
    EmptyRoster,

    #[error("Roster file unreadable: {path}: {details}")]
    RosterUnreadable { path: String, details: String },

    #[error("Malformed roster file {path}: {details}")]
    MalformedRoster { path: String, details: String },

    #[error("No source registered for platform {platform}")]
    SourceUnavailable { platform: String },

    #[error("Fetch failed for {topic}: {details}")]
    FetchFailed { topic: String, details: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
