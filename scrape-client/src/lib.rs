pub mod extract;
pub mod pacing;
pub mod roster;
pub mod scraper;
pub mod source;

pub use extract::{extract_product_signals, ProductSignals};
pub use pacing::RequestPacing;
pub use roster::{SubredditRoster, DEFAULT_ROSTER_PATH};
pub use scraper::{FreshScraper, SocialScraper};
pub use source::PostSource;
