//! Subreddit roster loading.
//!
//! The roster lives in a JSON file at a conventional path; a missing file
//! falls back to a built-in list so a fresh checkout can still run.

use harvest_core::ScrapeError;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_ROSTER_PATH: &str = "config/subreddits.json";

const FALLBACK_SUBREDDITS: &[&str] = &[
    "AskReddit",
    "gaming",
    "technology",
    "BuyItForLife",
    "ProductPorn",
    "deals",
    "consumerism",
    "gadgets",
    "fashion",
    "malefashionadvice",
    "homeimprovement",
    "DIY",
    "cooking",
    "skincareaddiction",
    "fitness",
];

#[derive(Debug, Deserialize)]
struct RosterFile {
    subreddits: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    name: String,
}

#[derive(Debug, Clone)]
pub struct SubredditRoster {
    names: Vec<String>,
}

impl SubredditRoster {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Roster file {} not found, using built-in subreddit list",
                    path.display()
                );
                return Ok(Self::fallback());
            }
            Err(e) => {
                return Err(ScrapeError::RosterUnreadable {
                    path: path.display().to_string(),
                    details: e.to_string(),
                })
            }
        };

        let parsed: RosterFile =
            serde_json::from_str(&raw).map_err(|e| ScrapeError::MalformedRoster {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;

        let names: Vec<String> = parsed.subreddits.into_iter().map(|s| s.name).collect();
        info!("Loaded {} subreddits from {}", names.len(), path.display());
        Ok(Self { names })
    }

    pub fn fallback() -> Self {
        Self {
            names: FALLBACK_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_names_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"subreddits": [{{"name": "gaming"}}, {{"name": "deals"}}]}}"#
        )
        .unwrap();

        let roster = SubredditRoster::load(file.path()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.iter().collect::<Vec<_>>(), vec!["gaming", "deals"]);
    }

    #[test]
    fn extra_fields_in_entries_are_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"subreddits": [{{"name": "gaming", "category": "entertainment"}}]}}"#
        )
        .unwrap();

        let roster = SubredditRoster::load(file.path()).unwrap();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn missing_file_falls_back_to_builtin_list() {
        let dir = tempfile::tempdir().unwrap();
        let roster = SubredditRoster::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(roster.len(), FALLBACK_SUBREDDITS.len());
        assert!(roster.iter().any(|s| s == "BuyItForLife"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let result = SubredditRoster::load(file.path());
        assert!(matches!(result, Err(ScrapeError::MalformedRoster { .. })));
    }

    #[test]
    fn empty_roster_file_yields_empty_roster() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"subreddits": []}}"#).unwrap();

        let roster = SubredditRoster::load(file.path()).unwrap();
        assert!(roster.is_empty());
    }
}
