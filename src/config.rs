use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::types::AccountHandle;

const DEFAULT_REGION: &str = "europe";
const DEFAULT_CACHE_FILE: &str = "cache.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Everything the run needs from the environment, resolved once at startup
/// and passed into the component constructors.
#[derive(Debug)]
pub struct Config {
    pub riot_api_key: String,
    pub webhook_url: String,
    pub riot_region: String,
    pub cache_file: PathBuf,
    pub watched: Vec<AccountHandle>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let riot_api_key = require("RIOT_API_KEY")?;
        let webhook_url = require("WEBHOOK_URL")?;
        let watched = parse_watched(&require("WATCHED_USERS")?)?;

        let riot_region = env::var("RIOT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let cache_file = env::var("CACHE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_FILE));

        Ok(Self {
            riot_api_key,
            webhook_url,
            riot_region,
            cache_file,
            watched,
        })
    }
}

fn require(field: &'static str) -> Result<String, ConfigError> {
    env::var(field).map_err(|_| ConfigError::MissingField { field })
}

/// Parses the comma-separated `gameName-tagLine` list from `WATCHED_USERS`.
fn parse_watched(raw: &str) -> Result<Vec<AccountHandle>, ConfigError> {
    raw.split(',')
        .map(|pair| pair.trim().parse())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_watched_splits_pairs() {
        let watched = parse_watched("Faker-KR1,Chovy-KR2").unwrap();
        assert_eq!(watched.len(), 2);
        assert_eq!(watched[0].game_name, "Faker");
        assert_eq!(watched[1].tag_line, "KR2");
    }

    #[test]
    fn parse_watched_trims_whitespace() {
        let watched = parse_watched("Faker-KR1, Chovy-KR2").unwrap();
        assert_eq!(watched[1].game_name, "Chovy");
    }

    #[test]
    fn parse_watched_rejects_bad_pair() {
        assert!(parse_watched("Faker-KR1,broken").is_err());
        assert!(parse_watched("").is_err());
    }
}
