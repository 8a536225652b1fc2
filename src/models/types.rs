use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A watched account as supplied in `WATCHED_USERS`, e.g. `Faker-KR1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHandle {
    pub game_name: String,
    pub tag_line: String,
}

impl AccountHandle {
    /// Key under which the resolved PUUID is memoized in the cache.
    pub fn cache_key(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

impl fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

impl FromStr for AccountHandle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (game_name, tag_line) = s.split_once('-').ok_or(ConfigError::InvalidValue {
            field: "WATCHED_USERS",
            reason: "expected gameName-tagLine pairs",
        })?;
        if game_name.is_empty() || tag_line.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "WATCHED_USERS",
                reason: "gameName and tagLine must be non-empty",
            });
        }
        Ok(Self {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

/// Body of the account-v1 by-riot-id endpoint. Only `puuid` matters;
/// a body without it fails deserialization and surfaces as a remote error.
#[derive(Debug, Deserialize)]
pub struct AccountDto {
    pub puuid: String,
}

/// Full outcome payload for a played match, cached and immutable once
/// fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    pub participants: Vec<Participant>,
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub puuid: String,
    #[serde(rename = "teamId")]
    pub team_id: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(rename = "teamId")]
    pub team_id: u16,
    pub win: bool,
}
