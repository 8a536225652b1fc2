use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes for a watched account's cycle.
///
/// `Io` and `CorruptCache` are fatal to the whole run; the remote and
/// not-found variants abandon only the account being processed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cache file unreadable or unwritable: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache file exists but could not be parsed: {0}")]
    CorruptCache(#[source] serde_json::Error),

    #[error("remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("account {puuid} is not a participant in match {match_id}")]
    ParticipantNotFound { puuid: String, match_id: String },

    #[error("team {team_id} missing from match {match_id}")]
    TeamNotFound { team_id: u16, match_id: String },
}

impl Error {
    /// True for errors that must stop the remaining accounts as well.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Io(_) | Error::CorruptCache(_))
    }
}
