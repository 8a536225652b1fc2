use crate::error::{Error, Result};
use crate::models::types::{AccountHandle, MatchRecord};
use crate::services::api::RiotClient;
use crate::utils::storage::Cache;

/// Whether the given account's team won this match.
///
/// An account absent from the participants list is an error, never a loss.
pub fn outcome_for_account(record: &MatchRecord, puuid: &str, match_id: &str) -> Result<bool> {
    let participant = record
        .info
        .participants
        .iter()
        .find(|p| p.puuid == puuid)
        .ok_or_else(|| Error::ParticipantNotFound {
            puuid: puuid.to_string(),
            match_id: match_id.to_string(),
        })?;

    let team = record
        .info
        .teams
        .iter()
        .find(|t| t.team_id == participant.team_id)
        .ok_or_else(|| Error::TeamNotFound {
            team_id: participant.team_id,
            match_id: match_id.to_string(),
        })?;

    Ok(team.win)
}

/// Length of the current run of matches with the desired outcome, walking
/// `match_ids` (most recent first) from `offset`. Stops at the first match
/// with the opposite outcome. Offset 1 measures the run that existed before
/// the most recent match.
///
/// Outcome lookups go through the memoizing fetcher, so records already in
/// the cache cost no network.
pub async fn run_length(
    api: &RiotClient,
    cache: &mut Cache,
    match_ids: &[String],
    puuid: &str,
    desired_win: bool,
    offset: usize,
) -> Result<u32> {
    let mut streak = 0;

    for match_id in match_ids.iter().skip(offset) {
        let record = api.fetch_record(cache, match_id).await?;
        if outcome_for_account(record, puuid, match_id)? != desired_win {
            break;
        }
        streak += 1;
    }

    Ok(streak)
}

/// Decides which of the three alert conditions holds, in fixed priority
/// order, and renders the message. Returns `None` when no streak is on.
pub async fn classify(
    api: &RiotClient,
    cache: &mut Cache,
    match_ids: &[String],
    puuid: &str,
    handle: &AccountHandle,
) -> Result<Option<String>> {
    let prior_wins = run_length(api, cache, match_ids, puuid, true, 1).await?;
    let current_wins = run_length(api, cache, match_ids, puuid, true, 0).await?;

    if prior_wins > current_wins && prior_wins > 2 {
        return Ok(Some(format!(
            "{handle} just ended a {prior_wins}x win streak by losing"
        )));
    }

    if current_wins > 0 {
        return Ok(Some(format!("{handle} has a {current_wins}x win streak")));
    }

    let losses = run_length(api, cache, match_ids, puuid, false, 0).await?;
    if losses > 0 {
        return Ok(Some(format!("{handle} has a {losses}x losing streak")));
    }

    Ok(None)
}
