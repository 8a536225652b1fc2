use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::models::types::{AccountDto, AccountHandle, MatchRecord};
use crate::utils::storage::Cache;

const MATCH_TYPE: &str = "ranked";
const MATCH_WINDOW: u32 = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Riot account and match-v5 endpoints.
pub struct RiotClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RiotClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build http client"),
            base_url: format!("https://{}.api.riotgames.com", config.riot_region),
            api_key: config.riot_api_key.clone(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            http: Client::new(),
            base_url: "http://localhost:0".to_string(),
            api_key: String::new(),
        }
    }

    /// Resolves a handle to its PUUID, memoized forever in the cache since
    /// account identity never changes.
    pub async fn resolve_puuid(&self, cache: &mut Cache, handle: &AccountHandle) -> Result<String> {
        let key = handle.cache_key();
        if let Some(puuid) = cache.puuid_by_summoner.get(&key) {
            debug!(%handle, "puuid served from cache");
            return Ok(puuid.clone());
        }

        let url = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.base_url, handle.game_name, handle.tag_line
        );
        let account: AccountDto = self
            .http
            .get(&url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(%handle, puuid = %account.puuid, "resolved account");
        cache.puuid_by_summoner.insert(key, account.puuid.clone());
        Ok(account.puuid)
    }

    /// Fetches the most recent ranked match ids, most recent first. Always
    /// hits the network; the caller diffs the result against the cache.
    pub async fn fetch_recent_match_ids(&self, puuid: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?type={}&start=0&count={}",
            self.base_url, puuid, MATCH_TYPE, MATCH_WINDOW
        );
        let ids: Vec<String> = self
            .http
            .get(&url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(puuid, count = ids.len(), "fetched match window");
        Ok(ids)
    }

    /// Returns the outcome record for a match, fetching and memoizing it on
    /// first sight. Outcomes are immutable once played, so a cached record
    /// never goes back to the network. A failed fetch writes nothing.
    pub async fn fetch_record<'a>(
        &self,
        cache: &'a mut Cache,
        match_id: &str,
    ) -> Result<&'a MatchRecord> {
        if !cache.match_infos.contains_key(match_id) {
            let url = format!("{}/lol/match/v5/matches/{}", self.base_url, match_id);
            let record: MatchRecord = self
                .http
                .get(&url)
                .header("X-Riot-Token", &self.api_key)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            debug!(match_id, "fetched match record");
            cache.match_infos.insert(match_id.to_string(), record);
        }

        Ok(&cache.match_infos[match_id])
    }
}
