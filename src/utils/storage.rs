use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::types::MatchRecord;

/// The durable cache: three independent namespaces, serialized as a single
/// human-inspectable JSON file. Field names match the on-disk keys of
/// earlier deployments so existing cache files keep working.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Cache {
    /// `gameName#tagLine` -> PUUID, insert-once.
    #[serde(rename = "puuidBySummoner", default)]
    pub puuid_by_summoner: HashMap<String, String>,

    /// PUUID -> last-fetched match-id window, overwritten wholesale on
    /// every cycle. Not an append log: ids that fall out of the window
    /// between runs are never seen as new.
    #[serde(rename = "matchesByPuuid", default)]
    pub matches_by_puuid: HashMap<String, Vec<String>>,

    /// Match id -> full outcome record, immutable once inserted.
    #[serde(rename = "matchInfos", default)]
    pub match_infos: HashMap<String, MatchRecord>,
}

impl Cache {
    /// Diffs a freshly fetched match-id window against the cached snapshot
    /// and replaces the snapshot unconditionally.
    ///
    /// Returns the ids from `fresh` absent from the old snapshot, in order.
    /// On the first call for a PUUID everything is new. Calling twice with
    /// the same window returns an empty list the second time.
    pub fn update_match_snapshot(&mut self, puuid: &str, fresh: Vec<String>) -> Vec<String> {
        let new_ids = match self.matches_by_puuid.get(puuid) {
            Some(cached) => fresh
                .iter()
                .filter(|id| !cached.contains(id))
                .cloned()
                .collect(),
            None => fresh.clone(),
        };
        self.matches_by_puuid.insert(puuid.to_string(), fresh);
        new_ids
    }
}

/// Owns the path to the cache file. The `Cache` itself is loaded once per
/// run, mutated in place by the fetchers, and saved back here.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the cache file. A missing file is a fresh install and yields
    /// an empty cache; an unreadable or unparseable file is an error.
    pub fn load(&self) -> Result<Cache> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cache file, starting empty");
                return Ok(Cache::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };
        serde_json::from_str(&raw).map_err(Error::CorruptCache)
    }

    /// Writes the whole cache back. Goes through a temp file in the same
    /// directory and renames over the target, so an interrupted write never
    /// leaves a half-written file where a valid cache used to be.
    pub fn save(&self, cache: &Cache) -> Result<()> {
        let raw = serde_json::to_string_pretty(cache).map_err(Error::CorruptCache)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{MatchInfo, Participant, TeamEntry};

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn load_missing_file_yields_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));
        let cache = store.load().unwrap();
        assert!(cache.puuid_by_summoner.is_empty());
        assert!(cache.matches_by_puuid.is_empty());
        assert!(cache.match_infos.is_empty());
    }

    #[test]
    fn load_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();
        let err = CacheStore::new(path).load().unwrap_err();
        assert!(matches!(err, Error::CorruptCache(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));

        let mut cache = Cache::default();
        cache
            .puuid_by_summoner
            .insert("Faker#KR1".to_string(), "puuid-1".to_string());
        cache.update_match_snapshot("puuid-1", ids(&["m1", "m2"]));
        cache.match_infos.insert(
            "m1".to_string(),
            MatchRecord {
                info: MatchInfo {
                    participants: vec![Participant {
                        puuid: "puuid-1".to_string(),
                        team_id: 100,
                    }],
                    teams: vec![TeamEntry {
                        team_id: 100,
                        win: true,
                    }],
                },
            },
        );
        store.save(&cache).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.puuid_by_summoner["Faker#KR1"], "puuid-1");
        assert_eq!(loaded.matches_by_puuid["puuid-1"], ids(&["m1", "m2"]));
        assert!(loaded.match_infos["m1"].info.teams[0].win);
    }

    #[test]
    fn save_uses_on_disk_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));
        store.save(&Cache::default()).unwrap();

        let raw = fs::read_to_string(dir.path().join("cache.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("puuidBySummoner").is_some());
        assert!(value.get("matchesByPuuid").is_some());
        assert!(value.get("matchInfos").is_some());
    }

    #[test]
    fn save_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));

        let mut cache = Cache::default();
        cache.update_match_snapshot("p", ids(&["m1"]));
        store.save(&cache).unwrap();

        cache.update_match_snapshot("p", ids(&["m2"]));
        store.save(&cache).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.matches_by_puuid["p"], ids(&["m2"]));
    }

    #[test]
    fn first_snapshot_is_all_new() {
        let mut cache = Cache::default();
        let new_ids = cache.update_match_snapshot("p", ids(&["m1", "m2", "m3"]));
        assert_eq!(new_ids, ids(&["m1", "m2", "m3"]));
        assert_eq!(cache.matches_by_puuid["p"], ids(&["m1", "m2", "m3"]));
    }

    #[test]
    fn repeated_snapshot_yields_no_new_ids() {
        let mut cache = Cache::default();
        cache.update_match_snapshot("p", ids(&["m1", "m2", "m3"]));
        let new_ids = cache.update_match_snapshot("p", ids(&["m1", "m2", "m3"]));
        assert!(new_ids.is_empty());
    }

    #[test]
    fn snapshot_diff_keeps_order_and_replaces_wholesale() {
        let mut cache = Cache::default();
        cache.update_match_snapshot("p", ids(&["m3", "m4"]));

        // Two newer matches arrived; m4 fell out of the window.
        let new_ids = cache.update_match_snapshot("p", ids(&["m1", "m2", "m3"]));
        assert_eq!(new_ids, ids(&["m1", "m2"]));
        assert_eq!(cache.matches_by_puuid["p"], ids(&["m1", "m2", "m3"]));
    }

    #[test]
    fn snapshot_diff_preserves_duplicates_in_fresh() {
        let mut cache = Cache::default();
        cache.update_match_snapshot("p", ids(&["m1"]));
        let new_ids = cache.update_match_snapshot("p", ids(&["m2", "m2", "m1"]));
        assert_eq!(new_ids, ids(&["m2", "m2"]));
    }
}
