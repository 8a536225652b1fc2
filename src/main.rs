mod config;
mod error;
mod models;
mod services;
mod utils;

use std::process;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;
use crate::models::types::AccountHandle;
use crate::services::api::RiotClient;
use crate::services::notify::Notifier;
use crate::services::streak;
use crate::utils::storage::{Cache, CacheStore};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        error!("run aborted: {e}");
        process::exit(1);
    }
}

/// One full cycle: every watched account, strictly sequentially. The cache
/// is loaded once, mutated in place, and flushed after each account so a
/// mid-run failure keeps everything processed so far.
async fn run(config: &Config) -> Result<()> {
    let store = CacheStore::new(config.cache_file.clone());
    let mut cache = store.load()?;

    let api = RiotClient::new(config);
    let notifier = Notifier::new(config);

    for handle in &config.watched {
        info!("processing {handle}");
        if let Err(e) = process_account(handle, &api, &notifier, &mut cache).await {
            if e.is_fatal() {
                return Err(e);
            }
            error!("skipping {handle}: {e}");
        }
        store.save(&cache)?;
    }

    Ok(())
}

/// Pipeline for a single account: resolve identity, fetch the fresh match
/// window, diff against the cached snapshot, and classify only when the
/// window contains something unseen.
async fn process_account(
    handle: &AccountHandle,
    api: &RiotClient,
    notifier: &Notifier,
    cache: &mut Cache,
) -> Result<()> {
    let puuid = api.resolve_puuid(cache, handle).await?;
    let fresh_ids = api.fetch_recent_match_ids(&puuid).await?;
    let new_ids = cache.update_match_snapshot(&puuid, fresh_ids.clone());

    if new_ids.is_empty() {
        debug!("no new matches for {handle}");
        return Ok(());
    }
    info!("{} new match(es) for {handle}", new_ids.len());

    // Classification always runs over the full fresh window; the new-id
    // check only gates whether this account is worth evaluating at all.
    if let Some(message) = streak::classify(api, cache, &fresh_ids, &puuid, handle).await? {
        if let Err(e) = notifier.send(&message).await {
            warn!("notification for {handle} failed: {e}");
        }
    }

    Ok(())
}
