//! Loading the dashboard from the upstream
//!
//! A failing upstream is never fatal: the demo data is loaded instead, once, without retrying.

use chrono::Utc;

use crate::config::Config;
use crate::demo::demo_aliases;
use crate::ingest::aliases_from_items;
use crate::overview::Overview;
use crate::state::Action;
use crate::state::Source;
use crate::storage::Storage;
use crate::upstream::Upstream;

/// ID of the upstream item standing in for the statistics endpoint
const OVERVIEW_ITEM_ID: i64 = 1;

/// Load the aliases, falls back to the demo aliases
pub async fn refresh_aliases(storage: &Storage, upstream: &Upstream, config: &Config) -> Source {
    let (aliases, source) = match upstream.fetch_items(config.fetch_limit).await {
        Ok(items) => {
            let today = Utc::now().date_naive();
            let aliases = {
                let mut rng = rand::thread_rng();
                aliases_from_items(&items, &config.alias_domain, today, &mut rng)
            };

            (aliases, Source::Upstream)
        }
        Err(err) => {
            tracing::warn!("Failed to load aliases, using demo data: {err}");

            (demo_aliases(), Source::Demo)
        }
    };

    tracing::info!("Loaded {} aliases from {source:?}", aliases.len());

    storage
        .dispatch(Action::AliasesLoaded(aliases, source))
        .await;

    source
}

/// Load the headline figures, falls back to the demo figures
pub async fn refresh_overview(storage: &Storage, upstream: &Upstream) -> Source {
    let (overview, source) = match upstream.fetch_item(OVERVIEW_ITEM_ID).await {
        Ok(_) => {
            let overview = {
                let mut rng = rand::thread_rng();
                Overview::random(&mut rng)
            };

            (overview, Source::Upstream)
        }
        Err(err) => {
            tracing::warn!("Failed to load overview, using demo data: {err}");

            (Overview::demo(), Source::Demo)
        }
    };

    storage
        .dispatch(Action::OverviewLoaded(overview, source))
        .await;

    source
}

/// Load everything on the dashboard
pub async fn refresh_all(storage: &Storage, upstream: &Upstream, config: &Config) {
    tokio::join!(
        refresh_aliases(storage, upstream, config),
        refresh_overview(storage, upstream),
    );
}
