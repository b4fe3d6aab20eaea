//! Derivation Cycle Task
//!
//! Runs the batch derivations and refreshes the cached views, either on
//! demand or periodically in the background.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::catalog::CatalogRepository;
use crate::clock::Clock;
use crate::derive::{derive_freshness, merge_promotions, BatchReport};
use crate::error::Result;
use crate::views::ViewStore;

/// Outcome of one derivation cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub as_of: NaiveDate,
    pub freshness: BatchReport,
    pub promotions: BatchReport,
    /// Views whose repopulation failed and still hold their previous contents
    pub failed_views: Vec<String>,
}

/// Derives freshness, merges promotions, then repopulates every view, all
/// for the same `as_of` day.
///
/// Errors reading the history logs or the product table abort the cycle
/// before any view is touched; per-product failures are in the reports.
pub async fn run_derivation_cycle(
    repo: &dyn CatalogRepository,
    views: &ViewStore,
    as_of: NaiveDate,
) -> Result<CycleReport> {
    let freshness = derive_freshness(repo, as_of).await?;
    let promotions = merge_promotions(repo, as_of).await?;

    let failed_views: Vec<String> = views
        .refresh_all(as_of)
        .await
        .into_iter()
        .map(|(view, _)| view.to_string())
        .collect();

    info!(
        %as_of,
        freshness_skipped = freshness.skipped.len(),
        promotions_skipped = promotions.skipped.len(),
        failed_views = failed_views.len(),
        "Derivation cycle complete"
    );

    Ok(CycleReport {
        as_of,
        freshness,
        promotions,
        failed_views,
    })
}

/// Spawns a background task that runs a derivation cycle every interval.
///
/// # Arguments
/// * `repo` - Catalog to derive over
/// * `views` - View store refreshed at the end of each cycle
/// * `clock` - Supplies the day each cycle runs for
/// * `interval_secs` - Seconds between cycles
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_derivation_task(
    repo: Arc<dyn CatalogRepository>,
    views: Arc<ViewStore>,
    clock: Arc<dyn Clock>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting derivation task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let as_of = clock.today();
            if let Err(err) = run_derivation_cycle(repo.as_ref(), &views, as_of).await {
                warn!(%as_of, error = %err, "Derivation cycle aborted");
            }
        }
    })
}
