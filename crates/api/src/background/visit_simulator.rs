//! Periodic cat visit simulation.
//!
//! Runs a visit pass over every yard on a fixed interval using
//! `tokio::time::interval`. The first tick fires immediately so food placed
//! before a restart is checked right away.

use std::sync::Arc;

use baba_db::DbPool;
use baba_events::EventBus;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::sync::CancellationToken;

use crate::config::YardConfig;
use crate::engine::visits;

/// Run the visit simulator loop until `cancel` is triggered.
pub async fn run(
    pool: DbPool,
    events: Arc<EventBus>,
    config: YardConfig,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = config.visit_check_interval_secs,
        "Visit simulator started"
    );

    let mut rng = StdRng::from_os_rng();
    let mut interval = tokio::time::interval(config.check_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Visit simulator stopping");
                break;
            }
            _ = interval.tick() => {
                match visits::run_pass(&pool, &events, None, &mut rng).await {
                    Ok(summary) => {
                        tracing::debug!(
                            checked = summary.checked,
                            visits = summary.visits.len(),
                            "Visit simulator tick"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Visit simulator: pass failed");
                    }
                }
            }
        }
    }
}
