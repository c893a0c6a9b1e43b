use super::service::{AwesomeService, CycleOutcome};
use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Run one cycle and log its outcome. Never fails.
pub async fn run_once(service: &AwesomeService) -> Option<CycleOutcome> {
    match service.run_cycle().await {
        Ok(outcome) => {
            tracing::info!(outcome = ?outcome, "Awesome list cycle finished");
            Some(outcome)
        }
        Err(e) => {
            tracing::error!(error = %e, "Awesome list cycle failed");
            None
        }
    }
}

/// Refresh the showcase every period until `cancel` fires.
///
/// The first cycle runs one period after start, a failed cycle is logged
/// and retried on the next tick.
pub async fn run(service: Arc<AwesomeService>, cancel: CancellationToken) {
    let period = service.period();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(period_secs = period.as_secs(), "Awesome list scheduler started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Awesome list scheduler stopped");
                break;
            }
            _ = ticker.tick() => {
                run_once(&service).await;
            }
        }
    }
}
