use std::time::Duration;

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{error, warn, Instrument};

use memorybox_core::service::sweep_reminders;

use crate::app_state::SharedState;

/// Runs a reminder sweep every `interval` until the returned task is aborted.
/// Reminders that fail to go out are picked up again by the next sweep.
pub fn spawn_reminder_sweep(state: SharedState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(
        async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match sweep_reminders(&state.capsules, state.notifier.as_ref()).await {
                    Ok(_) => {}
                    Err(err) if err.is_retryable() => {
                        warn!(%err, "reminder sweep skipped, store unavailable");
                    }
                    Err(err) => {
                        error!(?err, "reminder sweep failed");
                    }
                }
            }
        }
        .instrument(tracing::info_span!("reminder_sweep")),
    )
}
