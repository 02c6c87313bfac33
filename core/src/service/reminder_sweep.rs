use tracing::{error, info, instrument};

use super::{CapsuleService, ReminderNotifier, CapsuleResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// One pass over due reminders: deliver each and record it as sent.
/// A reminder that fails to deliver or to be recorded is due again on the next pass.
/// One failing reminder never stops the others.
#[instrument(skip_all)]
pub async fn sweep_reminders(
    capsules: &CapsuleService,
    notifier: &dyn ReminderNotifier,
) -> CapsuleResult<SweepReport> {
    let due = capsules.due_reminders().await?;
    let mut report = SweepReport {
        due: due.len(),
        ..Default::default()
    };
    for reminder in due {
        if let Err(err) = notifier.notify(&reminder).await {
            error!(capsule_id = %reminder.capsule_id, ?err, "error delivering reminder");
            report.failed += 1;
            continue;
        }
        // time of delivery, not of the sweep start
        if let Err(err) = capsules
            .record_reminder_sent(reminder.capsule_id, capsules.now())
            .await
        {
            // delivered but unrecorded, so it goes out again next pass
            error!(capsule_id = %reminder.capsule_id, ?err, "error recording sent reminder");
            report.failed += 1;
            continue;
        }
        report.delivered += 1;
    }
    if report.due > 0 {
        info!(?report, "reminder sweep done");
    }
    Ok(report)
}
