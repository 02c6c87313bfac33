//! Reminder due-computation. Reminders are keyed by capsule id, and nothing here
//! mutates state: whoever delivers a reminder records it afterwards.

use chrono::{DateTime, Utc};

use crate::model::{Capsule, CapsuleId};

/// When the next reminder for `capsule` is due, counted from the last reminder
/// (or creation) and never later than the unlock time.
/// `None` if reminders are disabled.
pub fn next_reminder_at(capsule: &Capsule) -> Option<DateTime<Utc>> {
    let interval = capsule.reminder_policy.interval()?;
    let last = capsule
        .last_reminder_sent_at
        .unwrap_or(capsule.created_at);
    Some(std::cmp::min(last + interval, capsule.unlock_at))
}

/// Ids of capsules whose next reminder is due at `now`. Capsules that are
/// already unlocked never get reminders.
pub fn due_reminders<'a>(
    capsules: impl IntoIterator<Item = &'a Capsule>,
    now: DateTime<Utc>,
) -> Vec<CapsuleId> {
    capsules
        .into_iter()
        .filter(|capsule| capsule.unlock_at > now)
        .filter(|capsule| next_reminder_at(capsule).is_some_and(|next| next <= now))
        .map(|capsule| capsule.id)
        .collect()
}
