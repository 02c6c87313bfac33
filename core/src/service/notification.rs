use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{
    model::{Notification, NotificationId, Principal},
    store::NotificationStore,
};

use super::{capsule::DueReminder, Clock, CapsuleError, CapsuleResult};

/// Delivers capsule reminders. Implementations only deliver; recording that a
/// reminder went out is done by whoever calls them.
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    async fn notify(&self, reminder: &DueReminder) -> CapsuleResult<()>;
}

/// Notifier that leaves reminders in the owner's in-app notification list.
#[derive(Clone)]
pub struct InAppNotifier {
    store: Arc<dyn NotificationStore>,
    clock: Arc<dyn Clock>,
}

impl InAppNotifier {
    pub fn new(store: Arc<dyn NotificationStore>, clock: Arc<dyn Clock>) -> Self {
        InAppNotifier { store, clock }
    }
}

pub fn reminder_message(reminder: &DueReminder) -> String {
    format!(
        "Your time capsule opens on {}",
        reminder.unlock_at.format("%Y-%m-%d %H:%M UTC")
    )
}

#[async_trait]
impl ReminderNotifier for InAppNotifier {
    #[instrument(skip(self))]
    async fn notify(&self, reminder: &DueReminder) -> CapsuleResult<()> {
        self.store
            .insert_notification(
                &reminder.recipient,
                reminder.capsule_id,
                &reminder_message(reminder),
                self.clock.now(),
            )
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        NotificationService { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, recipient: &Principal) -> CapsuleResult<Vec<Notification>> {
        Ok(self.store.notifications_for(recipient).await?)
    }

    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        notification_id: NotificationId,
        recipient: &Principal,
    ) -> CapsuleResult<()> {
        if self
            .store
            .mark_notification_read(notification_id, recipient)
            .await?
        {
            Ok(())
        } else {
            Err(CapsuleError::NotFound("notification"))
        }
    }
}
