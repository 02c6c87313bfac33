use chrono::{DateTime, Utc};

use super::{CapsuleId, NotificationId, Principal};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: Principal,
    pub capsule_id: CapsuleId,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}
