use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use memorybox_core::model;

use super::{CapsuleId, NotificationId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub capsule_id: CapsuleId,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl From<&model::Notification> for Notification {
    fn from(value: &model::Notification) -> Self {
        Notification {
            id: value.id.into(),
            capsule_id: value.capsule_id.into(),
            message: value.message.clone(),
            created_at: value.created_at,
            read: value.read,
        }
    }
}
