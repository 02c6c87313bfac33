use diesel::{Queryable, Selectable};

use crate::model::{
    util::datetime_from_db_repr, CapsuleId, Notification, NotificationId, Principal,
};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = super::super::schema::Notification)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbNotification {
    pub notification_id: i64,
    pub recipient: String,
    pub capsule_id: i64,
    pub message: String,
    pub created_at: i64,
    pub is_read: i32,
}

impl TryFrom<DbNotification> for Notification {
    type Error = eyre::Report;

    fn try_from(value: DbNotification) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId(value.notification_id),
            recipient: Principal(value.recipient),
            capsule_id: CapsuleId(value.capsule_id),
            message: value.message,
            created_at: datetime_from_db_repr(value.created_at)?,
            read: value.is_read != 0,
        })
    }
}
