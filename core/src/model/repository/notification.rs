use chrono::{DateTime, Utc};
use diesel::prelude::*;
use eyre::{Context, Result};
use tracing::instrument;

use crate::model::{
    util::{bool_to_int, datetime_to_db_repr},
    CapsuleId, Notification, NotificationId, Principal,
};

use super::db::DbConn;
use super::db_entity::DbNotification;
use super::schema;

#[instrument(skip(conn), level = "debug")]
pub fn insert_notification(
    conn: &mut DbConn,
    recipient: &Principal,
    capsule_id: CapsuleId,
    message: &str,
    created_at: DateTime<Utc>,
) -> Result<NotificationId> {
    use schema::Notification;
    let id: i64 = diesel::insert_into(Notification::table)
        .values((
            Notification::recipient.eq(recipient.as_str()),
            Notification::capsule_id.eq(capsule_id.0),
            Notification::message.eq(message),
            Notification::created_at.eq(datetime_to_db_repr(&created_at)),
            Notification::is_read.eq(bool_to_int(false)),
        ))
        .returning(Notification::notification_id)
        .get_result(conn)
        .wrap_err("could not insert into table Notification")?;
    Ok(NotificationId(id))
}

/// Newest first
#[instrument(skip(conn), level = "trace")]
pub fn get_notifications_for(
    conn: &mut DbConn,
    recipient: &Principal,
) -> Result<Vec<Notification>> {
    use schema::Notification;
    Notification::table
        .filter(Notification::recipient.eq(recipient.as_str()))
        .order((
            Notification::created_at.desc(),
            Notification::notification_id.desc(),
        ))
        .select(DbNotification::as_select())
        .load::<DbNotification>(conn)
        .wrap_err("could not query table Notification")?
        .into_iter()
        .map(|n| n.try_into())
        .collect()
}

/// Returns whether a notification belonging to `recipient` was found
#[instrument(skip(conn), level = "debug")]
pub fn mark_read(
    conn: &mut DbConn,
    notification_id: NotificationId,
    recipient: &Principal,
) -> Result<bool> {
    use schema::Notification;
    let updated = diesel::update(
        Notification::table
            .filter(Notification::notification_id.eq(notification_id.0))
            .filter(Notification::recipient.eq(recipient.as_str())),
    )
    .set(Notification::is_read.eq(bool_to_int(true)))
    .execute(conn)
    .wrap_err("could not update column Notification.is_read")?;
    Ok(updated > 0)
}
