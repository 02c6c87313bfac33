use diesel::{Queryable, Selectable};

use crate::model::{
    util::{datetime_from_db_repr, from_db_reminder_policy, from_db_theme},
    AlbumId, Capsule, CapsuleId, PasswordHash, Principal,
};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = super::super::schema::Capsule)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbCapsule {
    pub capsule_id: i64,
    pub album_id: i64,
    pub owner: String,
    pub unlock_at: i64,
    pub theme: String,
    pub password_hash: Option<String>,
    pub reminder_policy: String,
    pub last_reminder_sent_at: Option<i64>,
    pub created_at: i64,
}

impl TryFrom<DbCapsule> for Capsule {
    type Error = eyre::Report;

    fn try_from(value: DbCapsule) -> Result<Self, Self::Error> {
        Ok(Capsule {
            id: CapsuleId(value.capsule_id),
            album_id: AlbumId(value.album_id),
            owner: Principal(value.owner),
            unlock_at: datetime_from_db_repr(value.unlock_at)?,
            theme: from_db_theme(&value.theme)?,
            password_hash: value.password_hash.map(PasswordHash),
            reminder_policy: from_db_reminder_policy(&value.reminder_policy)?,
            last_reminder_sent_at: value
                .last_reminder_sent_at
                .map(datetime_from_db_repr)
                .transpose()?,
            created_at: datetime_from_db_repr(value.created_at)?,
        })
    }
}
