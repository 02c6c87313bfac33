use chrono::{DateTime, Utc};
use diesel::prelude::*;
use eyre::{Context, Result};
use tracing::instrument;

use crate::model::{
    util::{datetime_to_db_repr, to_db_reminder_policy, to_db_theme},
    AlbumId, Capsule, CapsuleId, CapsulePatch, PasswordHash, Principal, ReminderPolicy, Theme,
};

use super::db::DbConn;
use super::db_entity::DbCapsule;
use super::schema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertCapsule {
    pub album_id: AlbumId,
    pub owner: Principal,
    pub unlock_at: DateTime<Utc>,
    pub theme: Theme,
    pub password_hash: Option<PasswordHash>,
    pub reminder_policy: ReminderPolicy,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::Capsule)]
struct CapsuleChangeset {
    theme: Option<String>,
    unlock_at: Option<i64>,
    reminder_policy: Option<String>,
    last_reminder_sent_at: Option<Option<i64>>,
}

impl From<&CapsulePatch> for CapsuleChangeset {
    fn from(patch: &CapsulePatch) -> Self {
        CapsuleChangeset {
            theme: patch.theme.map(to_db_theme),
            unlock_at: patch.unlock_at.as_ref().map(datetime_to_db_repr),
            reminder_policy: patch.reminder_policy.map(to_db_reminder_policy),
            last_reminder_sent_at: match patch.reminder_policy {
                Some(ReminderPolicy::None) => Some(None),
                _ => None,
            },
        }
    }
}

#[instrument(skip(conn), level = "debug")]
pub fn insert_capsule(conn: &mut DbConn, capsule: &InsertCapsule) -> Result<Capsule> {
    use schema::Capsule;
    let db_capsule: DbCapsule = diesel::insert_into(Capsule::table)
        .values((
            Capsule::album_id.eq(capsule.album_id.0),
            Capsule::owner.eq(capsule.owner.as_str()),
            Capsule::unlock_at.eq(datetime_to_db_repr(&capsule.unlock_at)),
            Capsule::theme.eq(to_db_theme(capsule.theme)),
            Capsule::password_hash.eq(capsule.password_hash.as_ref().map(|h| h.as_str())),
            Capsule::reminder_policy.eq(to_db_reminder_policy(capsule.reminder_policy)),
            Capsule::last_reminder_sent_at.eq(None::<i64>),
            Capsule::created_at.eq(datetime_to_db_repr(&capsule.created_at)),
        ))
        .returning(DbCapsule::as_returning())
        .get_result(conn)
        .wrap_err("could not insert into table Capsule")?;
    db_capsule.try_into()
}

#[instrument(skip(conn), level = "trace")]
pub fn get_capsule(conn: &mut DbConn, capsule_id: CapsuleId) -> Result<Option<Capsule>> {
    use schema::Capsule;
    let db_capsule: Option<DbCapsule> = Capsule::table
        .find(capsule_id.0)
        .select(DbCapsule::as_select())
        .first(conn)
        .optional()
        .wrap_err("could not query table Capsule")?;
    db_capsule.map(|c| c.try_into()).transpose()
}

/// Capsules on albums owned by or shared with `principal`, ordered by unlock_at
#[instrument(skip(conn), level = "trace")]
pub fn get_capsules_visible_to(conn: &mut DbConn, principal: &Principal) -> Result<Vec<Capsule>> {
    use schema::{Album, AlbumCollaborator, Capsule};
    let owned_albums = Album::table
        .filter(Album::owner.eq(principal.as_str()))
        .select(Album::album_id);
    let shared_albums = AlbumCollaborator::table
        .filter(AlbumCollaborator::principal.eq(principal.as_str()))
        .select(AlbumCollaborator::album_id);
    Capsule::table
        .filter(
            Capsule::album_id
                .eq_any(owned_albums)
                .or(Capsule::album_id.eq_any(shared_albums)),
        )
        .order((Capsule::unlock_at, Capsule::capsule_id))
        .select(DbCapsule::as_select())
        .load::<DbCapsule>(conn)
        .wrap_err("could not query table Capsule")?
        .into_iter()
        .map(|c| c.try_into())
        .collect()
}

/// Applies `patch` only if `owner` owns the capsule and, when `still_locked_at` is set,
/// the capsule is still locked at that instant. Returns `None` if no row matched.
#[instrument(skip(conn), level = "debug")]
pub fn update_capsule_owned(
    conn: &mut DbConn,
    capsule_id: CapsuleId,
    owner: &Principal,
    patch: &CapsulePatch,
    still_locked_at: Option<DateTime<Utc>>,
) -> Result<Option<Capsule>> {
    use schema::Capsule;
    let unlock_after = still_locked_at
        .as_ref()
        .map(datetime_to_db_repr)
        .unwrap_or(i64::MIN);
    let changeset = CapsuleChangeset::from(patch);
    let db_capsule: Option<DbCapsule> = diesel::update(
        Capsule::table
            .filter(Capsule::capsule_id.eq(capsule_id.0))
            .filter(Capsule::owner.eq(owner.as_str()))
            .filter(Capsule::unlock_at.gt(unlock_after)),
    )
    .set(&changeset)
    .returning(DbCapsule::as_returning())
    .get_result(conn)
    .optional()
    .wrap_err("could not update table Capsule")?;
    db_capsule.map(|c| c.try_into()).transpose()
}

/// Returns whether a row was deleted
#[instrument(skip(conn), level = "debug")]
pub fn delete_capsule_owned(
    conn: &mut DbConn,
    capsule_id: CapsuleId,
    owner: &Principal,
) -> Result<bool> {
    use schema::Capsule;
    let deleted = diesel::delete(
        Capsule::table
            .filter(Capsule::capsule_id.eq(capsule_id.0))
            .filter(Capsule::owner.eq(owner.as_str())),
    )
    .execute(conn)
    .wrap_err("could not delete from table Capsule")?;
    Ok(deleted > 0)
}

/// Capsules that have reminders enabled and are still locked at `now`.
/// Whether a reminder is actually due is up to the reminder scheduler.
#[instrument(skip(conn), level = "trace")]
pub fn get_reminder_candidates(conn: &mut DbConn, now: DateTime<Utc>) -> Result<Vec<Capsule>> {
    use schema::Capsule;
    Capsule::table
        .filter(Capsule::reminder_policy.ne(to_db_reminder_policy(ReminderPolicy::None)))
        .filter(Capsule::unlock_at.gt(datetime_to_db_repr(&now)))
        .order(Capsule::capsule_id)
        .select(DbCapsule::as_select())
        .load::<DbCapsule>(conn)
        .wrap_err("could not query table Capsule")?
        .into_iter()
        .map(|c| c.try_into())
        .collect()
}

/// Only touches capsules with reminders enabled that are still locked at `sent_at`.
/// Returns whether a row was updated.
#[instrument(skip(conn), level = "debug")]
pub fn set_last_reminder_sent(
    conn: &mut DbConn,
    capsule_id: CapsuleId,
    sent_at: DateTime<Utc>,
) -> Result<bool> {
    use schema::Capsule;
    let db_sent_at = datetime_to_db_repr(&sent_at);
    let updated = diesel::update(
        Capsule::table
            .filter(Capsule::capsule_id.eq(capsule_id.0))
            .filter(Capsule::reminder_policy.ne(to_db_reminder_policy(ReminderPolicy::None)))
            .filter(Capsule::unlock_at.gt(db_sent_at)),
    )
    .set(Capsule::last_reminder_sent_at.eq(Some(db_sent_at)))
    .execute(conn)
    .wrap_err("could not update column Capsule.last_reminder_sent_at")?;
    Ok(updated > 0)
}
