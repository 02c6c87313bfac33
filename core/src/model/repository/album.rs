use chrono::{DateTime, Utc};
use diesel::prelude::*;
use eyre::{Context, Result};
use itertools::Itertools;
use tracing::instrument;

use crate::model::{
    util::{datetime_to_db_repr, from_db_permission, to_db_permission},
    Album, AlbumId, Permission, Principal, ShareOutcome,
};

use super::db::DbConn;
use super::db_entity::{album_from_db, DbAlbum, DbAlbumCollaborator};
use super::schema;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CreateAlbum {
    pub owner: Principal,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[instrument(skip(conn), level = "debug")]
pub fn create_album(
    conn: &mut DbConn,
    create_album: CreateAlbum,
    now: DateTime<Utc>,
) -> Result<AlbumId> {
    use schema::Album;
    let db_now = datetime_to_db_repr(&now);
    let album_id: i64 = diesel::insert_into(Album::table)
        .values((
            Album::owner.eq(create_album.owner.as_str()),
            Album::name.eq(create_album.name),
            Album::description.eq(create_album.description),
            Album::created_at.eq(db_now),
            Album::changed_at.eq(db_now),
        ))
        .returning(Album::album_id)
        .get_result(conn)
        .wrap_err("could not insert into table Album")?;
    Ok(AlbumId(album_id))
}

#[instrument(skip(conn), level = "trace")]
pub fn get_album(conn: &mut DbConn, album_id: AlbumId) -> Result<Option<Album>> {
    use schema::{Album, AlbumCollaborator};
    let db_album: Option<DbAlbum> = Album::table
        .find(album_id.0)
        .select(DbAlbum::as_select())
        .first(conn)
        .optional()
        .wrap_err("could not query table Album")?;
    let Some(db_album) = db_album else {
        return Ok(None);
    };
    let collaborators: Vec<DbAlbumCollaborator> = AlbumCollaborator::table
        .filter(AlbumCollaborator::album_id.eq(album_id.0))
        .order(AlbumCollaborator::idx)
        .select(DbAlbumCollaborator::as_select())
        .load(conn)
        .wrap_err("could not query table AlbumCollaborator")?;
    album_from_db(db_album, &collaborators).map(Some)
}

/// Albums owned by or shared with `principal`, newest first
#[instrument(skip(conn), level = "trace")]
pub fn get_albums_visible_to(conn: &mut DbConn, principal: &Principal) -> Result<Vec<Album>> {
    use schema::{Album, AlbumCollaborator};
    let shared_with = AlbumCollaborator::table
        .filter(AlbumCollaborator::principal.eq(principal.as_str()))
        .select(AlbumCollaborator::album_id);
    let db_albums: Vec<DbAlbum> = Album::table
        .filter(
            Album::owner
                .eq(principal.as_str())
                .or(Album::album_id.eq_any(shared_with)),
        )
        .order((Album::created_at.desc(), Album::album_id.desc()))
        .select(DbAlbum::as_select())
        .load(conn)
        .wrap_err("could not query table Album")?;
    let album_ids: Vec<i64> = db_albums.iter().map(|a| a.album_id).collect();
    let mut collaborators_by_album = AlbumCollaborator::table
        .filter(AlbumCollaborator::album_id.eq_any(&album_ids))
        .order((AlbumCollaborator::album_id, AlbumCollaborator::idx))
        .select(DbAlbumCollaborator::as_select())
        .load::<DbAlbumCollaborator>(conn)
        .wrap_err("could not query table AlbumCollaborator")?
        .into_iter()
        .into_group_map_by(|c| c.album_id);
    db_albums
        .into_iter()
        .map(|db_album| {
            let collaborators = collaborators_by_album
                .remove(&db_album.album_id)
                .unwrap_or_default();
            album_from_db(db_album, &collaborators)
        })
        .collect()
}

/// Add `principal` as collaborator, or upgrade an existing viewer to editor.
/// Never lowers an existing permission. Serialized against other writers.
#[instrument(skip(conn), level = "debug")]
pub fn share_album(
    conn: &mut DbConn,
    album_id: AlbumId,
    principal: &Principal,
    permission: Permission,
    now: DateTime<Utc>,
) -> Result<ShareOutcome> {
    use schema::{Album, AlbumCollaborator};
    // write lock from the start, so concurrent shares of the same principal
    // queue on busy_timeout instead of both trying to insert
    conn.immediate_transaction(|conn| {
        let existing: Option<(i64, String)> = AlbumCollaborator::table
            .filter(AlbumCollaborator::album_id.eq(album_id.0))
            .filter(AlbumCollaborator::principal.eq(principal.as_str()))
            .select((
                AlbumCollaborator::album_collaborator_id,
                AlbumCollaborator::permission,
            ))
            .first(conn)
            .optional()?;
        let outcome = match existing {
            None => {
                let max_idx: Option<i32> = AlbumCollaborator::table
                    .filter(AlbumCollaborator::album_id.eq(album_id.0))
                    .select(diesel::dsl::max(AlbumCollaborator::idx))
                    .first(conn)?;
                diesel::insert_into(AlbumCollaborator::table)
                    .values((
                        AlbumCollaborator::album_id.eq(album_id.0),
                        AlbumCollaborator::principal.eq(principal.as_str()),
                        AlbumCollaborator::permission.eq(to_db_permission(permission)),
                        AlbumCollaborator::idx.eq(max_idx.map_or(0, |idx| idx + 1)),
                    ))
                    .execute(conn)?;
                ShareOutcome::Added(permission)
            }
            Some((collaborator_id, current)) => {
                let current = from_db_permission(&current)?;
                if permission > current {
                    diesel::update(AlbumCollaborator::table.find(collaborator_id))
                        .set(AlbumCollaborator::permission.eq(to_db_permission(permission)))
                        .execute(conn)?;
                    ShareOutcome::Upgraded
                } else {
                    ShareOutcome::Unchanged(current)
                }
            }
        };
        if !matches!(outcome, ShareOutcome::Unchanged(_)) {
            diesel::update(Album::table.find(album_id.0))
                .set(Album::changed_at.eq(datetime_to_db_repr(&now)))
                .execute(conn)?;
        }
        Ok::<_, eyre::Report>(outcome)
    })
    .wrap_err("error sharing album")
}
