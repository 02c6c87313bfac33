use diesel::{Queryable, Selectable};

use crate::model::{
    util::{datetime_from_db_repr, from_db_permission},
    Album, AlbumId, Collaborator, Principal,
};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = super::super::schema::Album)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbAlbum {
    pub album_id: i64,
    pub owner: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
    pub changed_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = super::super::schema::AlbumCollaborator)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbAlbumCollaborator {
    pub album_collaborator_id: i64,
    pub album_id: i64,
    pub principal: String,
    pub permission: String,
    pub idx: i32,
}

impl TryFrom<&DbAlbumCollaborator> for Collaborator {
    type Error = eyre::Report;

    fn try_from(value: &DbAlbumCollaborator) -> Result<Self, Self::Error> {
        Ok(Collaborator {
            principal: Principal(value.principal.clone()),
            permission: from_db_permission(&value.permission)?,
        })
    }
}

/// `collaborators` must belong to `album` and be ordered by idx
pub fn album_from_db(
    album: DbAlbum,
    collaborators: &[DbAlbumCollaborator],
) -> eyre::Result<Album> {
    debug_assert!(collaborators.iter().all(|c| c.album_id == album.album_id));
    Ok(Album {
        id: AlbumId(album.album_id),
        owner: Principal(album.owner),
        name: album.name,
        description: album.description,
        created_at: datetime_from_db_repr(album.created_at)?,
        changed_at: datetime_from_db_repr(album.changed_at)?,
        collaborators: collaborators
            .iter()
            .map(|c| c.try_into())
            .collect::<eyre::Result<Vec<_>>>()?,
    })
}
