use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    model::{repository::album::CreateAlbum, Album, AlbumId, Permission, Principal, ShareOutcome},
    store::AlbumDirectory,
};

use super::{Clock, CapsuleError, CapsuleResult};

#[derive(Clone)]
pub struct AlbumService {
    albums: Arc<dyn AlbumDirectory>,
    clock: Arc<dyn Clock>,
}

impl AlbumService {
    pub fn new(albums: Arc<dyn AlbumDirectory>, clock: Arc<dyn Clock>) -> Self {
        AlbumService { albums, clock }
    }

    #[instrument(skip(self))]
    pub async fn create_album(
        &self,
        owner: &Principal,
        name: Option<String>,
        description: Option<String>,
    ) -> CapsuleResult<Album> {
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CapsuleError::validation("name can not be empty"));
        }
        let album_id = self
            .albums
            .create_album(
                CreateAlbum {
                    owner: owner.clone(),
                    name,
                    description,
                },
                self.clock.now(),
            )
            .await?;
        info!(%album_id, "created album");
        self.albums
            .resolve_album(album_id)
            .await?
            .ok_or(CapsuleError::NotFound("album"))
    }

    #[instrument(skip(self))]
    pub async fn list_visible(&self, principal: &Principal) -> CapsuleResult<Vec<Album>> {
        Ok(self.albums.albums_visible_to(principal).await?)
    }

    /// Adds `principal` as collaborator. An existing viewer asked to be an editor
    /// is upgraded, nobody is ever downgraded.
    #[instrument(skip(self))]
    pub async fn share(
        &self,
        album_id: AlbumId,
        sharer: &Principal,
        principal: &Principal,
        permission: Permission,
    ) -> CapsuleResult<ShareOutcome> {
        let album = self
            .albums
            .resolve_album(album_id)
            .await?
            .ok_or(CapsuleError::NotFound("album"))?;
        if !album.is_owner_or_editor(sharer) {
            return Err(CapsuleError::forbidden(
                "only the album owner or an editor can share it",
            ));
        }
        if album.owner == *principal {
            return Err(CapsuleError::validation(
                "the album owner can not be added as a collaborator",
            ));
        }
        let outcome = self
            .albums
            .share_album(album_id, principal, permission, self.clock.now())
            .await?;
        info!(%album_id, ?outcome, "shared album");
        Ok(outcome)
    }
}
