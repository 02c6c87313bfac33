//! Persistence seams of the capsule service. Services only see these traits;
//! `DbStore` implements all of them over the SQLite pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{
    repository::{album::CreateAlbum, capsule::InsertCapsule, StoreError},
    Album, AlbumId, Capsule, CapsuleId, CapsulePatch, Notification, NotificationId, Permission,
    Principal, ShareOutcome,
};

mod db_store;
pub use db_store::DbStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Capsule records. Updates and deletes are conditional on ownership and applied
/// atomically by the store, so concurrent owner actions can't interleave.
#[async_trait]
pub trait CapsuleStore: Send + Sync {
    async fn insert_capsule(&self, capsule: InsertCapsule) -> StoreResult<Capsule>;
    async fn get_capsule(&self, capsule_id: CapsuleId) -> StoreResult<Option<Capsule>>;
    async fn capsules_visible_to(&self, principal: &Principal) -> StoreResult<Vec<Capsule>>;
    /// `None` if no capsule with this id and owner exists, or if `still_locked_at`
    /// is set and the capsule is no longer locked at that instant
    async fn update_capsule_owned(
        &self,
        capsule_id: CapsuleId,
        owner: &Principal,
        patch: CapsulePatch,
        still_locked_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Option<Capsule>>;
    async fn delete_capsule_owned(&self, capsule_id: CapsuleId, owner: &Principal)
        -> StoreResult<bool>;
    /// Locked capsules with reminders enabled
    async fn reminder_candidates(&self, now: DateTime<Utc>) -> StoreResult<Vec<Capsule>>;
    async fn record_reminder_sent(
        &self,
        capsule_id: CapsuleId,
        sent_at: DateTime<Utc>,
    ) -> StoreResult<bool>;
}

/// Albums as far as capsules are concerned: resolving them, permission checks and sharing.
#[async_trait]
pub trait AlbumDirectory: Send + Sync {
    async fn resolve_album(&self, album_id: AlbumId) -> StoreResult<Option<Album>>;

    /// `false` for albums that don't exist
    async fn is_owner_or_editor(&self, album_id: AlbumId, principal: &Principal) -> StoreResult<bool> {
        Ok(self
            .resolve_album(album_id)
            .await?
            .is_some_and(|album| album.is_owner_or_editor(principal)))
    }

    /// `false` for albums that don't exist
    async fn can_view(&self, album_id: AlbumId, principal: &Principal) -> StoreResult<bool> {
        Ok(self
            .resolve_album(album_id)
            .await?
            .is_some_and(|album| album.can_view(principal)))
    }

    async fn create_album(&self, create: CreateAlbum, now: DateTime<Utc>) -> StoreResult<AlbumId>;
    async fn albums_visible_to(&self, principal: &Principal) -> StoreResult<Vec<Album>>;
    async fn share_album(
        &self,
        album_id: AlbumId,
        principal: &Principal,
        permission: Permission,
        now: DateTime<Utc>,
    ) -> StoreResult<ShareOutcome>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(
        &self,
        recipient: &Principal,
        capsule_id: CapsuleId,
        message: &str,
        created_at: DateTime<Utc>,
    ) -> StoreResult<NotificationId>;
    async fn notifications_for(&self, recipient: &Principal) -> StoreResult<Vec<Notification>>;
    async fn mark_notification_read(
        &self,
        notification_id: NotificationId,
        recipient: &Principal,
    ) -> StoreResult<bool>;
}
