use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::Instrument;

use crate::{
    interact,
    model::{
        repository::{self, album::CreateAlbum, capsule::InsertCapsule, db::DbPool},
        Album, AlbumId, Capsule, CapsuleId, CapsulePatch, Notification, NotificationId,
        Permission, Principal, ShareOutcome,
    },
};

use super::{AlbumDirectory, CapsuleStore, NotificationStore, StoreResult};

/// Every call takes a connection from the pool for the duration of one
/// blocking diesel interaction and hands it back afterwards.
#[derive(Debug, Clone)]
pub struct DbStore {
    pool: DbPool,
}

impl DbStore {
    pub fn new(pool: DbPool) -> Self {
        DbStore { pool }
    }
}

#[async_trait]
impl CapsuleStore for DbStore {
    async fn insert_capsule(&self, capsule: InsertCapsule) -> StoreResult<Capsule> {
        let conn = self.pool.get().in_current_span().await?;
        let capsule = interact!(conn, move |conn| {
            repository::capsule::insert_capsule(conn, &capsule)
        })
        .await??;
        Ok(capsule)
    }

    async fn get_capsule(&self, capsule_id: CapsuleId) -> StoreResult<Option<Capsule>> {
        let conn = self.pool.get().in_current_span().await?;
        let capsule = interact!(conn, move |conn| {
            repository::capsule::get_capsule(conn, capsule_id)
        })
        .await??;
        Ok(capsule)
    }

    async fn capsules_visible_to(&self, principal: &Principal) -> StoreResult<Vec<Capsule>> {
        let principal = principal.clone();
        let conn = self.pool.get().in_current_span().await?;
        let capsules = interact!(conn, move |conn| {
            repository::capsule::get_capsules_visible_to(conn, &principal)
        })
        .await??;
        Ok(capsules)
    }

    async fn update_capsule_owned(
        &self,
        capsule_id: CapsuleId,
        owner: &Principal,
        patch: CapsulePatch,
        still_locked_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Option<Capsule>> {
        let owner = owner.clone();
        let conn = self.pool.get().in_current_span().await?;
        let capsule = interact!(conn, move |conn| {
            repository::capsule::update_capsule_owned(
                conn,
                capsule_id,
                &owner,
                &patch,
                still_locked_at,
            )
        })
        .await??;
        Ok(capsule)
    }

    async fn delete_capsule_owned(
        &self,
        capsule_id: CapsuleId,
        owner: &Principal,
    ) -> StoreResult<bool> {
        let owner = owner.clone();
        let conn = self.pool.get().in_current_span().await?;
        let deleted = interact!(conn, move |conn| {
            repository::capsule::delete_capsule_owned(conn, capsule_id, &owner)
        })
        .await??;
        Ok(deleted)
    }

    async fn reminder_candidates(&self, now: DateTime<Utc>) -> StoreResult<Vec<Capsule>> {
        let conn = self.pool.get().in_current_span().await?;
        let capsules = interact!(conn, move |conn| {
            repository::capsule::get_reminder_candidates(conn, now)
        })
        .await??;
        Ok(capsules)
    }

    async fn record_reminder_sent(
        &self,
        capsule_id: CapsuleId,
        sent_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let conn = self.pool.get().in_current_span().await?;
        let updated = interact!(conn, move |conn| {
            repository::capsule::set_last_reminder_sent(conn, capsule_id, sent_at)
        })
        .await??;
        Ok(updated)
    }
}

#[async_trait]
impl AlbumDirectory for DbStore {
    async fn resolve_album(&self, album_id: AlbumId) -> StoreResult<Option<Album>> {
        let conn = self.pool.get().in_current_span().await?;
        let album = interact!(conn, move |conn| {
            repository::album::get_album(conn, album_id)
        })
        .await??;
        Ok(album)
    }

    async fn create_album(&self, create: CreateAlbum, now: DateTime<Utc>) -> StoreResult<AlbumId> {
        let conn = self.pool.get().in_current_span().await?;
        let album_id = interact!(conn, move |conn| {
            repository::album::create_album(conn, create, now)
        })
        .await??;
        Ok(album_id)
    }

    async fn albums_visible_to(&self, principal: &Principal) -> StoreResult<Vec<Album>> {
        let principal = principal.clone();
        let conn = self.pool.get().in_current_span().await?;
        let albums = interact!(conn, move |conn| {
            repository::album::get_albums_visible_to(conn, &principal)
        })
        .await??;
        Ok(albums)
    }

    async fn share_album(
        &self,
        album_id: AlbumId,
        principal: &Principal,
        permission: Permission,
        now: DateTime<Utc>,
    ) -> StoreResult<ShareOutcome> {
        let principal = principal.clone();
        let conn = self.pool.get().in_current_span().await?;
        let outcome = interact!(conn, move |conn| {
            repository::album::share_album(conn, album_id, &principal, permission, now)
        })
        .await??;
        Ok(outcome)
    }
}

#[async_trait]
impl NotificationStore for DbStore {
    async fn insert_notification(
        &self,
        recipient: &Principal,
        capsule_id: CapsuleId,
        message: &str,
        created_at: DateTime<Utc>,
    ) -> StoreResult<NotificationId> {
        let recipient = recipient.clone();
        let message = message.to_owned();
        let conn = self.pool.get().in_current_span().await?;
        let id = interact!(conn, move |conn| {
            repository::notification::insert_notification(
                conn,
                &recipient,
                capsule_id,
                &message,
                created_at,
            )
        })
        .await??;
        Ok(id)
    }

    async fn notifications_for(&self, recipient: &Principal) -> StoreResult<Vec<Notification>> {
        let recipient = recipient.clone();
        let conn = self.pool.get().in_current_span().await?;
        let notifications = interact!(conn, move |conn| {
            repository::notification::get_notifications_for(conn, &recipient)
        })
        .await??;
        Ok(notifications)
    }

    async fn mark_notification_read(
        &self,
        notification_id: NotificationId,
        recipient: &Principal,
    ) -> StoreResult<bool> {
        let recipient = recipient.clone();
        let conn = self.pool.get().in_current_span().await?;
        let updated = interact!(conn, move |conn| {
            repository::notification::mark_read(conn, notification_id, &recipient)
        })
        .await??;
        Ok(updated)
    }
}
