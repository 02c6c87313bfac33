use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::{
    capsule::{can_access, due_reminders, CapsulePasswordHasher},
    model::{
        repository::capsule::InsertCapsule, util::trunc_to_db_precision, AccessResult, AlbumId,
        Capsule, CapsuleId, CapsulePatch, Principal, ReminderPolicy, Theme,
    },
    store::{AlbumDirectory, CapsuleStore},
};

use super::{Clock, CapsuleError, CapsuleResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCapsule {
    pub album_id: AlbumId,
    pub unlock_at: DateTime<Utc>,
    pub theme: Theme,
    pub password_protected: bool,
    /// Ignored unless `password_protected`
    pub password: Option<String>,
    pub reminder_policy: ReminderPolicy,
}

/// A reminder that should go out now, and who it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub capsule_id: CapsuleId,
    pub recipient: Principal,
    pub unlock_at: DateTime<Utc>,
}

/// Creation, owner-only changes and access checks for time capsules.
#[derive(Clone)]
pub struct CapsuleService {
    capsules: Arc<dyn CapsuleStore>,
    albums: Arc<dyn AlbumDirectory>,
    clock: Arc<dyn Clock>,
    hasher: CapsulePasswordHasher,
}

impl CapsuleService {
    pub fn new(
        capsules: Arc<dyn CapsuleStore>,
        albums: Arc<dyn AlbumDirectory>,
        clock: Arc<dyn Clock>,
        hasher: CapsulePasswordHasher,
    ) -> Self {
        CapsuleService {
            capsules,
            albums,
            clock,
            hasher,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[instrument(skip(self, create), fields(album_id = %create.album_id))]
    pub async fn create(&self, owner: &Principal, create: CreateCapsule) -> CapsuleResult<Capsule> {
        let now = self.clock.now();
        let unlock_at = trunc_to_db_precision(create.unlock_at);
        if unlock_at <= now {
            return Err(CapsuleError::validation("unlock time must be in the future"));
        }
        let password = match (create.password_protected, create.password) {
            (true, Some(password)) if !password.is_empty() => Some(password),
            (true, _) => {
                return Err(CapsuleError::validation(
                    "a password protected capsule needs a password",
                ))
            }
            (false, _) => None,
        };
        let album = self
            .albums
            .resolve_album(create.album_id)
            .await?
            .ok_or(CapsuleError::NotFound("album"))?;
        if !album.is_owner_or_editor(owner) {
            return Err(CapsuleError::forbidden(
                "only the album owner or an editor can create a capsule for it",
            ));
        }
        let password_hash = match password {
            Some(password) => {
                let hasher = self.hasher.clone();
                Some(tokio::task::spawn_blocking(move || hasher.hash(&password)).await??)
            }
            None => None,
        };
        let capsule = self
            .capsules
            .insert_capsule(InsertCapsule {
                album_id: album.id,
                owner: owner.clone(),
                unlock_at,
                theme: create.theme,
                password_hash,
                reminder_policy: create.reminder_policy,
                created_at: now,
            })
            .await?;
        info!(capsule_id = %capsule.id, %unlock_at, "created capsule");
        Ok(capsule)
    }

    /// Capsule metadata for anyone who can see its album
    #[instrument(skip(self))]
    pub async fn get(&self, capsule_id: CapsuleId, requester: &Principal) -> CapsuleResult<Capsule> {
        let capsule = self.load(capsule_id).await?;
        self.ensure_can_view(&capsule, requester).await?;
        Ok(capsule)
    }

    #[instrument(skip(self))]
    pub async fn list_visible(&self, principal: &Principal) -> CapsuleResult<Vec<Capsule>> {
        Ok(self.capsules.capsules_visible_to(principal).await?)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        capsule_id: CapsuleId,
        requester: &Principal,
        patch: CapsulePatch,
    ) -> CapsuleResult<Capsule> {
        if patch.is_empty() {
            return Err(CapsuleError::validation("nothing to update"));
        }
        let capsule = self.load(capsule_id).await?;
        if capsule.owner != *requester {
            return Err(CapsuleError::forbidden("only the owner can change a capsule"));
        }
        let now = self.clock.now();
        let patch = CapsulePatch {
            unlock_at: patch.unlock_at.map(trunc_to_db_precision),
            ..patch
        };
        if let Some(new_unlock_at) = patch.unlock_at {
            if capsule.is_unlocked_at(now) {
                return Err(CapsuleError::validation(
                    "unlock time of an unlocked capsule can not be changed",
                ));
            }
            if new_unlock_at <= now {
                return Err(CapsuleError::validation("unlock time must be in the future"));
            }
        }
        let still_locked_at = patch.unlock_at.map(|_| now);
        let updated = self
            .capsules
            .update_capsule_owned(capsule_id, requester, patch, still_locked_at)
            .await?
            .ok_or_else(|| {
                CapsuleError::Conflict("capsule was changed or deleted concurrently".to_owned())
            })?;
        info!(%capsule_id, "updated capsule");
        Ok(updated)
    }

    /// Deleting a capsule leaves its album alone.
    #[instrument(skip(self))]
    pub async fn delete(&self, capsule_id: CapsuleId, requester: &Principal) -> CapsuleResult<()> {
        let capsule = self.load(capsule_id).await?;
        if capsule.owner != *requester {
            return Err(CapsuleError::forbidden("only the owner can delete a capsule"));
        }
        if !self
            .capsules
            .delete_capsule_owned(capsule_id, requester)
            .await?
        {
            // someone else deleted it in the meantime
            return Err(CapsuleError::NotFound("capsule"));
        }
        info!(%capsule_id, "deleted capsule");
        Ok(())
    }

    /// Whether `requester` may view the capsule's contents right now.
    /// Anyone who can see the album may try, not only the owner.
    #[instrument(skip(self, password))]
    pub async fn check_access(
        &self,
        capsule_id: CapsuleId,
        requester: &Principal,
        password: Option<String>,
    ) -> CapsuleResult<AccessResult> {
        let capsule = self.load(capsule_id).await?;
        self.ensure_can_view(&capsule, requester).await?;
        let now = self.clock.now();
        // argon2 verification is CPU bound
        let result =
            tokio::task::spawn_blocking(move || can_access(&capsule, now, password.as_deref()))
                .await?;
        debug!(?result, "evaluated capsule access");
        Ok(result)
    }

    /// Reminders due now, with the owner as delivery target.
    /// Delivery is up to the caller, who reports back with `record_reminder_sent`.
    #[instrument(skip(self))]
    pub async fn due_reminders(&self) -> CapsuleResult<Vec<DueReminder>> {
        let now = self.clock.now();
        let candidates = self.capsules.reminder_candidates(now).await?;
        let due = due_reminders(&candidates, now);
        Ok(candidates
            .into_iter()
            .filter(|c| due.contains(&c.id))
            .map(|c| DueReminder {
                capsule_id: c.id,
                recipient: c.owner,
                unlock_at: c.unlock_at,
            })
            .collect())
    }

    /// Returns `false` if the capsule is gone, unlocked or no longer has reminders enabled.
    #[instrument(skip(self))]
    pub async fn record_reminder_sent(
        &self,
        capsule_id: CapsuleId,
        sent_at: DateTime<Utc>,
    ) -> CapsuleResult<bool> {
        let recorded = self
            .capsules
            .record_reminder_sent(capsule_id, trunc_to_db_precision(sent_at))
            .await?;
        if !recorded {
            debug!(%capsule_id, "reminder not recorded, capsule changed since it was due");
        }
        Ok(recorded)
    }

    async fn load(&self, capsule_id: CapsuleId) -> CapsuleResult<Capsule> {
        self.capsules
            .get_capsule(capsule_id)
            .await?
            .ok_or(CapsuleError::NotFound("capsule"))
    }

    async fn ensure_can_view(&self, capsule: &Capsule, requester: &Principal) -> CapsuleResult<()> {
        if capsule.owner == *requester
            || self.albums.can_view(capsule.album_id, requester).await?
        {
            Ok(())
        } else {
            Err(CapsuleError::forbidden("no access to this capsule's album"))
        }
    }
}
