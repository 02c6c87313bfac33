use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use claims::{assert_err, assert_matches, assert_none, assert_ok};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use crate::{
    capsule::password::test_hasher,
    model::{
        repository::{
            capsule::InsertCapsule,
            db::{open_and_migrate, open_db_pool},
            StoreError,
        },
        AccessResult, AlbumId, Capsule, CapsuleId, CapsulePatch, Permission, Principal,
        ReminderPolicy, ShareOutcome, Theme,
    },
    store::{CapsuleStore, DbStore, StoreResult},
};

struct Fixture {
    capsules: CapsuleService,
    albums: AlbumService,
    notifications: NotificationService,
    notifier: InAppNotifier,
    store: Arc<DbStore>,
    clock: ManualClock,
    _dir: TempDir,
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

async fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("memorybox.db");
    let pool = open_and_migrate(db_path.to_str().unwrap()).await.unwrap();
    let store = Arc::new(DbStore::new(pool));
    let clock = ManualClock::new(start());
    let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
    Fixture {
        capsules: CapsuleService::new(
            store.clone(),
            store.clone(),
            shared_clock.clone(),
            test_hasher(),
        ),
        albums: AlbumService::new(store.clone(), shared_clock.clone()),
        notifications: NotificationService::new(store.clone()),
        notifier: InAppNotifier::new(store.clone(), shared_clock),
        store,
        clock,
        _dir: dir,
    }
}

fn alice() -> Principal {
    Principal::new("alice@example.com")
}

fn bob() -> Principal {
    Principal::new("bob@example.com")
}

fn carol() -> Principal {
    Principal::new("carol@example.com")
}

impl Fixture {
    async fn album(&self, owner: &Principal) -> AlbumId {
        self.albums
            .create_album(owner, Some("holidays".to_owned()), None)
            .await
            .unwrap()
            .id
    }

    /// Capsule service over `capsules`, sharing everything else with the fixture
    fn capsules_over(&self, capsules: Arc<dyn CapsuleStore>) -> CapsuleService {
        CapsuleService::new(
            capsules,
            self.store.clone(),
            Arc::new(self.clock.clone()),
            test_hasher(),
        )
    }

    fn create_req(&self, album_id: AlbumId, unlock_in: Duration) -> CreateCapsule {
        CreateCapsule {
            album_id,
            unlock_at: self.clock.now() + unlock_in,
            theme: Theme::Ocean,
            password_protected: false,
            password: None,
            reminder_policy: ReminderPolicy::None,
        }
    }
}

#[tokio::test]
async fn locked_then_granted_after_unlock() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let capsule = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::hours(1)))
        .await
        .unwrap();
    let access = f.capsules.check_access(capsule.id, &alice(), None).await;
    assert_eq!(
        assert_ok!(access),
        AccessResult::Locked {
            unlock_at: capsule.unlock_at
        }
    );
    f.clock.advance(Duration::hours(1) + Duration::seconds(1));
    let access = f.capsules.check_access(capsule.id, &alice(), None).await;
    assert_eq!(assert_ok!(access), AccessResult::Granted);
}

#[tokio::test]
async fn create_in_the_past_is_rejected() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let res = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::seconds(-1)))
        .await;
    assert_matches!(res, Err(CapsuleError::Validation(_)));
    let res = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::zero()))
        .await;
    assert_matches!(res, Err(CapsuleError::Validation(_)));
}

#[tokio::test]
async fn create_requires_password_when_protected() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let req = CreateCapsule {
        password_protected: true,
        password: Some(String::new()),
        ..f.create_req(album_id, Duration::days(1))
    };
    let res = f.capsules.create(&alice(), req).await;
    assert_matches!(res, Err(CapsuleError::Validation(_)));
}

#[tokio::test]
async fn create_checks_album() {
    let f = fixture().await;
    let res = f
        .capsules
        .create(&alice(), f.create_req(AlbumId(4242), Duration::days(1)))
        .await;
    assert_matches!(res, Err(CapsuleError::NotFound(_)));

    let album_id = f.album(&alice()).await;
    let res = f
        .capsules
        .create(&bob(), f.create_req(album_id, Duration::days(1)))
        .await;
    assert_matches!(res, Err(CapsuleError::Forbidden(_)));

    assert_ok!(
        f.albums
            .share(album_id, &alice(), &bob(), Permission::Editor)
            .await
    );
    let capsule = assert_ok!(
        f.capsules
            .create(&bob(), f.create_req(album_id, Duration::days(1)))
            .await
    );
    assert_eq!(capsule.owner, bob());
}

#[tokio::test]
async fn password_protected_capsule() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let req = CreateCapsule {
        password_protected: true,
        password: Some("open sesame".to_owned()),
        ..f.create_req(album_id, Duration::days(1))
    };
    let capsule = f.capsules.create(&alice(), req).await.unwrap();
    assert!(capsule.password_protected());
    let stored = capsule.password_hash.as_ref().unwrap();
    assert_ne!(stored.as_str(), "open sesame");

    // correct password but still locked
    let access = f
        .capsules
        .check_access(capsule.id, &alice(), Some("open sesame".to_owned()))
        .await
        .unwrap();
    assert_matches!(access, AccessResult::Locked { .. });

    f.clock.advance(Duration::days(2));
    let access = f.capsules.check_access(capsule.id, &alice(), None).await;
    assert_eq!(assert_ok!(access), AccessResult::PasswordRequired);
    let access = f
        .capsules
        .check_access(capsule.id, &alice(), Some("open says me".to_owned()))
        .await;
    assert_eq!(assert_ok!(access), AccessResult::PasswordRequired);
    let access = f
        .capsules
        .check_access(capsule.id, &alice(), Some("open sesame".to_owned()))
        .await;
    assert_eq!(assert_ok!(access), AccessResult::Granted);
}

#[tokio::test]
async fn collaborators_can_check_access_strangers_can_not() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let capsule = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::hours(1)))
        .await
        .unwrap();
    let res = f.capsules.check_access(capsule.id, &bob(), None).await;
    assert_matches!(res, Err(CapsuleError::Forbidden(_)));
    let res = f.capsules.get(capsule.id, &bob()).await;
    assert_matches!(res, Err(CapsuleError::Forbidden(_)));

    f.albums
        .share(album_id, &alice(), &bob(), Permission::Viewer)
        .await
        .unwrap();
    let access = f.capsules.check_access(capsule.id, &bob(), None).await;
    assert_matches!(assert_ok!(access), AccessResult::Locked { .. });
    assert_ok!(f.capsules.get(capsule.id, &bob()).await);
}

#[tokio::test]
async fn delete_twice() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let capsule = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::hours(1)))
        .await
        .unwrap();
    assert_matches!(
        f.capsules.delete(capsule.id, &bob()).await,
        Err(CapsuleError::Forbidden(_))
    );
    assert_ok!(f.capsules.delete(capsule.id, &alice()).await);
    assert_matches!(
        f.capsules.delete(capsule.id, &alice()).await,
        Err(CapsuleError::NotFound(_))
    );
    // the album stays
    let albums = f.albums.list_visible(&alice()).await.unwrap();
    assert_eq!(albums.len(), 1);
}

#[tokio::test]
async fn update_by_owner_only() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    f.albums
        .share(album_id, &alice(), &bob(), Permission::Editor)
        .await
        .unwrap();
    let capsule = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::hours(1)))
        .await
        .unwrap();
    let patch = CapsulePatch {
        theme: Some(Theme::Royal),
        ..Default::default()
    };
    assert_matches!(
        f.capsules.update(capsule.id, &bob(), patch.clone()).await,
        Err(CapsuleError::Forbidden(_))
    );
    let updated = assert_ok!(f.capsules.update(capsule.id, &alice(), patch).await);
    assert_eq!(updated.theme, Theme::Royal);
    assert_eq!(updated.unlock_at, capsule.unlock_at);

    assert_matches!(
        f.capsules
            .update(capsule.id, &alice(), CapsulePatch::default())
            .await,
        Err(CapsuleError::Validation(_))
    );
}

#[tokio::test]
async fn unlock_time_is_frozen_once_unlocked() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let capsule = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::hours(1)))
        .await
        .unwrap();

    let postpone = CapsulePatch {
        unlock_at: Some(f.clock.now() + Duration::days(3)),
        ..Default::default()
    };
    let updated = assert_ok!(
        f.capsules
            .update(capsule.id, &alice(), postpone.clone())
            .await
    );
    assert_eq!(updated.unlock_at, f.clock.now() + Duration::days(3));

    let into_the_past = CapsulePatch {
        unlock_at: Some(f.clock.now() - Duration::minutes(1)),
        ..Default::default()
    };
    assert_matches!(
        f.capsules.update(capsule.id, &alice(), into_the_past).await,
        Err(CapsuleError::Validation(_))
    );

    f.clock.advance(Duration::days(3));
    let later = CapsulePatch {
        unlock_at: Some(f.clock.now() + Duration::days(1)),
        ..Default::default()
    };
    assert_matches!(
        f.capsules.update(capsule.id, &alice(), later).await,
        Err(CapsuleError::Validation(_))
    );
    // other fields stay editable
    let theme = CapsulePatch {
        theme: Some(Theme::Dark),
        ..Default::default()
    };
    assert_ok!(f.capsules.update(capsule.id, &alice(), theme).await);
}

#[tokio::test]
async fn list_visible_follows_album_access() {
    let f = fixture().await;
    let alices = f.album(&alice()).await;
    let bobs = f.album(&bob()).await;
    let late = f
        .capsules
        .create(&alice(), f.create_req(alices, Duration::days(10)))
        .await
        .unwrap();
    let early = f
        .capsules
        .create(&alice(), f.create_req(alices, Duration::days(1)))
        .await
        .unwrap();
    let bobs_capsule = f
        .capsules
        .create(&bob(), f.create_req(bobs, Duration::days(5)))
        .await
        .unwrap();

    let ids = |capsules: Vec<crate::model::Capsule>| -> Vec<_> {
        capsules.into_iter().map(|c| c.id).collect()
    };
    assert_eq!(
        ids(f.capsules.list_visible(&alice()).await.unwrap()),
        vec![early.id, late.id]
    );
    assert_eq!(
        ids(f.capsules.list_visible(&carol()).await.unwrap()),
        vec![]
    );
    f.albums
        .share(bobs, &bob(), &alice(), Permission::Viewer)
        .await
        .unwrap();
    assert_eq!(
        ids(f.capsules.list_visible(&alice()).await.unwrap()),
        vec![early.id, bobs_capsule.id, late.id]
    );
}

#[tokio::test]
async fn sharing_upgrades_but_never_downgrades() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    assert_eq!(
        f.albums
            .share(album_id, &alice(), &bob(), Permission::Viewer)
            .await
            .unwrap(),
        ShareOutcome::Added(Permission::Viewer)
    );
    // a viewer can't share
    assert_matches!(
        f.albums
            .share(album_id, &bob(), &carol(), Permission::Viewer)
            .await,
        Err(CapsuleError::Forbidden(_))
    );
    assert_eq!(
        f.albums
            .share(album_id, &alice(), &bob(), Permission::Editor)
            .await
            .unwrap(),
        ShareOutcome::Upgraded
    );
    assert_eq!(
        f.albums
            .share(album_id, &alice(), &bob(), Permission::Viewer)
            .await
            .unwrap(),
        ShareOutcome::Unchanged(Permission::Editor)
    );
    // editors can share
    assert_eq!(
        f.albums
            .share(album_id, &bob(), &carol(), Permission::Viewer)
            .await
            .unwrap(),
        ShareOutcome::Added(Permission::Viewer)
    );
    assert_matches!(
        f.albums
            .share(album_id, &bob(), &alice(), Permission::Viewer)
            .await,
        Err(CapsuleError::Validation(_))
    );
    assert_matches!(
        f.albums
            .share(AlbumId(4242), &alice(), &bob(), Permission::Viewer)
            .await,
        Err(CapsuleError::NotFound(_))
    );

    let albums = f.albums.list_visible(&carol()).await.unwrap();
    let collaborators: Vec<_> = albums[0]
        .collaborators
        .iter()
        .map(|c| (c.principal.clone(), c.permission))
        .collect();
    assert_eq!(
        collaborators,
        vec![(bob(), Permission::Editor), (carol(), Permission::Viewer)]
    );
}

#[tokio::test]
async fn create_album_rejects_blank_name() {
    let f = fixture().await;
    let res = f
        .albums
        .create_album(&alice(), Some("   ".to_owned()), None)
        .await;
    assert_matches!(res, Err(CapsuleError::Validation(_)));
    let album = assert_ok!(f.albums.create_album(&alice(), None, None).await);
    assert_none!(album.name);
    assert_eq!(album.owner, alice());
}

#[tokio::test]
async fn weekly_reminder_due_after_eight_days() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let req = CreateCapsule {
        reminder_policy: ReminderPolicy::Weekly,
        ..f.create_req(album_id, Duration::days(40))
    };
    let capsule = f.capsules.create(&alice(), req).await.unwrap();
    f.clock.advance(Duration::days(2));
    assert_eq!(f.capsules.due_reminders().await.unwrap(), vec![]);

    // last reminder went out 8 days before "now"
    assert!(f
        .capsules
        .record_reminder_sent(capsule.id, f.clock.now())
        .await
        .unwrap());
    f.clock.advance(Duration::days(8));
    let due = f.capsules.due_reminders().await.unwrap();
    assert_eq!(
        due,
        vec![DueReminder {
            capsule_id: capsule.id,
            recipient: alice(),
            unlock_at: capsule.unlock_at,
        }]
    );
}

#[tokio::test]
async fn no_reminders_without_policy_or_after_unlock() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let never = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::days(3)))
        .await
        .unwrap();
    let daily = CreateCapsule {
        reminder_policy: ReminderPolicy::Daily,
        ..f.create_req(album_id, Duration::days(3))
    };
    let daily = f.capsules.create(&alice(), daily).await.unwrap();

    f.clock.advance(Duration::days(2));
    let due = f.capsules.due_reminders().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].capsule_id, daily.id);
    assert!(!f
        .capsules
        .record_reminder_sent(never.id, f.clock.now())
        .await
        .unwrap());

    f.clock.advance(Duration::days(2));
    assert_eq!(f.capsules.due_reminders().await.unwrap(), vec![]);
    assert!(!f
        .capsules
        .record_reminder_sent(daily.id, f.clock.now())
        .await
        .unwrap());
}

#[tokio::test]
async fn sweep_notifies_and_records() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let req = CreateCapsule {
        reminder_policy: ReminderPolicy::Daily,
        ..f.create_req(album_id, Duration::days(10))
    };
    let capsule = f.capsules.create(&alice(), req).await.unwrap();
    f.clock.advance(Duration::days(1));

    let report = assert_ok!(sweep_reminders(&f.capsules, &f.notifier).await);
    assert_eq!(
        report,
        SweepReport {
            due: 1,
            delivered: 1,
            failed: 0
        }
    );
    let report = assert_ok!(sweep_reminders(&f.capsules, &f.notifier).await);
    assert_eq!(report.due, 0);

    let notifications = f.notifications.list(&alice()).await.unwrap();
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.capsule_id, capsule.id);
    assert!(!notification.read);
    assert!(notification.message.starts_with("Your time capsule opens on"));
    assert_eq!(f.notifications.list(&bob()).await.unwrap(), vec![]);

    assert_matches!(
        f.notifications.mark_read(notification.id, &bob()).await,
        Err(CapsuleError::NotFound(_))
    );
    assert_ok!(f.notifications.mark_read(notification.id, &alice()).await);
    let notifications = f.notifications.list(&alice()).await.unwrap();
    assert!(notifications[0].read);
}

struct FailingNotifier {
    attempts: AtomicUsize,
}

#[async_trait]
impl ReminderNotifier for FailingNotifier {
    async fn notify(&self, _reminder: &DueReminder) -> CapsuleResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(eyre::eyre!("mail server on fire").into())
    }
}

#[tokio::test]
async fn failed_delivery_is_retried_next_sweep() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let req = CreateCapsule {
        reminder_policy: ReminderPolicy::Daily,
        ..f.create_req(album_id, Duration::days(10))
    };
    f.capsules.create(&alice(), req).await.unwrap();
    f.clock.advance(Duration::days(1));

    let failing = FailingNotifier {
        attempts: AtomicUsize::new(0),
    };
    let report = assert_ok!(sweep_reminders(&f.capsules, &failing).await);
    assert_eq!(report.failed, 1);
    let report = assert_ok!(sweep_reminders(&f.capsules, &failing).await);
    assert_eq!(report.failed, 1);
    assert_eq!(failing.attempts.load(Ordering::SeqCst), 2);

    let report = assert_ok!(sweep_reminders(&f.capsules, &f.notifier).await);
    assert_eq!(report.delivered, 1);
}

#[tokio::test]
async fn missing_capsule() {
    let f = fixture().await;
    let id = crate::model::CapsuleId(99);
    assert_matches!(
        f.capsules.get(id, &alice()).await,
        Err(CapsuleError::NotFound(_))
    );
    assert_matches!(
        f.capsules.check_access(id, &alice(), None).await,
        Err(CapsuleError::NotFound(_))
    );
    let patch = CapsulePatch {
        theme: Some(Theme::Nature),
        ..Default::default()
    };
    assert_matches!(
        f.capsules.update(id, &alice(), patch).await,
        Err(CapsuleError::NotFound(_))
    );
    assert_err!(f.capsules.delete(id, &alice()).await);
}

/// Capsule store that passes everything through to the database,
/// except for the failures it is told to produce.
struct FaultyCapsuleStore {
    inner: Arc<DbStore>,
    fail_record_for: Option<CapsuleId>,
    lose_updates: bool,
}

impl FaultyCapsuleStore {
    fn new(inner: Arc<DbStore>) -> Self {
        FaultyCapsuleStore {
            inner,
            fail_record_for: None,
            lose_updates: false,
        }
    }
}

#[async_trait]
impl CapsuleStore for FaultyCapsuleStore {
    async fn insert_capsule(&self, capsule: InsertCapsule) -> StoreResult<Capsule> {
        self.inner.insert_capsule(capsule).await
    }

    async fn get_capsule(&self, capsule_id: CapsuleId) -> StoreResult<Option<Capsule>> {
        self.inner.get_capsule(capsule_id).await
    }

    async fn capsules_visible_to(&self, principal: &Principal) -> StoreResult<Vec<Capsule>> {
        self.inner.capsules_visible_to(principal).await
    }

    async fn update_capsule_owned(
        &self,
        capsule_id: CapsuleId,
        owner: &Principal,
        patch: CapsulePatch,
        still_locked_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Option<Capsule>> {
        if self.lose_updates {
            // as if the capsule was deleted right after it was loaded
            return Ok(None);
        }
        self.inner
            .update_capsule_owned(capsule_id, owner, patch, still_locked_at)
            .await
    }

    async fn delete_capsule_owned(
        &self,
        capsule_id: CapsuleId,
        owner: &Principal,
    ) -> StoreResult<bool> {
        self.inner.delete_capsule_owned(capsule_id, owner).await
    }

    async fn reminder_candidates(&self, now: DateTime<Utc>) -> StoreResult<Vec<Capsule>> {
        self.inner.reminder_candidates(now).await
    }

    async fn record_reminder_sent(
        &self,
        capsule_id: CapsuleId,
        sent_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        if self.fail_record_for == Some(capsule_id) {
            return Err(StoreError::Unavailable("database is locked".into()));
        }
        self.inner.record_reminder_sent(capsule_id, sent_at).await
    }
}

#[tokio::test]
async fn failed_record_does_not_stop_the_sweep() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let daily = || CreateCapsule {
        reminder_policy: ReminderPolicy::Daily,
        ..f.create_req(album_id, Duration::days(10))
    };
    let first = f.capsules.create(&alice(), daily()).await.unwrap();
    let second = f.capsules.create(&alice(), daily()).await.unwrap();
    f.clock.advance(Duration::days(1));

    let faulty = f.capsules_over(Arc::new(FaultyCapsuleStore {
        fail_record_for: Some(first.id),
        ..FaultyCapsuleStore::new(f.store.clone())
    }));
    let report = assert_ok!(sweep_reminders(&faulty, &f.notifier).await);
    assert_eq!(
        report,
        SweepReport {
            due: 2,
            delivered: 1,
            failed: 1
        }
    );
    let notified: Vec<_> = f
        .notifications
        .list(&alice())
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.capsule_id)
        .collect();
    assert_eq!(notified.len(), 2);
    assert!(notified.contains(&first.id));
    assert!(notified.contains(&second.id));

    // only the unrecorded one is due again
    let due = f.capsules.due_reminders().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].capsule_id, first.id);
}

#[tokio::test]
async fn lost_update_is_a_conflict() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let capsule = f
        .capsules
        .create(&alice(), f.create_req(album_id, Duration::days(1)))
        .await
        .unwrap();
    let faulty = f.capsules_over(Arc::new(FaultyCapsuleStore {
        lose_updates: true,
        ..FaultyCapsuleStore::new(f.store.clone())
    }));
    let patch = CapsulePatch {
        theme: Some(Theme::Modern),
        ..Default::default()
    };
    let err = assert_err!(faulty.update(capsule.id, &alice(), patch).await);
    assert_matches!(err, CapsuleError::Conflict(_));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_database_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("missing").join("sub").join("memorybox.db");
    let pool = open_db_pool(db_path.to_str().unwrap()).unwrap();
    let store = Arc::new(DbStore::new(pool));

    let res = store.get_capsule(CapsuleId(1)).await;
    assert_matches!(res, Err(StoreError::Unavailable(_)));

    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(start()));
    let capsules = CapsuleService::new(store.clone(), store, clock, test_hasher());
    let err = assert_err!(capsules.get(CapsuleId(1), &alice()).await);
    assert_matches!(err, CapsuleError::Unavailable(_));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn concurrent_shares_of_the_same_principal() {
    let f = fixture().await;
    let album_id = f.album(&alice()).await;
    let (owner, grantee) = (alice(), bob());
    let (a, b) = tokio::join!(
        f.albums.share(album_id, &owner, &grantee, Permission::Viewer),
        f.albums.share(album_id, &owner, &grantee, Permission::Viewer),
    );
    let mut outcomes = vec![assert_ok!(a), assert_ok!(b)];
    outcomes.sort_by_key(|o| matches!(o, ShareOutcome::Unchanged(_)));
    assert_eq!(
        outcomes,
        vec![
            ShareOutcome::Added(Permission::Viewer),
            ShareOutcome::Unchanged(Permission::Viewer)
        ]
    );
    let albums = f.albums.list_visible(&bob()).await.unwrap();
    assert_eq!(albums[0].collaborators.len(), 1);
}
