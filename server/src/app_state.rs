use std::sync::Arc;

use memorybox_core::{
    capsule::CapsulePasswordHasher,
    model::repository::db::DbPool,
    service::{
        AlbumService, CapsuleService, Clock, InAppNotifier, NotificationService,
        ReminderNotifier,
    },
    store::DbStore,
};

pub struct AppState {
    pub capsules: CapsuleService,
    pub albums: AlbumService,
    pub notifications: NotificationService,
    pub notifier: Arc<dyn ReminderNotifier>,
}

impl AppState {
    /// Wires all services to the database behind `pool`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>, hasher: CapsulePasswordHasher) -> Self {
        let store = Arc::new(DbStore::new(pool));
        AppState {
            capsules: CapsuleService::new(store.clone(), store.clone(), clock.clone(), hasher),
            albums: AlbumService::new(store.clone(), clock.clone()),
            notifications: NotificationService::new(store.clone()),
            notifier: Arc::new(InAppNotifier::new(store, clock)),
        }
    }
}

pub type SharedState = Arc<AppState>;
