use chrono::{DateTime, Utc};
use claims::assert_ok;

use crate::model::{
    repository::{self, album::CreateAlbum, capsule::InsertCapsule, db::DbConn},
    AlbumId, Capsule, Principal, ReminderPolicy, Theme,
};

pub fn insert_test_album(conn: &mut DbConn, owner: &str, now: DateTime<Utc>) -> AlbumId {
    assert_ok!(repository::album::create_album(
        conn,
        CreateAlbum {
            owner: Principal::new(owner),
            name: Some(format!("{}'s album", owner)),
            description: None,
        },
        now,
    ))
}

pub fn insert_test_capsule(
    conn: &mut DbConn,
    album_id: AlbumId,
    owner: &str,
    created_at: DateTime<Utc>,
    unlock_at: DateTime<Utc>,
    reminder_policy: ReminderPolicy,
) -> Capsule {
    assert_ok!(repository::capsule::insert_capsule(
        conn,
        &InsertCapsule {
            album_id,
            owner: Principal::new(owner),
            unlock_at,
            theme: Theme::Vintage,
            password_hash: None,
            reminder_policy,
            created_at,
        },
    ))
}
