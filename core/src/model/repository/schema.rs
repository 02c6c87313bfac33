diesel::table! {
    Album (album_id) {
        album_id -> BigInt,
        owner -> Text,
        name -> Nullable<Text>,
        description -> Nullable<Text>,
        created_at -> BigInt,
        changed_at -> BigInt,
    }
}

diesel::table! {
    AlbumCollaborator (album_collaborator_id) {
        album_collaborator_id -> BigInt,
        album_id -> BigInt,
        principal -> Text,
        permission -> Text,
        idx -> Integer,
    }
}

diesel::table! {
    Capsule (capsule_id) {
        capsule_id -> BigInt,
        album_id -> BigInt,
        owner -> Text,
        unlock_at -> BigInt,
        theme -> Text,
        password_hash -> Nullable<Text>,
        reminder_policy -> Text,
        last_reminder_sent_at -> Nullable<BigInt>,
        created_at -> BigInt,
    }
}

diesel::table! {
    Notification (notification_id) {
        notification_id -> BigInt,
        recipient -> Text,
        capsule_id -> BigInt,
        message -> Text,
        created_at -> BigInt,
        is_read -> Integer,
    }
}

diesel::joinable!(AlbumCollaborator -> Album (album_id));
diesel::joinable!(Capsule -> Album (album_id));
diesel::joinable!(Notification -> Capsule (capsule_id));

diesel::allow_tables_to_appear_in_same_query!(
    Album,
    AlbumCollaborator,
    Capsule,
    Notification,
);
