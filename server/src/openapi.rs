use utoipa::OpenApi;

use crate::{http_error::ErrorBody, routes, schema};

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::capsule::create_capsule,
        routes::capsule::list_capsules,
        routes::capsule::get_capsule,
        routes::capsule::update_capsule,
        routes::capsule::delete_capsule,
        routes::capsule::open_capsule,
        routes::album::get_visible_albums,
        routes::album::create_album,
        routes::album::share_album,
        routes::notification::get_notifications,
        routes::notification::mark_notification_read,
    ),
    components(schemas(
        ErrorBody,
        schema::AlbumId,
        schema::CapsuleId,
        schema::NotificationId,
        schema::Theme,
        schema::ReminderPolicy,
        schema::Capsule,
        schema::CreateCapsuleRequest,
        schema::UpdateCapsuleRequest,
        schema::OpenCapsuleRequest,
        schema::OpenCapsuleResponse,
        schema::Permission,
        schema::Collaborator,
        schema::Album,
        schema::CreateAlbumRequest,
        schema::ShareAlbumRequest,
        schema::ShareOutcome,
        schema::ShareAlbumResponse,
        schema::Notification,
    )),
    tags((name = "memorybox"))
)]
pub struct ApiDoc;
