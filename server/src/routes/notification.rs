use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use memorybox_core::model;

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, ErrorBody, HttpError},
    principal::RequestPrincipal,
    schema::{Notification, NotificationId},
};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_notifications))
        .route("/:id/read", post(mark_notification_read))
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses((status = 200, body = Vec<Notification>)),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_notifications(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = app_state.notifications.list(&principal.0).await?;
    Ok(Json(notifications.iter().map(Notification::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = String, Path, description = "NotificationId")),
    responses(
        (status = 204, description = "Notification marked as read"),
        (status = 404, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn mark_notification_read(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let notification_id: model::NotificationId =
        NotificationId(id).try_into().map_err(HttpError::bad_request)?;
    app_state
        .notifications
        .mark_read(notification_id, &principal.0)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
